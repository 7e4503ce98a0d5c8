use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::settings::keys;
use crate::Error;

/// Role of a conversation participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single turn in a conversation. Serializes directly as an OpenAI-style
/// chat message, so the history can be replayed on the wire as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Create a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Turn {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Turn {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Identifies one of the supported chat backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Google,
    OpenAi,
    DeepSeek,
    Echo,
}

impl ProviderId {
    /// Canonical identifier string, as used in settings keys, proxy
    /// templates and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Google => "google",
            ProviderId::OpenAi => "openai",
            ProviderId::DeepSeek => "deepseek",
            ProviderId::Echo => "echobot",
        }
    }

    /// The settings key holding this provider's API key, for providers
    /// whose credential is user-configurable.
    pub fn settings_key(&self) -> Option<&'static str> {
        match self {
            ProviderId::OpenAi => Some(keys::OPENAI_API_KEY),
            ProviderId::DeepSeek => Some(keys::DEEPSEEK_API_KEY),
            ProviderId::Google | ProviderId::Echo => None,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "google" => Ok(ProviderId::Google),
            "openai" => Ok(ProviderId::OpenAi),
            "deepseek" => Ok(ProviderId::DeepSeek),
            "echobot" => Ok(ProviderId::Echo),
            other => Err(Error::UnknownProvider(other.to_string())),
        }
    }
}
