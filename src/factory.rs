use std::str::FromStr;
use std::sync::Arc;

use crate::providers::{EchoProvider, GeminiProvider, RestChatProvider};
use crate::settings::{keys, SettingsStore};
use crate::types::ProviderId;
use crate::{ChatProvider, Error};

/// Configuration for creating a provider. Resolved once at construction;
/// the provider never re-reads settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: ProviderId,
    pub model: String,
    pub api_key: Option<String>,
    pub proxy_template: Option<String>,
}

impl ProviderConfig {
    pub fn new(provider: ProviderId, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            api_key: None,
            proxy_template: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_proxy_template(mut self, template: impl Into<String>) -> Self {
        self.proxy_template = Some(template.into());
        self
    }

    /// Build a provider with a fresh conversation. A missing credential
    /// fails here, before any network activity.
    pub fn build(self) -> Result<Box<dyn ChatProvider>, Error> {
        match self.provider {
            ProviderId::Google => {
                let api_key = self.api_key.ok_or_else(|| {
                    Error::config(
                        "Google API key is not configured. This is a platform issue and cannot be set by the user.",
                    )
                })?;
                let provider = GeminiProvider::new(self.model, api_key, self.proxy_template)?;
                Ok(Box::new(provider))
            }
            ProviderId::OpenAi => {
                let api_key = self.api_key.ok_or(Error::MissingApiKey {
                    provider: ProviderId::OpenAi,
                })?;
                let provider = RestChatProvider::openai(self.model, api_key, self.proxy_template)?;
                Ok(Box::new(provider))
            }
            ProviderId::DeepSeek => {
                let api_key = self.api_key.ok_or(Error::MissingApiKey {
                    provider: ProviderId::DeepSeek,
                })?;
                let provider =
                    RestChatProvider::deepseek(self.model, api_key, self.proxy_template)?;
                Ok(Box::new(provider))
            }
            ProviderId::Echo => Ok(Box::new(EchoProvider::new())),
        }
    }
}

/// Factory for creating chat providers.
///
/// Credentials come from the injected settings store; the platform-managed
/// Gemini key comes from the `GEMINI_API_KEY` environment variable. Every
/// [`create`](Self::create) call returns a fresh instance with a fresh
/// conversation.
pub struct ProviderFactory {
    settings: Arc<dyn SettingsStore>,
    platform_api_key: Option<String>,
}

impl ProviderFactory {
    /// Create a factory over the given settings store.
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings,
            platform_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
        }
    }

    /// Override the platform-managed Gemini API key.
    pub fn with_platform_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.platform_api_key = Some(api_key.into());
        self
    }

    /// Create a provider for the given model and provider identifier.
    ///
    /// Credential lookups happen here, so a missing key fails immediately
    /// with an error naming the provider, before any request goes out.
    pub fn create(&self, model_id: &str, provider_id: &str) -> Result<Box<dyn ChatProvider>, Error> {
        let provider = ProviderId::from_str(provider_id)?;

        let api_key = match provider {
            ProviderId::Google => Some(self.platform_api_key.clone().ok_or_else(|| {
                Error::config(
                    "Google API key is not configured. This is a platform issue and cannot be set by the user.",
                )
            })?),
            ProviderId::OpenAi | ProviderId::DeepSeek => {
                let key = provider
                    .settings_key()
                    .and_then(|key| self.get(key))
                    .ok_or(Error::MissingApiKey { provider })?;
                Some(key)
            }
            ProviderId::Echo => None,
        };

        let mut config = ProviderConfig::new(provider, model_id);
        if let Some(api_key) = api_key {
            config = config.with_api_key(api_key);
        }
        if let Some(template) = self.get(keys::PROXY_URL_PATTERN) {
            config = config.with_proxy_template(template);
        }

        config.build()
    }

    /// Read a setting, treating an empty stored value as unset.
    fn get(&self, key: &str) -> Option<String> {
        self.settings
            .get(key)
            .filter(|value| !value.is_empty())
    }
}
