use crate::types::ProviderId;
use thiserror::Error;

/// Errors that can occur when using the chatstream library.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} API error (status {status}): {message}")]
    Api {
        provider: ProviderId,
        status: u16,
        message: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{provider} API key not found. Please set it in the settings menu.")]
    MissingApiKey { provider: ProviderId },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Streaming error: {0}")]
    Streaming(String),
}

impl Error {
    pub fn api(provider: ProviderId, status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            provider,
            status,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn streaming(message: impl Into<String>) -> Self {
        Error::Streaming(message.into())
    }
}
