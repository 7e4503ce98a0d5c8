//! Provider implementations for the supported chat backends.

mod echo;
mod genai;
mod rest;

// Re-export commonly used provider types
pub use echo::EchoProvider;
pub use genai::GeminiProvider;
pub use rest::RestChatProvider;

use serde::Deserialize;

use crate::types::ProviderId;
use crate::Error;

/// System directive seeding every conversation.
pub const SYSTEM_DIRECTIVE: &str = "You are a helpful and creative AI assistant. Provide clear, concise, and friendly responses. Use Markdown for formatting, such as lists, bold text, and code blocks, to enhance readability.";

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Turn a non-2xx response into an API error, extracting the provider's
/// error message when the body carries one.
pub(crate) async fn api_error(provider: ProviderId, response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.error.message)
            .unwrap_or_else(|| "Unknown error".to_string()),
        Err(_) => "Unknown error".to_string(),
    };
    Error::api(provider, status, message)
}
