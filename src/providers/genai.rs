//! Gemini chat provider backed by a lazily created streaming session.

use reqwest::Client;
use serde::Serialize;

use super::{api_error, SYSTEM_DIRECTIVE};
use crate::endpoint;
use crate::history::CommitStream;
use crate::provider::{ChatProvider, FragmentStream};
use crate::stream::FragmentDecoder;
use crate::types::ProviderId;
use crate::Error;

/// Gemini content entry. The API knows only "user" and "model" roles.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Part {
    text: String,
}

impl Content {
    fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user",
            parts: vec![Part { text: text.into() }],
        }
    }

    fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model",
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
}

/// One streaming chat session. Keeps its own content log; since the API
/// has no system role, the directive travels as a two-entry preamble.
struct ChatSession {
    client: Client,
    model: String,
    api_key: String,
    proxy_template: Option<String>,
    contents: Vec<Content>,
}

impl ChatSession {
    fn new(
        client: Client,
        model: String,
        api_key: String,
        proxy_template: Option<String>,
    ) -> Self {
        Self {
            client,
            model,
            api_key,
            proxy_template,
            contents: vec![
                Content::user(format!("System instruction: {SYSTEM_DIRECTIVE}")),
                Content::model(
                    "Understood. I will follow these instructions and act as a helpful AI assistant.",
                ),
            ],
        }
    }

    async fn send<'a>(&'a mut self, message: &str) -> Result<FragmentStream<'a>, Error> {
        self.contents.push(Content::user(message));

        // The credential travels as a query parameter, not a header
        let api_path = format!(
            "/v1beta/models/{}:streamGenerateContent?key={}",
            self.model, self.api_key
        );
        let url = endpoint::resolve(ProviderId::Google, &api_path, self.proxy_template.as_deref())?;
        tracing::debug!(model = %self.model, entries = self.contents.len(), "sending generate-content request");

        let request = GenerateContentRequest {
            contents: &self.contents,
        };

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(ProviderId::Google, response).await);
        }

        let contents = &mut self.contents;
        let fragments = FragmentDecoder::json_array(response.bytes_stream());
        let stream = CommitStream::new(fragments, move |text| contents.push(Content::model(text)));
        Ok(Box::pin(stream))
    }
}

/// Gemini provider. The session is created on the first message and reused
/// for the rest of the conversation; discarding the provider discards the
/// session and its context.
pub struct GeminiProvider {
    client: Client,
    model: String,
    api_key: String,
    proxy_template: Option<String>,
    session: Option<ChatSession>,
}

impl GeminiProvider {
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        proxy_template: Option<String>,
    ) -> Result<Self, Error> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            model: model.into(),
            api_key: api_key.into(),
            proxy_template,
            session: None,
        })
    }
}

#[async_trait::async_trait]
impl ChatProvider for GeminiProvider {
    async fn send_message_stream<'a>(
        &'a mut self,
        message: &str,
    ) -> Result<FragmentStream<'a>, Error> {
        let session = self.session.get_or_insert_with(|| {
            ChatSession::new(
                self.client.clone(),
                self.model.clone(),
                self.api_key.clone(),
                self.proxy_template.clone(),
            )
        });
        session.send(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_preamble() {
        let session = ChatSession::new(
            Client::new(),
            "gemini-2.5-flash".to_string(),
            "key".to_string(),
            None,
        );

        assert_eq!(
            session.contents,
            vec![
                Content::user(format!("System instruction: {SYSTEM_DIRECTIVE}")),
                Content::model(
                    "Understood. I will follow these instructions and act as a helpful AI assistant."
                ),
            ]
        );
    }

    #[test]
    fn test_request_wire_shape() {
        let contents = [Content::user("hi")];
        let request = GenerateContentRequest {
            contents: &contents,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "hi"}]},
                ],
            })
        );
    }
}
