//! Chat provider for OpenAI-compatible REST streaming APIs.

use reqwest::Client;
use serde::Serialize;

use super::{api_error, SYSTEM_DIRECTIVE};
use crate::endpoint;
use crate::history::{CommitStream, Conversation};
use crate::provider::{ChatProvider, FragmentStream};
use crate::stream::FragmentDecoder;
use crate::types::{ProviderId, Turn};
use crate::Error;

/// Chat completions request body. These APIs are stateless, so the entire
/// history is replayed on every request.
#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    stream: bool,
}

/// A provider for chat completion APIs that stream SSE deltas.
///
/// OpenAI and DeepSeek speak the same protocol and differ only in host,
/// path and credential, so one implementation serves both.
pub struct RestChatProvider {
    client: Client,
    provider: ProviderId,
    api_path: &'static str,
    model: String,
    api_key: String,
    proxy_template: Option<String>,
    history: Conversation,
}

impl RestChatProvider {
    /// Create a provider for the OpenAI chat completions API.
    pub fn openai(
        model: impl Into<String>,
        api_key: impl Into<String>,
        proxy_template: Option<String>,
    ) -> Result<Self, Error> {
        Self::new(
            ProviderId::OpenAi,
            "/v1/chat/completions",
            model,
            api_key,
            proxy_template,
        )
    }

    /// Create a provider for the DeepSeek chat completions API.
    pub fn deepseek(
        model: impl Into<String>,
        api_key: impl Into<String>,
        proxy_template: Option<String>,
    ) -> Result<Self, Error> {
        Self::new(
            ProviderId::DeepSeek,
            "/chat/completions",
            model,
            api_key,
            proxy_template,
        )
    }

    fn new(
        provider: ProviderId,
        api_path: &'static str,
        model: impl Into<String>,
        api_key: impl Into<String>,
        proxy_template: Option<String>,
    ) -> Result<Self, Error> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            provider,
            api_path,
            model: model.into(),
            api_key: api_key.into(),
            proxy_template,
            history: Conversation::with_system(SYSTEM_DIRECTIVE),
        })
    }

    /// The conversation so far, system directive included.
    pub fn history(&self) -> &[Turn] {
        self.history.turns()
    }
}

#[async_trait::async_trait]
impl ChatProvider for RestChatProvider {
    async fn send_message_stream<'a>(
        &'a mut self,
        message: &str,
    ) -> Result<FragmentStream<'a>, Error> {
        self.history.push_user(message);

        let url = endpoint::resolve(self.provider, self.api_path, self.proxy_template.as_deref())?;
        tracing::debug!(provider = %self.provider, %url, turns = self.history.len(), "sending chat request");

        let request = ChatCompletionsRequest {
            model: &self.model,
            messages: self.history.turns(),
            stream: true,
        };

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(self.provider, response).await);
        }

        let history = &mut self.history;
        let fragments = FragmentDecoder::sse_delta(response.bytes_stream());
        let stream = CommitStream::new(fragments, move |text| history.push_assistant(text));
        Ok(Box::pin(stream))
    }
}
