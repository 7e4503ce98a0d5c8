use futures_util::Stream;
use std::pin::Pin;

use crate::Error;

/// A lazy sequence of response text fragments. Borrows the provider that
/// produced it, so the next message cannot be sent until this stream is
/// dropped.
pub type FragmentStream<'a> = Pin<Box<dyn Stream<Item = Result<String, Error>> + Send + 'a>>;

/// A trait for chat providers that stream response text incrementally.
///
/// Implementations own their conversation state: each call appends the user
/// message, issues the request with the full context, and commits the
/// response to history once the returned stream completes with text.
/// Failures before the stream starts surface as the method's error;
/// failures mid-stream surface as an error item that ends the stream.
#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync + 'static {
    /// Send a user message and stream the response as text fragments.
    async fn send_message_stream<'a>(&'a mut self, message: &str)
        -> Result<FragmentStream<'a>, Error>;
}
