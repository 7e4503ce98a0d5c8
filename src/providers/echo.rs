//! Deterministic echo provider for offline use and tests.

use futures_util::{stream, StreamExt};
use std::time::Duration;

use crate::provider::{ChatProvider, FragmentStream};
use crate::Error;

const ECHO_PREFIX: &str = "Echo: ";
const PREFIX_DELAY: Duration = Duration::from_millis(100);
const WORD_DELAY: Duration = Duration::from_millis(150);

/// Echoes the user's message back word by word, with fixed delays standing
/// in for network latency. Keeps no history and never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoProvider;

impl EchoProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ChatProvider for EchoProvider {
    async fn send_message_stream<'a>(
        &'a mut self,
        message: &str,
    ) -> Result<FragmentStream<'a>, Error> {
        let mut fragments = vec![ECHO_PREFIX.to_string()];
        fragments.extend(message.split(' ').map(|word| format!("{word} ")));

        let stream = stream::iter(fragments.into_iter().enumerate()).then(
            |(index, fragment)| async move {
                match index {
                    0 => {}
                    1 => tokio::time::sleep(PREFIX_DELAY).await,
                    _ => tokio::time::sleep(WORD_DELAY).await,
                }
                Ok(fragment)
            },
        );

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_echoes_word_by_word() {
        let mut provider = EchoProvider::new();
        let mut stream = provider.send_message_stream("hello world").await.unwrap();

        let mut fragments = Vec::new();
        while let Some(item) = stream.next().await {
            fragments.push(item.unwrap());
        }
        assert_eq!(fragments, vec!["Echo: ", "hello ", "world "]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delays_between_fragments() {
        let mut provider = EchoProvider::new();
        let start = tokio::time::Instant::now();
        let mut stream = provider.send_message_stream("one two three").await.unwrap();

        assert_eq!(stream.next().await.unwrap().unwrap(), "Echo: ");
        assert_eq!(start.elapsed(), Duration::ZERO);

        assert_eq!(stream.next().await.unwrap().unwrap(), "one ");
        assert_eq!(start.elapsed(), Duration::from_millis(100));

        assert_eq!(stream.next().await.unwrap().unwrap(), "two ");
        assert_eq!(start.elapsed(), Duration::from_millis(250));

        assert_eq!(stream.next().await.unwrap().unwrap(), "three ");
        assert_eq!(start.elapsed(), Duration::from_millis(400));

        assert!(stream.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_word_message() {
        let mut provider = EchoProvider::new();
        let mut stream = provider.send_message_stream("hi").await.unwrap();

        let mut fragments = Vec::new();
        while let Some(item) = stream.next().await {
            fragments.push(item.unwrap());
        }
        assert_eq!(fragments, vec!["Echo: ", "hi "]);
    }
}
