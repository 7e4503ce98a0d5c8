use std::sync::Arc;

use chatstream::{ChatProvider, Error, MemorySettings, ProviderFactory, ProviderId};
use futures_util::StreamExt;

#[tokio::test(start_paused = true)]
async fn test_factory_creates_working_echo_provider() {
    let factory = ProviderFactory::new(Arc::new(MemorySettings::new()));
    let mut provider: Box<dyn ChatProvider> = factory.create("echo-model", "echobot").unwrap();

    let mut stream = provider.send_message_stream("hello world").await.unwrap();
    let mut fragments = Vec::new();
    while let Some(item) = stream.next().await {
        fragments.push(item.unwrap());
    }

    assert_eq!(fragments, vec!["Echo: ", "hello ", "world "]);
}

#[tokio::test(start_paused = true)]
async fn test_each_create_returns_fresh_instance() {
    let factory = ProviderFactory::new(Arc::new(MemorySettings::new()));

    for _ in 0..2 {
        let mut provider = factory.create("echo-model", "echobot").unwrap();
        let mut stream = provider.send_message_stream("again").await.unwrap();

        let mut fragments = Vec::new();
        while let Some(item) = stream.next().await {
            fragments.push(item.unwrap());
        }
        assert_eq!(fragments, vec!["Echo: ", "again "]);
    }
}

#[test]
fn test_factory_error_surface() {
    let factory = ProviderFactory::new(Arc::new(MemorySettings::new()));

    let err = factory.create("gpt-4o-mini", "openai").err().unwrap();
    assert!(matches!(
        err,
        Error::MissingApiKey {
            provider: ProviderId::OpenAi
        }
    ));

    let err = factory.create("some-model", "llama").err().unwrap();
    assert_eq!(err.to_string(), "Unknown provider: llama");
}

#[test]
fn test_error_display() {
    let error = Error::api(ProviderId::OpenAi, 429, "Rate limit reached");
    assert!(error.to_string().contains("openai"));
    assert!(error.to_string().contains("429"));
    assert!(error.to_string().contains("Rate limit reached"));

    let config_error = Error::config("bad proxy template");
    assert!(config_error.to_string().contains("Invalid configuration"));
}
