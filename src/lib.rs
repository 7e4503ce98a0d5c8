//! A unified streaming abstraction over interchangeable chat completion providers.
//!
//! This library provides one [`ChatProvider`] contract covering Google Gemini,
//! OpenAI, DeepSeek and a deterministic echo backend. Each provider owns its
//! conversation history, streams response text as it arrives, and commits the
//! completed response so the next message carries the full context.

pub mod endpoint;
pub mod error;
pub mod factory;
pub mod history;
pub mod provider;
pub mod providers;
pub mod settings;
pub mod stream;
pub mod types;

// Re-export core types for easy usage
pub use error::Error;
pub use factory::{ProviderConfig, ProviderFactory};
pub use history::Conversation;
pub use provider::{ChatProvider, FragmentStream};
pub use providers::*;
pub use settings::{EnvSettings, MemorySettings, SettingsStore};
pub use stream::FragmentDecoder;
pub use types::*;
