//! Injected settings store for credentials and the proxy template.

use std::collections::HashMap;

/// Keys the factory looks up in the settings store.
pub mod keys {
    /// User-supplied OpenAI API key.
    pub const OPENAI_API_KEY: &str = "openai_api_key";
    /// User-supplied DeepSeek API key.
    pub const DEEPSEEK_API_KEY: &str = "deepseek_api_key";
    /// Optional proxy URL template containing the `{provider}` placeholder.
    pub const PROXY_URL_PATTERN: &str = "proxy_url_pattern";
}

/// Read-only view of user-managed settings.
///
/// Whatever owns the real storage (a settings page, a config file, a test
/// fixture) implements this trait; the factory never reads ambient global
/// state.
pub trait SettingsStore: Send + Sync {
    /// Look up a setting by key.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory settings, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a setting, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Settings sourced from environment variables. The key `openai_api_key`
/// maps to the variable `OPENAI_API_KEY`.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings;

impl SettingsStore for EnvSettings {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key.to_uppercase()).ok()
    }
}
