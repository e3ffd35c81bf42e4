//! Provider configuration loaded from environment variables.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the OpenRouter client.
///
/// | Env var               | Default                                          |
/// |-----------------------|--------------------------------------------------|
/// | `OPENROUTER_API_KEY`  | unset, AI authoring disabled                     |
/// | `OPENROUTER_BASE_URL` | `https://openrouter.ai/api/v1/chat/completions` |
/// | `OPENROUTER_MODEL`    | `meta-llama/llama-3.3-70b-instruct`              |
/// | `AI_TIMEOUT_SECS`     | `30`                                             |
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl AiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 0.9,
        }
    }

    /// Returns `None` when `OPENROUTER_API_KEY` is unset or blank.
    ///
    /// # Panics
    ///
    /// Panics if `AI_TIMEOUT_SECS` is set but not a valid `u64`.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("OPENROUTER_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("OPENROUTER_MODEL") {
            config.model = model;
        }
        let timeout_secs: u64 = std::env::var("AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("AI_TIMEOUT_SECS must be a valid u64");
        config.timeout = Duration::from_secs(timeout_secs);
        Some(config)
    }
}
