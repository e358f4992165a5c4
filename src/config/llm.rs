//! LLM provider configuration.
//!
//! The API key is read from the `OPENAI_API_KEY` environment variable at
//! runtime.

use serde::Deserialize;

/// OpenAI chat-completion settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for generation.
    ///
    /// Lower values produce more deterministic output.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens in the response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Completion timeout; a slower response counts as a provider failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

const fn default_temperature() -> f64 {
    0.7
}

const fn default_max_tokens() -> usize {
    700
}

const fn default_timeout_secs() -> u64 {
    25
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
