//! OpenAI chat-completion client.
//!
//! Implements the [`Llm`] trait against the Chat Completions API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::domain::message::{ChatMessage, ChatRole};
use crate::error::{ConfigError, ProviderError, Result};
use crate::port::llm::Llm;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const PROVIDER: &str = "openai";

/// OpenAI API client.
#[derive(Debug)]
pub struct OpenAi {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f64,
}

impl OpenAi {
    /// Create a new client with explicit configuration.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f64,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Create a client from config plus the `OPENAI_API_KEY` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(config: &LlmConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| ConfigError::MissingField {
            field: "OPENAI_API_KEY",
        })?;
        Ok(Self::new(
            api_key,
            &config.model,
            config.max_tokens,
            config.temperature,
        ))
    }
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    max_tokens: usize,
    temperature: f64,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

const fn wire_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    }
}

#[async_trait]
impl Llm for OpenAi {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = Request {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: wire_role(m.role),
                    content: &m.content,
                })
                .collect(),
        };

        let response = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            }
            .into());
        }

        let body: Response = response.json().await.map_err(|e| ProviderError::Decode {
            provider: PROVIDER,
            reason: e.to_string(),
        })?;

        let answer = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(ProviderError::EmptyCompletion { provider: PROVIDER })?;

        Ok(answer)
    }
}
