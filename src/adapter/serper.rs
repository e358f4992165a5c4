//! Serper.dev web search client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::{ConfigError, ProviderError, Result};
use crate::port::search::{SearchHit, WebSearch};

const PROVIDER: &str = "serper";

/// Serper.dev search API client.
#[derive(Debug)]
pub struct Serper {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl Serper {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from config plus the `SERPER_API_KEY` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(config: &SearchConfig) -> Result<Self> {
        let api_key = std::env::var("SERPER_API_KEY").map_err(|_| ConfigError::MissingField {
            field: "SERPER_API_KEY",
        })?;
        Ok(Self::new(&config.endpoint, api_key))
    }
}

#[derive(Serialize)]
struct Request<'a> {
    q: &'a str,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    organic: Vec<Organic>,
}

#[derive(Deserialize)]
struct Organic {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

#[async_trait]
impl WebSearch for Serper {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&Request { q: query })
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

        Ok(body
            .organic
            .into_iter()
            .filter(|o| !o.title.is_empty() || !o.snippet.is_empty())
            .map(|o| SearchHit {
                title: o.title,
                snippet: o.snippet,
            })
            .collect())
    }
}
