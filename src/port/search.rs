//! Web search port.

use async_trait::async_trait;

use crate::error::Result;

/// One organic search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
}

/// Fallible web lookup used to augment prompts with live context.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Run the query and return organic results, best first.
    ///
    /// # Errors
    ///
    /// Returns an error for transport or decode failures. The caller is
    /// expected to degrade gracefully, never to surface this to chat.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}
