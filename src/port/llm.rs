//! LLM completion port.

use async_trait::async_trait;

use crate::domain::message::ChatMessage;
use crate::error::Result;

/// Client for large language model chat completion.
///
/// Implementations wrap a specific provider and handle authentication and
/// response parsing. The engine treats completion as an opaque, fallible
/// function from an ordered prompt to generated text.
///
/// Implementations must be `Send + Sync`; one completion may be in flight
/// per conversation at a time, across many conversations.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Send the ordered prompt and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, non-success statuses, or
    /// responses without a usable completion.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
