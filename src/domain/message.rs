//! Conversation and message types shared across the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Conversation identifier - newtype for type safety.
///
/// The inner String is private so all construction goes through the
/// defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(String);

impl ConversationId {
    /// Create a new `ConversationId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the conversation ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ConversationId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Whether a conversation is a direct chat or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationKind {
    Private,
    Group,
}

/// A normalized inbound chat event.
///
/// Built once per transport event and never mutated; the dispatcher only
/// reads from it.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub conversation: ConversationId,
    pub kind: ConversationKind,
    pub text: String,
    /// Transport message id, echoed back so the reply threads correctly.
    pub message_id: i32,
    pub sender_username: Option<String>,
    /// Text of the quoted message when this is a reply.
    pub reply_to_text: Option<String>,
    /// Username of the quoted message's author when this is a reply.
    pub reply_to_author: Option<String>,
}

/// Role tag for a prompt entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged entry of the prompt sent to the completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A reply ready for the transport to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub conversation: ConversationId,
    pub text: String,
    pub in_reply_to: i32,
}
