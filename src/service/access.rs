//! Static allow-list gate for group conversations.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::message::{ConversationId, ConversationKind};
use crate::error::{Result, StoreError};

/// Decides whether a conversation may use the bot at all.
///
/// Private chats are always allowed. Group chats must appear in the
/// allow-list loaded once at startup; unknown ids fail closed. The gate
/// never mutates and sits in front of quota, memory, and completion.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    allowed_groups: HashSet<String>,
}

impl AccessGate {
    /// Build a gate from an explicit set of group ids.
    pub fn new(allowed_groups: impl IntoIterator<Item = String>) -> Self {
        Self {
            allowed_groups: allowed_groups.into_iter().collect(),
        }
    }

    /// Load the allow-list from a JSON array file. A missing file means
    /// no groups are allowed.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no allow-list file, groups disabled");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(StoreError::Io)?;
        let ids: Vec<String> = serde_json::from_str(&raw).map_err(StoreError::Serde)?;
        info!(groups = ids.len(), "allow-list loaded");
        Ok(Self::new(ids))
    }

    /// Whether this conversation passes the gate.
    #[must_use]
    pub fn is_allowed(&self, id: &ConversationId, kind: ConversationKind) -> bool {
        match kind {
            ConversationKind::Private => true,
            ConversationKind::Group => self.allowed_groups.contains(id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_chats_always_pass() {
        let gate = AccessGate::default();
        assert!(gate.is_allowed(&"anyone".into(), ConversationKind::Private));
    }

    #[test]
    fn unknown_group_fails_closed() {
        let gate = AccessGate::new(["G1".to_string()]);
        assert!(gate.is_allowed(&"G1".into(), ConversationKind::Group));
        assert!(!gate.is_allowed(&"G2".into(), ConversationKind::Group));
    }

    #[test]
    fn missing_file_means_no_groups() {
        let gate = AccessGate::from_file("/nonexistent/allowlist.json").unwrap();
        assert!(!gate.is_allowed(&"G1".into(), ConversationKind::Group));
    }
}
