//! Per-conversation usage quota with durable counts.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::domain::message::ConversationId;
use crate::error::Result;
use crate::port::store::QuotaStore;

/// Tracks how many questions each conversation has had answered.
///
/// Counts only ever grow for the life of the process; a conversation at
/// the limit stays blocked until the persisted store is reset
/// out-of-band. The map lock is held across increment and persist so the
/// commit is atomic per conversation.
#[derive(Clone)]
pub struct QuotaTracker {
    inner: Arc<Inner>,
}

struct Inner {
    counts: Mutex<HashMap<String, u32>>,
    store: Arc<dyn QuotaStore>,
    limit: u32,
}

impl QuotaTracker {
    /// Load persisted counts and build the tracker.
    ///
    /// # Errors
    ///
    /// Returns an error when the store exists but cannot be read.
    pub fn load(store: Arc<dyn QuotaStore>, limit: u32) -> Result<Self> {
        let counts = store.load()?;
        info!(conversations = counts.len(), limit, "quota state loaded");
        Ok(Self {
            inner: Arc::new(Inner {
                counts: Mutex::new(counts),
                store,
                limit,
            }),
        })
    }

    /// Answers still available to this conversation.
    #[must_use]
    pub fn remaining(&self, id: &ConversationId) -> u32 {
        let counts = self.inner.counts.lock();
        let used = counts.get(id.as_str()).copied().unwrap_or(0);
        self.inner.limit.saturating_sub(used)
    }

    /// Commit one answered question.
    ///
    /// Returns `false` without mutating anything when the conversation is
    /// already at the limit. Otherwise increments and persists the full
    /// mapping before returning. A failed persist still advances the
    /// in-memory count; durability may be lost on crash, which is logged
    /// as a warning.
    pub fn try_consume(&self, id: &ConversationId) -> bool {
        let mut counts = self.inner.counts.lock();
        let count = counts.entry(id.as_str().to_string()).or_insert(0);
        if *count >= self.inner.limit {
            return false;
        }
        *count += 1;

        if let Err(e) = self.inner.store.save(&counts) {
            warn!(conversation = %id, error = %e, "quota persist failed, count kept in memory");
        }
        true
    }
}
