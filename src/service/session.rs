//! TTL-scoped conversation memory.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::message::{ChatMessage, ConversationId};

/// One conversation's bounded history.
struct Session {
    turns: Vec<ChatMessage>,
    last_activity: Instant,
}

/// In-memory map of conversation id to recent exchanges.
///
/// History is capped (oldest pair evicted first) and whole sessions are
/// dropped after sitting idle past the TTL. All access goes through one
/// lock, so a sweep racing an append can only ever leave a session fully
/// present or fully absent, never torn.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    sessions: Mutex<HashMap<String, Session>>,
    cap: usize,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store with the given history cap (messages, two per
    /// exchange) and idle TTL.
    #[must_use]
    pub fn new(cap: usize, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                sessions: Mutex::new(HashMap::new()),
                cap,
                ttl,
            }),
        }
    }

    /// Record one answered exchange, creating the session lazily and
    /// truncating the oldest messages past the cap.
    pub fn append(&self, id: &ConversationId, question: &str, answer: &str) {
        let mut sessions = self.inner.sessions.lock();
        let session = sessions.entry(id.as_str().to_string()).or_insert_with(|| Session {
            turns: Vec::new(),
            last_activity: Instant::now(),
        });
        session.turns.push(ChatMessage::user(question));
        session.turns.push(ChatMessage::assistant(answer));
        let excess = session.turns.len().saturating_sub(self.inner.cap);
        if excess > 0 {
            session.turns.drain(..excess);
        }
        session.last_activity = Instant::now();
    }

    /// Recent history for a conversation, oldest first. Returns a copy;
    /// later mutation of the store never shows through.
    #[must_use]
    pub fn recent(&self, id: &ConversationId) -> Vec<ChatMessage> {
        let sessions = self.inner.sessions.lock();
        sessions
            .get(id.as_str())
            .map(|s| s.turns.clone())
            .unwrap_or_default()
    }

    /// Drop every session idle longer than the TTL, as observed at `now`.
    pub fn sweep(&self, now: Instant) {
        let mut sessions = self.inner.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, s| now.duration_since(s.last_activity) <= self.inner.ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "idle sessions swept");
        }
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.sessions.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start the periodic idle sweep. The task stops when the returned
    /// handle is dropped or aborted, tying it to the owner's lifecycle.
    pub fn spawn_sweeper(&self, interval: Duration) -> SweeperHandle {
        let store = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                store.sweep(Instant::now());
            }
        });
        SweeperHandle { handle }
    }
}

/// Owns the background sweep task; aborts it on drop.
pub struct SweeperHandle {
    handle: JoinHandle<()>,
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn unknown_conversation_reads_empty() {
        let store = SessionStore::new(10, TTL);
        assert!(store.recent(&"G1".into()).is_empty());
    }

    #[test]
    fn history_is_capped_fifo() {
        let store = SessionStore::new(10, TTL);
        let id = ConversationId::from("G1");
        for i in 0..6 {
            store.append(&id, &format!("q{i}"), &format!("a{i}"));
        }
        let turns = store.recent(&id);
        assert_eq!(turns.len(), 10);
        // The first pair fell off; order of the rest is preserved.
        assert_eq!(turns[0].content, "q1");
        assert_eq!(turns[9].content, "a5");
    }

    #[test]
    fn recent_is_a_defensive_copy() {
        let store = SessionStore::new(10, TTL);
        let id = ConversationId::from("G1");
        store.append(&id, "q0", "a0");
        let snapshot = store.recent(&id);
        store.append(&id, "q1", "a1");
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn sweep_honors_the_ttl_boundary() {
        let store = SessionStore::new(10, TTL);
        store.append(&"G1".into(), "q", "a");
        let appended = Instant::now();

        // 4m59s idle survives the tick.
        store.sweep(appended + Duration::from_secs(299));
        assert_eq!(store.len(), 1);

        // Past 5m it is gone.
        store.sweep(appended + Duration::from_secs(301));
        assert!(store.is_empty());
    }

    #[test]
    fn swept_session_is_recreated_empty() {
        let store = SessionStore::new(10, TTL);
        let id = ConversationId::from("G1");
        store.append(&id, "q0", "a0");
        store.sweep(Instant::now() + TTL + Duration::from_secs(1));
        assert!(store.recent(&id).is_empty());
        store.append(&id, "q1", "a1");
        assert_eq!(store.recent(&id).len(), 2);
    }

    #[tokio::test]
    async fn sweeper_task_evicts_on_cadence() {
        let store = SessionStore::new(10, Duration::from_millis(50));
        store.append(&"G1".into(), "q", "a");
        let _sweeper = store.spawn_sweeper(Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(store.is_empty());
    }
}
