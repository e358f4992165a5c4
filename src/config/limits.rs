//! Usage limits, session lifecycle, and persistence paths.

use serde::Deserialize;

/// Per-conversation usage and memory limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum successfully answered questions per conversation.
    ///
    /// A conversation at the limit stays blocked until the persisted
    /// quota store is reset out-of-band.
    #[serde(default = "default_quota_limit")]
    pub quota_limit: u32,

    /// Maximum stored messages per session (two per exchange).
    #[serde(default = "default_session_cap")]
    pub session_cap: usize,

    /// Idle time after which a session is evicted.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Cadence of the idle-eviction sweep.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

const fn default_quota_limit() -> u32 {
    100
}

const fn default_session_cap() -> usize {
    10
}

const fn default_session_ttl_secs() -> u64 {
    300
}

const fn default_sweep_interval_secs() -> u64 {
    60
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            quota_limit: default_quota_limit(),
            session_cap: default_session_cap(),
            session_ttl_secs: default_session_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

/// Locations of the flat persistence files.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON array of group conversation ids permitted to use the bot.
    #[serde(default = "default_allowlist_path")]
    pub allowlist_path: String,

    /// JSON object mapping conversation id to answered-question count.
    #[serde(default = "default_quota_path")]
    pub quota_path: String,
}

fn default_allowlist_path() -> String {
    "allowlist.json".into()
}

fn default_quota_path() -> String {
    "quota.json".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            allowlist_path: default_allowlist_path(),
            quota_path: default_quota_path(),
        }
    }
}
