//! Quota persistence port.

use std::collections::HashMap;

use crate::error::Result;

/// Durable storage for per-conversation usage counts.
///
/// The mapping is small and rewritten whole on every commit; load runs
/// once at startup.
pub trait QuotaStore: Send + Sync {
    /// Read the persisted counts. A missing store reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures or corrupt contents.
    fn load(&self) -> Result<HashMap<String, u32>>;

    /// Rewrite the full mapping.
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures. Callers treat a failed save as
    /// a durability warning, not a fatal condition.
    fn save(&self, counts: &HashMap<String, u32>) -> Result<()>;
}
