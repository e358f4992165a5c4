//! Flat-file JSON quota store.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, StoreError};
use crate::port::store::QuotaStore;

/// Persists the quota mapping as a single pretty-printed JSON object,
/// rewritten whole on every commit. Single-process only; no cross-instance
/// locking.
#[derive(Debug, Clone)]
pub struct JsonQuotaStore {
    path: PathBuf,
}

impl JsonQuotaStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuotaStore for JsonQuotaStore {
    fn load(&self) -> Result<HashMap<String, u32>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(StoreError::Io)?;
        let counts = serde_json::from_str(&raw).map_err(StoreError::Serde)?;
        Ok(counts)
    }

    fn save(&self, counts: &HashMap<String, u32>) -> Result<()> {
        let raw = serde_json::to_string_pretty(counts).map_err(StoreError::Serde)?;
        fs::write(&self.path, raw).map_err(StoreError::Io)?;
        Ok(())
    }
}
