//! Market data port.

use async_trait::async_trait;

use crate::domain::signal::PriceSeries;
use crate::error::Result;

/// Fallible price-series lookup for the analysis command.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Fetch an ascending daily close/volume series for an asset.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, non-success statuses, or
    /// unparseable payloads.
    async fn price_series(&self, asset_id: &str, window_days: u32) -> Result<PriceSeries>;
}
