//! CoinGecko market-chart client.

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::config::MarketConfig;
use crate::domain::signal::{PriceSample, PriceSeries};
use crate::error::{ProviderError, Result};
use crate::port::market::MarketData;

const PROVIDER: &str = "coingecko";

/// CoinGecko `/coins/{id}/market_chart` client.
#[derive(Debug)]
pub struct CoinGecko {
    client: Client,
    base_url: String,
}

impl CoinGecko {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &MarketConfig) -> Self {
        Self::new(&config.endpoint)
    }
}

/// Payload shape: parallel `[timestamp_ms, value]` arrays.
#[derive(Deserialize)]
struct MarketChart {
    prices: Vec<(i64, f64)>,
    total_volumes: Vec<(i64, f64)>,
}

#[async_trait]
impl MarketData for CoinGecko {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn price_series(&self, asset_id: &str, window_days: u32) -> Result<PriceSeries> {
        let url = format!("{}/coins/{asset_id}/market_chart", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", "usd"),
                ("days", &window_days.to_string()),
                ("interval", "daily"),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            }
            .into());
        }

        let chart: MarketChart = response.json().await.map_err(|e| ProviderError::Decode {
            provider: PROVIDER,
            reason: e.to_string(),
        })?;

        let samples = chart
            .prices
            .iter()
            .zip(&chart.total_volumes)
            .filter_map(|(&(ts, close), &(_, volume))| {
                let timestamp = DateTime::from_timestamp_millis(ts)?;
                Some(PriceSample {
                    timestamp,
                    close,
                    volume,
                })
            })
            .collect();

        Ok(PriceSeries::new(samples))
    }
}
