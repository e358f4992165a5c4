//! Web-search and market-data provider configuration.

use serde::Deserialize;

/// Web search (Serper) settings.
///
/// The API key is read from the `SERPER_API_KEY` environment variable.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,

    /// How many organic results are folded into the prompt context.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_lookup_timeout_secs")]
    pub timeout_secs: u64,

    /// Substrings that mark a question as needing a live lookup.
    ///
    /// Matched case-insensitively. Deliberately coarse: temporal and
    /// price-volatility vocabulary plus literal year tokens.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

fn default_search_endpoint() -> String {
    "https://google.serper.dev/search".into()
}

const fn default_max_results() -> usize {
    3
}

const fn default_lookup_timeout_secs() -> u64 {
    10
}

fn default_keywords() -> Vec<String> {
    [
        "hari ini", "sekarang", "terbaru", "terkini", "berita", "harga", "naik", "turun",
        "crash", "today", "latest", "now", "news", "price", "pump", "dump", "2024", "2025",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            max_results: default_max_results(),
            timeout_secs: default_lookup_timeout_secs(),
            keywords: default_keywords(),
        }
    }
}

/// Market data (CoinGecko) settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_market_endpoint")]
    pub endpoint: String,

    /// Daily candles fetched per analysis request.
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    #[serde(default = "default_lookup_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_market_endpoint() -> String {
    "https://api.coingecko.com/api/v3".into()
}

const fn default_window_days() -> u32 {
    30
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            endpoint: default_market_endpoint(),
            window_days: default_window_days(),
            timeout_secs: default_lookup_timeout_secs(),
        }
    }
}
