//! Trading-symbol to market asset-id resolution.

use std::collections::HashMap;

/// Static table mapping user-facing symbols (`BTCUSDT`, `btc`) to the
/// market data provider's asset ids.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    assets: HashMap<String, String>,
}

impl SymbolTable {
    /// Build a table from `(symbol, asset_id)` pairs. Symbols are matched
    /// case-insensitively, with or without the `USDT` quote suffix.
    pub fn new(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let assets = pairs
            .into_iter()
            .map(|(symbol, asset)| (symbol.to_uppercase(), asset))
            .collect();
        Self { assets }
    }

    /// The symbols traders actually ask about.
    #[must_use]
    pub fn builtin() -> Self {
        let pairs = [
            ("BTC", "bitcoin"),
            ("ETH", "ethereum"),
            ("BNB", "binancecoin"),
            ("SOL", "solana"),
            ("XRP", "ripple"),
            ("ADA", "cardano"),
            ("DOGE", "dogecoin"),
            ("DOT", "polkadot"),
            ("MATIC", "matic-network"),
            ("AVAX", "avalanche-2"),
            ("LINK", "chainlink"),
            ("TON", "the-open-network"),
        ];
        Self::new(pairs.map(|(s, a)| (s.to_string(), a.to_string())))
    }

    /// Resolve a user-supplied symbol to an asset id.
    #[must_use]
    pub fn resolve(&self, symbol: &str) -> Option<&str> {
        let upper = symbol.trim().to_uppercase();
        let base = upper.strip_suffix("USDT").unwrap_or(&upper);
        self.assets.get(base).map(String::as_str)
    }
}
