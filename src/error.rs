use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures talking to an external provider (LLM, web search, market data).
///
/// These are caught at the dispatcher boundary and translated into a single
/// generic user-visible reply; the detail only reaches the logs.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned status {status}")]
    Status {
        provider: &'static str,
        status: u16,
    },

    #[error("{provider} response could not be decoded: {reason}")]
    Decode {
        provider: &'static str,
        reason: String,
    },

    #[error("{provider} timed out after {secs}s")]
    Timeout { provider: &'static str, secs: u64 },

    #[error("{provider} returned an empty completion")]
    EmptyCompletion { provider: &'static str },
}

/// Failures producing a technical-analysis report.
///
/// A report is all-or-nothing: either every metric is computed or the
/// whole analysis fails with one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("insufficient history: have {have} samples, need {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("market data unavailable")]
    DataUnavailable,
}

/// Failures of the flat-file quota persistence.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("quota store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("quota store contents invalid: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Top-level error type aggregating all component boundaries.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
