//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file; every section is optional and
//! falls back to its defaults. Secrets (`TELEGRAM_BOT_TOKEN`,
//! `OPENAI_API_KEY`, `SERPER_API_KEY`) come from the environment only.
//!
//! # Example
//!
//! ```no_run
//! use tanyabot::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

pub mod limits;
pub mod llm;
pub mod logging;
pub mod lookup;
pub mod telegram;

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

pub use limits::{LimitsConfig, StorageConfig};
pub use llm::LlmConfig;
pub use logging::LoggingConfig;
pub use lookup::{MarketConfig, SearchConfig};
pub use telegram::TelegramConfig;

/// Aggregated application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadFile`] for I/O failures other than a
    /// missing file, [`ConfigError::Parse`] for invalid TOML, and
    /// [`ConfigError::InvalidValue`] for semantically bad settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            let raw = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            toml::from_str(&raw).map_err(ConfigError::Parse)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    fn validate(&self) -> Result<()> {
        if self.telegram.bot_username.is_empty() {
            return Err(ConfigError::MissingField {
                field: "telegram.bot_username",
            }
            .into());
        }
        if !self.telegram.ask_command.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "telegram.ask_command",
                reason: "must start with '/'".into(),
            }
            .into());
        }
        if self.limits.session_cap == 0 {
            return Err(ConfigError::InvalidValue {
                field: "limits.session_cap",
                reason: "must be at least one stored message".into(),
            }
            .into());
        }
        Ok(())
    }
}
