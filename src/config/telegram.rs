//! Telegram transport configuration.
//!
//! The bot token itself is read from the `TELEGRAM_BOT_TOKEN` environment
//! variable at startup, never from the config file.

use serde::Deserialize;

/// Telegram bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot username including the leading `@`, used for mention detection.
    #[serde(default = "default_bot_username")]
    pub bot_username: String,

    /// Command prefix that triggers a question (e.g. `/tanya`).
    #[serde(default = "default_ask_command")]
    pub ask_command: String,

    /// Command prefix that triggers a technical-analysis report.
    #[serde(default = "default_analysis_command")]
    pub analysis_command: String,
}

fn default_bot_username() -> String {
    "@askcoinvestasi_bot".into()
}

fn default_ask_command() -> String {
    "/tanya".into()
}

fn default_analysis_command() -> String {
    "/sinyal".into()
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_username: default_bot_username(),
            ask_command: default_ask_command(),
            analysis_command: default_analysis_command(),
        }
    }
}
