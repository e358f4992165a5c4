//! Trigger classification for inbound messages.
//!
//! A message only becomes a question when it carries a structural marker:
//! the ask command, a mention of the bot, or a reply to one of the bot's
//! own messages. Everything else is ignored without side effects.

use crate::domain::message::InboundMessage;

/// Inputs the classifier matches against, kept as data so tests can vary
/// them freely.
#[derive(Debug, Clone)]
pub struct TriggerConfig {
    /// Bot username including the leading `@`.
    pub bot_username: String,
    /// Ask command prefix, e.g. `/tanya`.
    pub ask_command: String,
    /// Analysis command prefix, e.g. `/sinyal`.
    pub analysis_command: String,
}

/// How an inbound message qualified as a question, if at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Ask command with the stripped question text (possibly empty).
    Command { question: String },
    /// Bot mention with the mention token removed.
    Mention { question: String },
    /// Reply to one of the bot's own messages; the full text is the question.
    QualifyingReply { question: String },
    /// No structural marker; the dispatcher stays silent.
    None,
}

impl TriggerDecision {
    /// The extracted question, when this decision carries one.
    #[must_use]
    pub fn question(&self) -> Option<&str> {
        match self {
            Self::Command { question }
            | Self::Mention { question }
            | Self::QualifyingReply { question } => Some(question),
            Self::None => None,
        }
    }
}

/// Classify an inbound message. Pure and deterministic.
#[must_use]
pub fn classify(msg: &InboundMessage, config: &TriggerConfig) -> TriggerDecision {
    let text = msg.text.trim();

    if let Some(rest) = strip_command(text, &config.ask_command, &config.bot_username) {
        return TriggerDecision::Command {
            question: rest.to_string(),
        };
    }

    if text.contains(&config.bot_username) {
        let question = text.replace(&config.bot_username, "");
        return TriggerDecision::Mention {
            question: question.trim().to_string(),
        };
    }

    if is_reply_to_bot(msg, &config.bot_username) {
        return TriggerDecision::QualifyingReply {
            question: text.to_string(),
        };
    }

    TriggerDecision::None
}

/// Extract the symbol argument of the analysis command, if this message
/// invokes it. `/sinyal BTCUSDT` and `/sinyal@bot BTCUSDT` both match;
/// a bare `/sinyal` yields an empty symbol.
#[must_use]
pub fn parse_analysis(text: &str, config: &TriggerConfig) -> Option<String> {
    let rest = strip_command(text.trim(), &config.analysis_command, &config.bot_username)?;
    Some(rest.split_whitespace().next().unwrap_or("").to_string())
}

/// Match a leading command token, with or without the `@botname` suffix,
/// and return the remainder.
fn strip_command<'a>(text: &'a str, command: &str, bot_username: &str) -> Option<&'a str> {
    let token = text.split_whitespace().next()?;
    let qualified = format!("{command}{bot_username}");
    if token == command || token == qualified {
        Some(text[token.len()..].trim())
    } else {
        None
    }
}

fn is_reply_to_bot(msg: &InboundMessage, bot_username: &str) -> bool {
    let bare = bot_username.trim_start_matches('@');
    msg.reply_to_author.as_deref() == Some(bare)
}
