//! Pure domain types and logic: messages, trigger classification, prompt
//! assembly, and the technical-analysis signal engine. Nothing in here
//! performs I/O.

pub mod message;
pub mod prompt;
pub mod signal;
pub mod trigger;

pub use message::{
    ChatMessage, ChatRole, ConversationId, ConversationKind, InboundMessage, OutboundReply,
};
pub use prompt::Augmentation;
pub use signal::{analyze, Momentum, PriceSample, PriceSeries, SignalReport, Trend};
pub use trigger::{classify, TriggerConfig, TriggerDecision};
