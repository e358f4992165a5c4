//! Per-message dispatch: trigger → access → quota → memory →
//! augmentation → completion → commit.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::app::replies;
use crate::app::symbols::SymbolTable;
use crate::domain::message::{InboundMessage, OutboundReply};
use crate::domain::prompt::build_prompt;
use crate::domain::signal::{self, PriceSeries};
use crate::domain::trigger::{self, TriggerConfig, TriggerDecision};
use crate::error::{Error, SignalError};
use crate::port::llm::Llm;
use crate::port::market::MarketData;
use crate::service::access::AccessGate;
use crate::service::augment::AugmentationSelector;
use crate::service::quota::QuotaTracker;
use crate::service::session::SessionStore;

/// Provider timeouts applied at the dispatch boundary.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub completion: Duration,
    pub market: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            completion: Duration::from_secs(25),
            market: Duration::from_secs(10),
        }
    }
}

/// Composes the services into the per-message state machine.
///
/// Stateless across messages except through the session store and quota
/// tracker. Every failure is translated here into one fixed user-visible
/// reply; nothing provider-shaped leaks to chat.
pub struct Dispatcher {
    triggers: TriggerConfig,
    access: AccessGate,
    quota: QuotaTracker,
    sessions: SessionStore,
    augment: AugmentationSelector,
    llm: Arc<dyn Llm>,
    market: Arc<dyn MarketData>,
    symbols: SymbolTable,
    timeouts: Timeouts,
    window_days: u32,
}

impl Dispatcher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        triggers: TriggerConfig,
        access: AccessGate,
        quota: QuotaTracker,
        sessions: SessionStore,
        augment: AugmentationSelector,
        llm: Arc<dyn Llm>,
        market: Arc<dyn MarketData>,
        symbols: SymbolTable,
        timeouts: Timeouts,
        window_days: u32,
    ) -> Self {
        Self {
            triggers,
            access,
            quota,
            sessions,
            augment,
            llm,
            market,
            symbols,
            timeouts,
            window_days,
        }
    }

    /// Handle one inbound message. `None` means stay silent.
    pub async fn handle(&self, msg: &InboundMessage) -> Option<OutboundReply> {
        if let Some(symbol) = trigger::parse_analysis(&msg.text, &self.triggers) {
            return Some(self.handle_analysis(msg, &symbol).await);
        }

        let decision = trigger::classify(msg, &self.triggers);
        let question = match &decision {
            TriggerDecision::None => {
                return None;
            }
            other => other.question().unwrap_or("").trim().to_string(),
        };
        debug!(conversation = %msg.conversation, ?decision, "message triggered");

        if question.is_empty() {
            return Some(self.reply(msg, replies::EMPTY_QUESTION));
        }

        if !self.access.is_allowed(&msg.conversation, msg.kind) {
            info!(conversation = %msg.conversation, "group not on allow-list");
            return Some(self.reply(msg, replies::ACCESS_DENIED));
        }

        if self.quota.remaining(&msg.conversation) == 0 {
            info!(conversation = %msg.conversation, "quota exhausted");
            return Some(self.reply(msg, replies::QUOTA_EXCEEDED));
        }

        let augmentation = self.augment.augment(&question).await;
        let history = self.sessions.recent(&msg.conversation);
        let prompt = build_prompt(&history, &augmentation, &question);

        let answer = match tokio::time::timeout(
            self.timeouts.completion,
            self.llm.complete(&prompt),
        )
        .await
        {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                warn!(provider = self.llm.name(), error = %e, "completion failed");
                return Some(self.reply(msg, replies::COMPLETION_FAILED));
            }
            Err(_) => {
                warn!(provider = self.llm.name(), "completion timed out");
                return Some(self.reply(msg, replies::COMPLETION_FAILED));
            }
        };

        // Commit only after a fully formed reply: a failed completion must
        // never consume quota or pollute history.
        self.sessions.append(&msg.conversation, &question, &answer);
        if !self.quota.try_consume(&msg.conversation) {
            // Raced another dispatch for the same id onto the limit; the
            // answer already exists, so deliver it anyway.
            warn!(conversation = %msg.conversation, "quota hit limit during commit");
        }

        Some(self.reply(msg, &answer))
    }

    /// The `/sinyal <SYMBOL>` path: resolve, fetch, analyze, render.
    async fn handle_analysis(&self, msg: &InboundMessage, symbol: &str) -> OutboundReply {
        if !self.access.is_allowed(&msg.conversation, msg.kind) {
            return self.reply(msg, replies::ACCESS_DENIED);
        }
        if self.quota.remaining(&msg.conversation) == 0 {
            return self.reply(msg, replies::QUOTA_EXCEEDED);
        }

        if symbol.is_empty() {
            return self.reply(msg, replies::MISSING_SYMBOL);
        }
        let Some(asset_id) = self.symbols.resolve(symbol) else {
            debug!(symbol, "unknown analysis symbol");
            return self.reply(msg, replies::UNKNOWN_SYMBOL);
        };

        let series = match self.fetch_series(asset_id).await {
            Ok(series) => series,
            Err(e) => {
                warn!(asset_id, error = %e, "market data unavailable");
                return self.reply(msg, replies::DATA_UNAVAILABLE);
            }
        };

        let report = match signal::analyze(&series) {
            Ok(report) => report,
            Err(SignalError::InsufficientData { have, need }) => {
                warn!(asset_id, have, need, "series too short for analysis");
                return self.reply(msg, replies::INSUFFICIENT_DATA);
            }
            Err(SignalError::DataUnavailable) => {
                return self.reply(msg, replies::DATA_UNAVAILABLE);
            }
        };

        let text = replies::render_report(&symbol.to_uppercase(), &report);
        self.quota.try_consume(&msg.conversation);
        self.reply(msg, &text)
    }

    async fn fetch_series(&self, asset_id: &str) -> Result<PriceSeries, Error> {
        match tokio::time::timeout(
            self.timeouts.market,
            self.market.price_series(asset_id, self.window_days),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(SignalError::DataUnavailable.into()),
        }
    }

    fn reply(&self, msg: &InboundMessage, text: &str) -> OutboundReply {
        OutboundReply {
            conversation: msg.conversation.clone(),
            text: text.to_string(),
            in_reply_to: msg.message_id,
        }
    }
}
