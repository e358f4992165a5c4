#![allow(dead_code)]

//! Scripted fakes for exercising the dispatcher without real providers.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use tanyabot::app::{Dispatcher, SymbolTable, Timeouts};
use tanyabot::domain::message::{
    ChatMessage, ConversationKind, InboundMessage,
};
use tanyabot::domain::signal::{PriceSample, PriceSeries};
use tanyabot::domain::trigger::TriggerConfig;
use tanyabot::error::{Error, ProviderError, Result};
use tanyabot::port::search::SearchHit;
use tanyabot::port::{Llm, MarketData, QuotaStore, WebSearch};
use tanyabot::service::{AccessGate, AugmentationSelector, QuotaTracker, SessionStore};

pub const BOT: &str = "@askcoinvestasi_bot";

fn provider_failure() -> Error {
    Error::Provider(ProviderError::Status {
        provider: "scripted",
        status: 500,
    })
}

/// LLM fake that records every prompt and replays scripted outcomes.
/// Once the script runs dry it keeps answering with a fixed line.
#[derive(Default)]
pub struct ScriptedLlm {
    script: Mutex<VecDeque<Result<String>>>,
    pub prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedLlm {
    pub fn answering(answer: &str) -> Arc<Self> {
        let llm = Self::default();
        llm.push_ok(answer);
        Arc::new(llm)
    }

    pub fn failing() -> Arc<Self> {
        let llm = Self::default();
        llm.script.lock().push_back(Err(provider_failure()));
        Arc::new(llm)
    }

    pub fn push_ok(&self, answer: &str) {
        self.script.lock().push_back(Ok(answer.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn last_prompt(&self) -> Vec<ChatMessage> {
        self.prompts.lock().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Llm for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted-llm"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.prompts.lock().push(messages.to_vec());
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok("jawaban default".to_string()))
    }
}

/// Web search fake returning one fixed outcome.
pub struct ScriptedSearch {
    outcome: std::result::Result<Vec<SearchHit>, ()>,
    pub calls: Mutex<usize>,
}

impl ScriptedSearch {
    pub fn with_hits(hits: Vec<SearchHit>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(hits),
            calls: Mutex::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(()),
            calls: Mutex::new(0),
        })
    }
}

#[async_trait]
impl WebSearch for ScriptedSearch {
    fn name(&self) -> &'static str {
        "scripted-search"
    }

    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
        *self.calls.lock() += 1;
        match &self.outcome {
            Ok(hits) => Ok(hits.clone()),
            Err(()) => Err(provider_failure()),
        }
    }
}

/// Market data fake serving a canned series or a failure.
pub struct ScriptedMarket {
    outcome: std::result::Result<PriceSeries, ()>,
}

impl ScriptedMarket {
    pub fn with_series(series: PriceSeries) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(series),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { outcome: Err(()) })
    }
}

#[async_trait]
impl MarketData for ScriptedMarket {
    fn name(&self) -> &'static str {
        "scripted-market"
    }

    async fn price_series(&self, _asset_id: &str, _window_days: u32) -> Result<PriceSeries> {
        match &self.outcome {
            Ok(series) => Ok(series.clone()),
            Err(()) => Err(provider_failure()),
        }
    }
}

/// In-memory quota store exposing its last saved snapshot.
#[derive(Default)]
pub struct MemoryQuotaStore {
    pub initial: Mutex<HashMap<String, u32>>,
    pub saved: Mutex<Option<HashMap<String, u32>>>,
}

impl MemoryQuotaStore {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seeded(id: &str, count: u32) -> Arc<Self> {
        let store = Self::default();
        store.initial.lock().insert(id.to_string(), count);
        Arc::new(store)
    }

    pub fn saved_count(&self, id: &str) -> Option<u32> {
        self.saved.lock().as_ref().and_then(|m| m.get(id).copied())
    }
}

impl QuotaStore for MemoryQuotaStore {
    fn load(&self) -> Result<HashMap<String, u32>> {
        Ok(self.initial.lock().clone())
    }

    fn save(&self, counts: &HashMap<String, u32>) -> Result<()> {
        *self.saved.lock() = Some(counts.clone());
        Ok(())
    }
}

/// Everything a test needs to drive the dispatcher and observe state.
pub struct Harness {
    pub dispatcher: Dispatcher,
    pub llm: Arc<ScriptedLlm>,
    pub search: Arc<ScriptedSearch>,
    pub store: Arc<MemoryQuotaStore>,
    pub sessions: SessionStore,
}

pub struct HarnessBuilder {
    llm: Arc<ScriptedLlm>,
    search: Arc<ScriptedSearch>,
    market: Arc<ScriptedMarket>,
    store: Arc<MemoryQuotaStore>,
    allowed_groups: Vec<String>,
    quota_limit: u32,
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self {
            llm: ScriptedLlm::answering("jawaban santai"),
            search: ScriptedSearch::with_hits(vec![]),
            market: ScriptedMarket::failing(),
            store: MemoryQuotaStore::empty(),
            allowed_groups: vec!["G1".to_string()],
            quota_limit: 100,
        }
    }
}

impl HarnessBuilder {
    pub fn llm(mut self, llm: Arc<ScriptedLlm>) -> Self {
        self.llm = llm;
        self
    }

    pub fn search(mut self, search: Arc<ScriptedSearch>) -> Self {
        self.search = search;
        self
    }

    pub fn market(mut self, market: Arc<ScriptedMarket>) -> Self {
        self.market = market;
        self
    }

    pub fn store(mut self, store: Arc<MemoryQuotaStore>) -> Self {
        self.store = store;
        self
    }

    pub fn quota_limit(mut self, limit: u32) -> Self {
        self.quota_limit = limit;
        self
    }

    pub fn build(self) -> Harness {
        let triggers = TriggerConfig {
            bot_username: BOT.into(),
            ask_command: "/tanya".into(),
            analysis_command: "/sinyal".into(),
        };
        let access = AccessGate::new(self.allowed_groups.clone());
        let quota = QuotaTracker::load(self.store.clone(), self.quota_limit).unwrap();
        let sessions = SessionStore::new(10, Duration::from_secs(300));
        let augment = AugmentationSelector::new(
            self.search.clone(),
            vec!["harga".into(), "hari ini".into(), "today".into()],
            3,
            Duration::from_secs(5),
        );
        let dispatcher = Dispatcher::new(
            triggers,
            access,
            quota,
            sessions.clone(),
            augment,
            self.llm.clone(),
            self.market.clone(),
            SymbolTable::builtin(),
            Timeouts::default(),
            30,
        );
        Harness {
            dispatcher,
            llm: self.llm,
            search: self.search,
            store: self.store,
            sessions,
        }
    }
}

pub fn harness() -> HarnessBuilder {
    HarnessBuilder::default()
}

/// A group message from the allow-listed conversation `G1`.
pub fn group_msg(conversation: &str, text: &str) -> InboundMessage {
    InboundMessage {
        conversation: conversation.into(),
        kind: ConversationKind::Group,
        text: text.into(),
        message_id: 42,
        sender_username: Some("budi".into()),
        reply_to_text: None,
        reply_to_author: None,
    }
}

pub fn private_msg(text: &str) -> InboundMessage {
    InboundMessage {
        conversation: "P1".into(),
        kind: ConversationKind::Private,
        text: text.into(),
        message_id: 7,
        sender_username: Some("budi".into()),
        reply_to_text: None,
        reply_to_author: None,
    }
}

/// A 30-day rising series with flat volume.
pub fn rising_series() -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let samples = (0..30)
        .map(|i| PriceSample {
            timestamp: start + chrono::Duration::days(i),
            close: 100.0 + i as f64,
            volume: 1_000.0,
        })
        .collect();
    PriceSeries::new(samples)
}

/// A series too short for the longest rolling window.
pub fn short_series() -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let samples = (0..10)
        .map(|i| PriceSample {
            timestamp: start + chrono::Duration::days(i),
            close: 100.0,
            volume: 1_000.0,
        })
        .collect();
    PriceSeries::new(samples)
}
