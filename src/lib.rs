//! Tanyabot - quota-limited crypto group-chat assistant.
//!
//! A Telegram bot that answers crypto questions in Indonesian group chats.
//! Per inbound message it decides whether to respond at all, assembles a
//! bounded conversational context, optionally augments it with live web
//! results, and enforces a per-conversation usage ceiling. A separate
//! command produces deterministic technical-analysis signals from a daily
//! price series.
//!
//! # Architecture
//!
//! - [`domain`] - Pure types and logic: trigger classification, prompt
//!   assembly, the signal engine.
//! - [`port`] - Boundary traits for the LLM, web search, market data, and
//!   quota persistence.
//! - [`adapter`] - OpenAI, Serper, CoinGecko, flat-file storage, and the
//!   Telegram transport.
//! - [`service`] - Stateful services: access gate, quota tracker, session
//!   store, augmentation selector.
//! - [`app`] - The dispatcher composing everything per message.
//! - [`config`] - TOML configuration with env-sourced secrets.
//!
//! # Example
//!
//! ```no_run
//! use tanyabot::config::Config;
//! use tanyabot::service::SessionStore;
//! use std::time::Duration;
//!
//! let config = Config::load("config.toml").unwrap();
//! let sessions = SessionStore::new(
//!     config.limits.session_cap,
//!     Duration::from_secs(config.limits.session_ttl_secs),
//! );
//! let _sweeper = sessions.spawn_sweeper(
//!     Duration::from_secs(config.limits.sweep_interval_secs),
//! );
//! ```

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod service;
