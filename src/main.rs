use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use teloxide::Bot;
use tracing::info;

use tanyabot::adapter::{telegram, CoinGecko, JsonQuotaStore, OpenAi, Serper};
use tanyabot::app::{Dispatcher, SymbolTable, Timeouts};
use tanyabot::config::Config;
use tanyabot::domain::trigger::TriggerConfig;
use tanyabot::service::{AccessGate, AugmentationSelector, QuotaTracker, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "tanyabot", about = "Telegram crypto group-chat assistant")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = Config::load(&args.config)
        .with_context(|| format!("loading config from {}", args.config))?;
    config.init_logging();
    info!("tanyabot starting");

    let bot_token =
        std::env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN is not set")?;
    let bot = Bot::new(bot_token);

    let llm = Arc::new(OpenAi::from_env(&config.llm).context("building LLM client")?);
    let search = Arc::new(Serper::from_env(&config.search).context("building search client")?);
    let market = Arc::new(CoinGecko::from_config(&config.market));

    let access = AccessGate::from_file(&config.storage.allowlist_path)
        .context("loading group allow-list")?;
    let quota_store = Arc::new(JsonQuotaStore::new(&config.storage.quota_path));
    let quota =
        QuotaTracker::load(quota_store, config.limits.quota_limit).context("loading quota state")?;

    let sessions = SessionStore::new(
        config.limits.session_cap,
        Duration::from_secs(config.limits.session_ttl_secs),
    );
    let _sweeper =
        sessions.spawn_sweeper(Duration::from_secs(config.limits.sweep_interval_secs));

    let augment = AugmentationSelector::new(
        search,
        config.search.keywords.clone(),
        config.search.max_results,
        Duration::from_secs(config.search.timeout_secs),
    );

    let triggers = TriggerConfig {
        bot_username: config.telegram.bot_username.clone(),
        ask_command: config.telegram.ask_command.clone(),
        analysis_command: config.telegram.analysis_command.clone(),
    };

    let dispatcher = Arc::new(Dispatcher::new(
        triggers,
        access,
        quota,
        sessions,
        augment,
        llm,
        market,
        SymbolTable::builtin(),
        Timeouts {
            completion: Duration::from_secs(config.llm.timeout_secs),
            market: Duration::from_secs(config.market.timeout_secs),
        },
        config.market.window_days,
    ));

    telegram::run(bot, dispatcher).await;

    info!("tanyabot stopped");
    Ok(())
}
