//! Bot assembly: builds handler chains over an injected [`Bot`] and runs them on Telegram.
//! Builders take `Arc<dyn Bot>` so tests can drive the same chains with a mock transport.

use std::sync::Arc;

use anyhow::Result;
use catalog::{Catalog, CatalogHandler, InMemorySessionStore, Navigator, SessionStore};
use chrono::Local;
use dbot_core::{init_tracing, Bot};
use dbot_telegram::{run_dispatcher, run_repl, TelegramBotAdapter, TelegramConfig};
use handler_chain::HandlerChain;
use handlers::{EchoHandler, GreetingHandler, LoggingHandler};
use tracing::{info, instrument};

/// Logging, then `/start` greeting, then echo.
pub fn build_echo_chain(bot: Arc<dyn Bot>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(GreetingHandler::new(bot.clone())))
        .add_handler(Arc::new(EchoHandler::new(bot)))
}

/// Session store for the catalog: bounded when SESSION_MAX_ENTRIES is set.
pub fn session_store(config: &TelegramConfig) -> Arc<dyn SessionStore> {
    match config.session_max_entries {
        Some(max) => Arc::new(InMemorySessionStore::bounded(max)),
        None => Arc::new(InMemorySessionStore::new()),
    }
}

/// Chain for `/start` plus the callback handler for buttons; both share one [`CatalogHandler`].
pub fn build_catalog(
    bot: Arc<dyn Bot>,
    catalog: Catalog,
    sessions: Arc<dyn SessionStore>,
) -> (HandlerChain, Arc<CatalogHandler>) {
    let navigator = Navigator::new(Arc::new(catalog), sessions);
    let handler = Arc::new(CatalogHandler::new(bot, navigator));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(handler.clone());
    (chain, handler)
}

/// Validates config, initializes tracing and builds the teloxide Bot.
fn prepare(config: &TelegramConfig) -> Result<teloxide::Bot> {
    config.validate()?;
    init_tracing(&config.log_file)?;
    config.build_bot()
}

/// Runs the echo bot until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_echo(config: TelegramConfig) -> Result<()> {
    let bot = prepare(&config)?;
    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let chain = build_echo_chain(adapter);

    info!(
        start_time = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        log_file = %config.log_file,
        "Echo bot started"
    );
    run_repl(bot, chain).await
}

/// Runs the catalog bot over the built-in sample catalog until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_catalog(config: TelegramConfig) -> Result<()> {
    let bot = prepare(&config)?;
    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let catalog = Catalog::sample();
    let products = catalog.size();
    let (chain, callbacks) = build_catalog(adapter, catalog, session_store(&config));

    info!(
        start_time = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        log_file = %config.log_file,
        products,
        session_max_entries = ?config.session_max_entries,
        "Catalog bot started"
    );
    run_dispatcher(bot, chain, callbacks).await
}
