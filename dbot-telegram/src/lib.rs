//! # dbot-telegram
//!
//! Telegram bot framework layer: adapters, [`dbot_core::Bot`] implementation, minimal config, runners.
//! Handles only Telegram connectivity, handler-chain execution and callback routing; no catalog logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{to_inline_markup, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::{run_dispatcher, run_repl};
