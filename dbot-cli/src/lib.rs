//! # dbot-cli
//!
//! Argument parsing, config loading and bot assembly for the `dbot` binary.

pub mod app;
pub mod cli;

pub use app::{build_catalog, build_echo_chain, run_catalog, run_echo, session_store};
pub use cli::{load_config, Cli, Commands};
pub use dbot_telegram::TelegramConfig;
