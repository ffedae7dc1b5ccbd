//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dbot_telegram::TelegramConfig;

#[derive(Parser, Debug)]
#[command(name = "dbot")]
#[command(about = "Telegram Bot CLI: echo bot and catalog bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the echo bot (config from env; token can override BOT_TOKEN).
    Echo {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Run the paginated catalog bot (config from env; token can override BOT_TOKEN).
    Catalog {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Load TelegramConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<TelegramConfig> {
    TelegramConfig::load(token)
}
