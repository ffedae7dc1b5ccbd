//! Minimal framework config: token, API URL, log path, session bound.
//! Loaded from env: BOT_TOKEN, TELEGRAM_API_URL (or TELOXIDE_API_URL), LOG_FILE, SESSION_MAX_ENTRIES.

use anyhow::{Context, Result};
use std::env;

const DEFAULT_LOG_FILE: &str = "logs/dbot.log";

/// Telegram bot config (Telegram access, logging, catalog session bound).
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: String,
    /// Maximum number of remembered catalog sessions; `None` keeps every user.
    pub session_max_entries: Option<usize>,
}

impl TelegramConfig {
    /// Loads from env. `token` overrides BOT_TOKEN; one of the two is required.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let session_max_entries = match env::var("SESSION_MAX_ENTRIES") {
            Ok(raw) => Some(
                raw.trim()
                    .parse()
                    .with_context(|| format!("SESSION_MAX_ENTRIES is not a number: {}", raw))?,
            ),
            Err(_) => None,
        };
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            session_max_entries,
        })
    }

    /// Loads from env with BOT_TOKEN required.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Uses the given token, defaults for everything else.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: DEFAULT_LOG_FILE.to_string(),
            session_max_entries: None,
        }
    }

    /// Checks the config before anything is started.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.session_max_entries == Some(0) {
            anyhow::bail!("SESSION_MAX_ENTRIES must be at least 1");
        }
        Ok(())
    }

    /// Builds the teloxide Bot, pointed at the custom API URL when one is configured.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url_str) => {
                let url = reqwest::Url::parse(url_str)
                    .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
