//! Echo bot handlers: `/start` greeting and verbatim echo of any other text.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{info, instrument};

/// Greeting sent in reply to `/start`.
pub const GREETING: &str =
    "Привет!\nЯ Самый лучший бот!\nОтправь мне любое сообщение, и я тебе отвечу.";

/// Replies to `/start` with [`GREETING`] and ends the chain; ignores everything else.
pub struct GreetingHandler {
    bot: Arc<dyn Bot>,
}

impl GreetingHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for GreetingHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some("start") {
            return Ok(HandlerResponse::Ignore);
        }
        self.bot.reply_to(message, GREETING).await?;
        info!(user_id = message.user.id, chat_id = message.chat.id, "Sent greeting");
        Ok(HandlerResponse::Reply(GREETING.to_string()))
    }
}

/// Sends the message text back to the same chat. Messages without text are ignored.
pub struct EchoHandler {
    bot: Arc<dyn Bot>,
}

impl EchoHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for EchoHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.content.is_empty() {
            return Ok(HandlerResponse::Ignore);
        }
        self.bot.send_message(&message.chat, &message.content).await?;
        info!(user_id = message.user.id, chat_id = message.chat.id, "Sent echo response");
        Ok(HandlerResponse::Reply(message.content.clone()))
    }
}
