//! Bot abstraction for sending, editing and deleting messages and answering button callbacks.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in dbot-telegram.

use crate::error::{DbotError, Result};
use crate::types::{Chat, Message, RichMessage};
use async_trait::async_trait;

/// Abstraction over the chat transport. Implementations map to a backend (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends an HTML message (photo with caption when `photo` is set) with its keyboard. Returns the new message id.
    async fn send_rich(&self, chat: &Chat, message: &RichMessage) -> Result<String>;
    /// Replaces text and keyboard of an already-sent message in place. `photo` is ignored.
    async fn edit_rich(&self, chat: &Chat, message_id: &str, message: &RichMessage) -> Result<()>;
    /// Deletes an already-sent message.
    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;
    /// Answers a button callback, optionally showing a short notice to the user.
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit and delete.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::InvalidMessageId(s.to_string()))
}
