//! Core types: user, chat, message, button callback, inline keyboard, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single inbound text message with user, chat and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub message_type: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Returns the bot command (e.g. `start` for `/start` or `/start@my_bot args`), if the content is one.
    pub fn command(&self) -> Option<&str> {
        let first = self.content.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Activation of an inline keyboard button.
///
/// `message_id` refers to the bot message carrying the keyboard; it is `None` when the transport
/// no longer exposes that message. `data` is the button tag echoed back verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackEvent {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub message_id: Option<String>,
    pub data: String,
}

/// One inline button: visible label plus the opaque tag delivered back on activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub tag: String,
}

impl Button {
    pub fn new(label: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: tag.into(),
        }
    }
}

/// Inline keyboard: rows of buttons, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    /// Appends a row and returns the keyboard (builder style).
    pub fn row(mut self, row: Vec<Button>) -> Self {
        self.rows.push(row);
        self
    }

    /// Iterates over every button, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

/// Outbound HTML message with an optional inline keyboard and optional photo.
///
/// When `photo` is set, `text` is sent as the photo caption. `photo` is a transport file reference
/// (Telegram file id or URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichMessage {
    pub text: String,
    pub keyboard: Option<Keyboard>,
    pub photo: Option<String>,
}

impl RichMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            photo: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn with_photo(mut self, photo: Option<String>) -> Self {
        self.photo = photo;
        self
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Converts a transport-specific button callback to core [`CallbackEvent`].
pub trait ToCoreCallback: Send + Sync {
    fn to_core(&self) -> CallbackEvent;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

/// Receives inline button activations. Implementations answer the callback themselves.
#[async_trait]
pub trait CallbackHandler: Send + Sync {
    async fn handle_callback(&self, event: &CallbackEvent) -> crate::error::Result<()>;
}
