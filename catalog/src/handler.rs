//! Catalog handler: drives navigator, renderer and transport for `/start` and button callbacks.
//!
//! Every event of a user runs under that user's lock. The session is written only after the product
//! reached the chat. Errors are typed up to [`CatalogHandler::process_callback`];
//! [`CatalogHandler::on_callback`] turns recoverable ones into a notice for the user.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{
    Bot, CallbackEvent, CallbackHandler, Chat, Handler, HandlerResponse, Message, RichMessage,
};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{CatalogError, Result};
use crate::navigator::{Command, Navigator, Notice, Outcome};
use crate::render::render;
use crate::session::UserLocks;
use crate::tag::CommandTag;

/// How a rendered product reached the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Existing message edited in place.
    Edited,
    /// New message sent; carries its id.
    Sent(String),
    /// Old message deleted and a new one sent (edit rejected, or the product has an image).
    Resent(String),
}

/// Result of one handled callback, for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackReport {
    pub outcome: Outcome,
    pub delivery: Option<Delivery>,
}

/// Paginated catalog over an injected [`Bot`].
pub struct CatalogHandler {
    bot: Arc<dyn Bot>,
    navigator: Navigator,
    locks: UserLocks,
}

impl CatalogHandler {
    pub fn new(bot: Arc<dyn Bot>, navigator: Navigator) -> Self {
        Self {
            bot,
            navigator,
            locks: UserLocks::new(),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// `/start`: sends the first product as a new message, then resets the user's session to it.
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn on_start(&self, message: &Message) -> Result<String> {
        let _guard = self.locks.lock(message.user.id).await;
        let outcome = self.navigator.resolve(Command::Reset)?;
        let index = match outcome {
            Outcome::Render(index) => index,
            other => {
                return Err(CatalogError::RenderFailed(format!(
                    "start resolved to {:?}",
                    other
                )))
            }
        };
        let message_id = self.send_product(&message.chat, index).await?;
        self.navigator.record(message.user.id, outcome).await?;
        info!(message_id = %message_id, "Catalog shown");
        Ok(message_id)
    }

    /// Handles a button activation end to end. Errors raised before the callback was answered are
    /// answered with a notice and logged. A failed answer is returned as is and never repeated.
    #[instrument(skip(self, event), fields(user_id = event.user.id, chat_id = event.chat.id, tag = %event.data))]
    pub async fn on_callback(&self, event: &CallbackEvent) -> Result<()> {
        match self.process_callback(event).await {
            Ok(report) => {
                info!(outcome = ?report.outcome, delivery = ?report.delivery, "Callback handled");
                Ok(())
            }
            Err(e @ CatalogError::AnswerFailed(_)) => {
                error!(error = %e, "Callback answer failed");
                Err(e)
            }
            Err(e) => {
                let notice = Notice::for_error(&e);
                warn!(error = %e, "Callback rejected");
                self.answer(&event.id, Some(&notice.text())).await
            }
        }
    }

    /// Handles a button activation and returns what happened. On success the product (if any) is on
    /// screen, the session points at it and the callback has been answered.
    pub async fn process_callback(&self, event: &CallbackEvent) -> Result<CallbackReport> {
        let _guard = self.locks.lock(event.user.id).await;

        let command = Command::from(CommandTag::parse(&event.data)?);
        let outcome = self.navigator.resolve(command)?;

        let delivery = match outcome {
            Outcome::Render(index) if command == Command::Reset => Some(
                self.replace_with_fresh(&event.chat, event.message_id.as_deref(), index)
                    .await?,
            ),
            Outcome::Render(index) => Some(
                self.show_in_place(&event.chat, event.message_id.as_deref(), index)
                    .await?,
            ),
            Outcome::Notify(_) | Outcome::Ack => None,
        };
        self.navigator.record(event.user.id, outcome).await?;

        let text = match outcome {
            Outcome::Notify(notice) => Some(notice.text()),
            Outcome::Render(_) | Outcome::Ack => None,
        };
        self.answer(&event.id, text.as_deref()).await?;

        Ok(CallbackReport { outcome, delivery })
    }

    async fn answer(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        self.bot
            .answer_callback(callback_id, text)
            .await
            .map_err(CatalogError::AnswerFailed)
    }

    fn payload(&self, index: usize) -> Result<RichMessage> {
        let catalog = self.navigator.catalog();
        let product = catalog.get(index)?;
        Ok(render(product, index, catalog.size())?.into())
    }

    async fn send_product(&self, chat: &Chat, index: usize) -> Result<String> {
        let payload = self.payload(index)?;
        Ok(self.bot.send_rich(chat, &payload).await?)
    }

    /// Edits the message in place; when the edit is rejected, falls back once to delete + send.
    /// A product with an image cannot be shown by a text edit, so it is always resent.
    async fn show_in_place(
        &self,
        chat: &Chat,
        message_id: Option<&str>,
        index: usize,
    ) -> Result<Delivery> {
        let Some(message_id) = message_id else {
            return Ok(Delivery::Sent(self.send_product(chat, index).await?));
        };

        let payload = self.payload(index)?;
        if payload.photo.is_some() {
            debug!(message_id, "Product has an image, resending");
            return self.resend(chat, message_id, &payload).await;
        }
        match self.bot.edit_rich(chat, message_id, &payload).await {
            Ok(()) => Ok(Delivery::Edited),
            Err(e) => {
                let failure = CatalogError::RenderFailed(e.to_string());
                warn!(error = %failure, message_id, "Edit rejected, resending");
                self.resend(chat, message_id, &payload).await
            }
        }
    }

    /// Deletes `message_id` (failure only logged) and sends `payload` as a new message.
    async fn resend(&self, chat: &Chat, message_id: &str, payload: &RichMessage) -> Result<Delivery> {
        if let Err(e) = self.bot.delete_message(chat, message_id).await {
            error!(error = %e, message_id, "Delete before resend failed");
        }
        let new_id = self.bot.send_rich(chat, payload).await?;
        Ok(Delivery::Resent(new_id))
    }

    /// Deletes the old message (if any) and sends the product as a new one.
    async fn replace_with_fresh(
        &self,
        chat: &Chat,
        message_id: Option<&str>,
        index: usize,
    ) -> Result<Delivery> {
        if let Some(message_id) = message_id {
            if let Err(e) = self.bot.delete_message(chat, message_id).await {
                warn!(error = %e, message_id, "Delete of old catalog message failed");
            }
        }
        Ok(Delivery::Sent(self.send_product(chat, index).await?))
    }
}

/// `/start` entry point for the handler chain; other messages pass through.
#[async_trait]
impl Handler for CatalogHandler {
    async fn handle(&self, message: &Message) -> dbot_core::Result<HandlerResponse> {
        if message.command() != Some("start") {
            return Ok(HandlerResponse::Ignore);
        }
        match self.on_start(message).await {
            Ok(_) => Ok(HandlerResponse::Stop),
            Err(CatalogError::Transport(e)) | Err(CatalogError::AnswerFailed(e)) => Err(e),
            Err(e) => Err(dbot_core::HandlerError::State(e.to_string()).into()),
        }
    }
}

/// Button callbacks from the transport runner.
#[async_trait]
impl CallbackHandler for CatalogHandler {
    async fn handle_callback(&self, event: &CallbackEvent) -> dbot_core::Result<()> {
        match self.on_callback(event).await {
            Ok(()) => Ok(()),
            Err(CatalogError::Transport(e)) | Err(CatalogError::AnswerFailed(e)) => Err(e),
            Err(e) => Err(dbot_core::HandlerError::State(e.to_string()).into()),
        }
    }
}
