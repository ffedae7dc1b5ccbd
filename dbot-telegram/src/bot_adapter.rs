//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{
    parse_message_id, Bot as CoreBot, Chat, DbotError, Keyboard, Message, Result, RichMessage,
};
use teloxide::{
    prelude::*,
    types::{
        CallbackQueryId, ChatId, FileId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile,
        MessageId, ParseMode, ReplyParameters,
    },
};

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
/// Rich messages are sent with HTML parse mode.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

/// Converts a core keyboard into Telegram callback buttons, row for row.
pub fn to_inline_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.tag.clone()))
            .collect::<Vec<_>>()
    }))
}

/// A photo reference is either a URL or a Telegram file id.
fn photo_input(photo: &str) -> InputFile {
    match reqwest::Url::parse(photo) {
        Ok(url) => InputFile::url(url),
        Err(_) => InputFile::file_id(FileId(photo.to_string())),
    }
}

fn bot_error(e: teloxide::RequestError) -> DbotError {
    DbotError::Bot(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let id = parse_message_id(&message.id)?;
        self.bot
            .send_message(ChatId(message.chat.id), text.to_string())
            .reply_parameters(ReplyParameters::new(MessageId(id)))
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_rich(&self, chat: &Chat, message: &RichMessage) -> Result<String> {
        let chat_id = ChatId(chat.id);
        let sent = match &message.photo {
            Some(photo) => {
                let mut request = self
                    .bot
                    .send_photo(chat_id, photo_input(photo))
                    .caption(message.text.clone())
                    .parse_mode(ParseMode::Html);
                if let Some(keyboard) = &message.keyboard {
                    request = request.reply_markup(to_inline_markup(keyboard));
                }
                request.await
            }
            None => {
                let mut request = self
                    .bot
                    .send_message(chat_id, message.text.clone())
                    .parse_mode(ParseMode::Html);
                if let Some(keyboard) = &message.keyboard {
                    request = request.reply_markup(to_inline_markup(keyboard));
                }
                request.await
            }
        }
        .map_err(bot_error)?;
        Ok(sent.id.to_string())
    }

    async fn edit_rich(&self, chat: &Chat, message_id: &str, message: &RichMessage) -> Result<()> {
        let id = parse_message_id(message_id)?;
        let mut request = self
            .bot
            .edit_message_text(ChatId(chat.id), MessageId(id), message.text.clone())
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = &message.keyboard {
            request = request.reply_markup(to_inline_markup(keyboard));
        }
        request.await.map_err(bot_error)?;
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .delete_message(ChatId(chat.id), MessageId(id))
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        let mut request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()));
        if let Some(text) = text {
            request = request.text(text.to_string());
        }
        request.await.map_err(bot_error)?;
        Ok(())
    }
}
