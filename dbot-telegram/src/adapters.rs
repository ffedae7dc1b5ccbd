//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{
    CallbackEvent, Chat, Message, ToCoreCallback, ToCoreMessage, ToCoreUser, User,
};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    Chat {
        id: chat.id.0,
        chat_type: if chat.is_private() {
            "private".to_string()
        } else {
            format!("{:?}", chat.kind)
        },
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`]. Non-text messages get empty content.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: core_chat(&self.0.chat),
            content: self.0.text().unwrap_or("").to_string(),
            message_type: if self.0.text().is_some() {
                "text".to_string()
            } else {
                "other".to_string()
            },
            created_at: chrono::Utc::now(),
        }
    }
}

/// Wraps a teloxide CallbackQuery for conversion to core [`CallbackEvent`].
///
/// Queries from inline-mode messages carry no chat message; the chat then falls back to the
/// sender's private chat (same id as the user).
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreCallback for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> CallbackEvent {
        let user = TelegramUserWrapper(&self.0.from).to_core();
        let (chat, message_id) = match self.0.message.as_ref() {
            Some(message) => (core_chat(message.chat()), Some(message.id().to_string())),
            None => (
                Chat {
                    id: user.id,
                    chat_type: "private".to_string(),
                },
                None,
            ),
        };
        CallbackEvent {
            id: self.0.id.to_string(),
            user,
            chat,
            message_id,
            data: self.0.data.clone().unwrap_or_default(),
        }
    }
}
