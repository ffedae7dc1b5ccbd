//! Unit test module
//!
//! Handler unit tests live here, separate from source files.

mod echo_handler_test;

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, Message, Result, RichMessage, User};

pub(crate) fn sample_message(user_id: i64, content: &str) -> Message {
    Message {
        id: "msg-1".to_string(),
        user: User {
            id: user_id,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 123,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}

/// One outbound call seen by [`RecordingBot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Sent {
    Message { chat_id: i64, text: String },
    Reply { message_id: String, text: String },
}

/// Bot that records plain sends and replies; rich operations are not used by these handlers.
#[derive(Default)]
pub(crate) struct RecordingBot {
    pub sent: Mutex<Vec<Sent>>,
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Message {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Reply {
            message_id: message.id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_rich(&self, _chat: &Chat, _message: &RichMessage) -> Result<String> {
        Ok("1".to_string())
    }

    async fn edit_rich(&self, _chat: &Chat, _message_id: &str, _message: &RichMessage) -> Result<()> {
        Ok(())
    }

    async fn delete_message(&self, _chat: &Chat, _message_id: &str) -> Result<()> {
        Ok(())
    }

    async fn answer_callback(&self, _callback_id: &str, _text: Option<&str>) -> Result<()> {
        Ok(())
    }
}
