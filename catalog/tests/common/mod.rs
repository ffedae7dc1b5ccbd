pub mod mock_bot;

use chrono::Utc;
use dbot_core::{CallbackEvent, Chat, Message, User};

pub const CHAT_ID: i64 = 456;

pub fn user(id: i64) -> User {
    User {
        id,
        username: Some("shopper".to_string()),
        first_name: Some("Shopper".to_string()),
        last_name: None,
    }
}

pub fn chat() -> Chat {
    Chat {
        id: CHAT_ID,
        chat_type: "private".to_string(),
    }
}

pub fn start_message(user_id: i64) -> Message {
    Message {
        id: "10".to_string(),
        user: user(user_id),
        chat: chat(),
        content: "/start".to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}

pub fn callback(user_id: i64, message_id: Option<&str>, data: &str) -> CallbackEvent {
    CallbackEvent {
        id: format!("cb-{}", data),
        user: user(user_id),
        chat: chat(),
        message_id: message_id.map(str::to_string),
        data: data.to_string(),
    }
}
