//! Assembled bots driven end to end over a recording transport.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catalog::{Catalog, InMemorySessionStore, SessionStore};
use chrono::Utc;
use dbot_cli::{build_catalog, build_echo_chain, session_store, TelegramConfig};
use dbot_core::{
    Bot, CallbackEvent, CallbackHandler, Chat, HandlerResponse, Message,
    Result, RichMessage, User,
};
use handlers::GREETING;

#[derive(Default)]
struct RecordingBot {
    calls: Mutex<Vec<String>>,
}

impl RecordingBot {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.push(format!("send {} {}", chat.id, text));
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.push(format!("reply {} {}", message.id, text));
        Ok(())
    }

    async fn send_rich(&self, chat: &Chat, message: &RichMessage) -> Result<String> {
        self.push(format!("rich {} {}", chat.id, message.text));
        Ok("500".to_string())
    }

    async fn edit_rich(&self, _chat: &Chat, message_id: &str, message: &RichMessage) -> Result<()> {
        self.push(format!("edit {} {}", message_id, message.text));
        Ok(())
    }

    async fn delete_message(&self, _chat: &Chat, message_id: &str) -> Result<()> {
        self.push(format!("delete {}", message_id));
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        self.push(format!("answer {} {}", callback_id, text.unwrap_or("-")));
        Ok(())
    }
}

fn message(content: &str) -> Message {
    Message {
        id: "7".to_string(),
        user: User {
            id: 42,
            username: Some("tester".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 99,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}

fn callback(data: &str) -> CallbackEvent {
    let msg = message("");
    CallbackEvent {
        id: format!("cb-{}", data),
        user: msg.user,
        chat: msg.chat,
        message_id: Some("500".to_string()),
        data: data.to_string(),
    }
}

#[tokio::test]
async fn test_echo_chain_greets_on_start() {
    let bot = Arc::new(RecordingBot::default());
    let chain = build_echo_chain(bot.clone());
    // Logging, greeting, echo: the only place an incoming message is logged is LoggingHandler.
    assert_eq!(chain.len(), 3);

    let response = chain.handle(&message("/start")).await.unwrap();

    assert_eq!(response, HandlerResponse::Reply(GREETING.to_string()));
    assert_eq!(bot.calls(), vec![format!("reply 7 {}", GREETING)]);
}

#[tokio::test]
async fn test_echo_chain_echoes_text() {
    let bot = Arc::new(RecordingBot::default());
    let chain = build_echo_chain(bot.clone());

    chain.handle(&message("hello")).await.unwrap();
    chain.handle(&message("")).await.unwrap();

    assert_eq!(bot.calls(), vec!["send 99 hello".to_string()]);
}

#[tokio::test]
async fn test_catalog_start_then_next() {
    let bot = Arc::new(RecordingBot::default());
    let (chain, callbacks) = build_catalog(
        bot.clone(),
        Catalog::sample(),
        Arc::new(InMemorySessionStore::new()),
    );

    assert_eq!(chain.len(), 2);

    let response = chain.handle(&message("/start")).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);

    callbacks.handle_callback(&callback("next_0")).await.unwrap();

    let calls = bot.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].starts_with("rich 99 "));
    assert!(calls[0].contains("Товар 1"));
    assert!(calls[1].starts_with("edit 500 "));
    assert!(calls[1].contains("Товар 2"));
    assert_eq!(calls[2], "answer cb-next_0 -");
}

#[tokio::test]
async fn test_catalog_ignores_plain_text() {
    let bot = Arc::new(RecordingBot::default());
    let (chain, _) = build_catalog(
        bot.clone(),
        Catalog::sample(),
        Arc::new(InMemorySessionStore::new()),
    );

    let response = chain.handle(&message("hello")).await.unwrap();

    assert_eq!(response, HandlerResponse::Continue);
    assert!(bot.calls().is_empty());
}

#[tokio::test]
async fn test_session_store_follows_config() {
    let mut config = TelegramConfig::with_token("t".to_string());
    let unbounded = session_store(&config);
    for user_id in 0..5 {
        unbounded.set_position(user_id, 0).await.unwrap();
    }
    assert_eq!(unbounded.len().await.unwrap(), 5);

    config.session_max_entries = Some(2);
    let bounded = session_store(&config);
    for user_id in 0..5 {
        bounded.set_position(user_id, 0).await.unwrap();
    }
    assert_eq!(bounded.len().await.unwrap(), 2);
    assert_eq!(bounded.position(4).await.unwrap(), Some(0));
    assert_eq!(bounded.position(0).await.unwrap(), None);
}
