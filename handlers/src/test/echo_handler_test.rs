//! Unit tests for GreetingHandler and EchoHandler, alone and wired into a HandlerChain.

use std::sync::Arc;

use super::{sample_message, RecordingBot, Sent};
use crate::{EchoHandler, GreetingHandler, LoggingHandler, GREETING};
use dbot_core::{Handler, HandlerResponse};
use handler_chain::HandlerChain;

fn echo_chain(bot: Arc<RecordingBot>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(GreetingHandler::new(bot.clone())))
        .add_handler(Arc::new(EchoHandler::new(bot)))
}

#[tokio::test]
async fn test_greeting_replies_to_start() {
    let bot = Arc::new(RecordingBot::default());
    let h = GreetingHandler::new(bot.clone());

    let response = h.handle(&sample_message(1, "/start")).await.unwrap();

    assert_eq!(response, HandlerResponse::Reply(GREETING.to_string()));
    assert_eq!(
        *bot.sent.lock().unwrap(),
        vec![Sent::Reply {
            message_id: "msg-1".to_string(),
            text: GREETING.to_string(),
        }]
    );
}

#[tokio::test]
async fn test_greeting_ignores_other_text() {
    let bot = Arc::new(RecordingBot::default());
    let h = GreetingHandler::new(bot.clone());

    let response = h.handle(&sample_message(1, "start")).await.unwrap();

    assert_eq!(response, HandlerResponse::Ignore);
    assert!(bot.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_echo_sends_text_back_verbatim() {
    let bot = Arc::new(RecordingBot::default());
    let h = EchoHandler::new(bot.clone());

    let response = h.handle(&sample_message(1, "Как дела?")).await.unwrap();

    assert_eq!(response, HandlerResponse::Reply("Как дела?".to_string()));
    assert_eq!(
        *bot.sent.lock().unwrap(),
        vec![Sent::Message {
            chat_id: 123,
            text: "Как дела?".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_echo_ignores_empty_content() {
    let bot = Arc::new(RecordingBot::default());
    let h = EchoHandler::new(bot.clone());

    assert_eq!(h.handle(&sample_message(1, "")).await.unwrap(), HandlerResponse::Ignore);
    assert!(bot.sent.lock().unwrap().is_empty());
}

/// In the chain, `/start` gets only the greeting: the echo handler never runs.
#[tokio::test]
async fn test_chain_start_is_not_echoed() {
    let bot = Arc::new(RecordingBot::default());
    let chain = echo_chain(bot.clone());

    chain.handle(&sample_message(1, "/start")).await.unwrap();

    let sent = bot.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(matches!(&sent[0], Sent::Reply { text, .. } if text == GREETING));
}

#[tokio::test]
async fn test_chain_echoes_plain_text() {
    let bot = Arc::new(RecordingBot::default());
    let chain = echo_chain(bot.clone());

    let result = chain.handle(&sample_message(1, "hello")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("hello".to_string()));
    assert_eq!(bot.sent.lock().unwrap().len(), 1);
}
