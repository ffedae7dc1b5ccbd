//! Mock implementation of [`dbot_core::Bot`] for catalog tests.
//!
//! Records every outbound call on an unbounded channel so tests can assert on the exact
//! sequence of sends, edits, deletes and callback answers without hitting Telegram.
//! Edits, sends and callback answers can be switched to fail to exercise the error paths.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Chat, DbotError, Message, Result, RichMessage};
use tokio::sync::mpsc;

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Call {
    Text { chat_id: i64, text: String },
    Send { chat_id: i64, message_id: String, message: RichMessage },
    Edit { chat_id: i64, message_id: String, message: RichMessage },
    Delete { chat_id: i64, message_id: String },
    Answer { callback_id: String, text: Option<String> },
}

pub struct MockBot {
    next_id: AtomicI32,
    fail_edits: AtomicBool,
    fail_sends: AtomicBool,
    fail_answers: AtomicBool,
    answer_attempts: AtomicUsize,
    tx: mpsc::UnboundedSender<Call>,
}

#[allow(dead_code)]
impl MockBot {
    /// Creates a MockBot and returns the receiver for recorded calls. Sent message ids start at 100.
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<Call>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let bot = Arc::new(Self {
            next_id: AtomicI32::new(100),
            fail_edits: AtomicBool::new(false),
            fail_sends: AtomicBool::new(false),
            fail_answers: AtomicBool::new(false),
            answer_attempts: AtomicUsize::new(0),
            tx,
        });
        (bot, rx)
    }

    pub fn fail_edits(&self, fail: bool) {
        self.fail_edits.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn fail_answers(&self, fail: bool) {
        self.fail_answers.store(fail, Ordering::SeqCst);
    }

    /// Every `answer_callback` call, failed ones included.
    pub fn answer_attempts(&self) -> usize {
        self.answer_attempts.load(Ordering::SeqCst)
    }
}

/// Drains every call recorded so far.
#[allow(dead_code)]
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Call>) -> Vec<Call> {
    let mut calls = Vec::new();
    while let Ok(call) = rx.try_recv() {
        calls.push(call);
    }
    calls
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        let _ = self.tx.send(Call::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn send_rich(&self, chat: &Chat, message: &RichMessage) -> Result<String> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(DbotError::Bot("send rejected".to_string()));
        }
        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let _ = self.tx.send(Call::Send {
            chat_id: chat.id,
            message_id: message_id.clone(),
            message: message.clone(),
        });
        Ok(message_id)
    }

    async fn edit_rich(&self, chat: &Chat, message_id: &str, message: &RichMessage) -> Result<()> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(DbotError::Bot(
                "Bad Request: there is no text in the message to edit".to_string(),
            ));
        }
        let _ = self.tx.send(Call::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            message: message.clone(),
        });
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let _ = self.tx.send(Call::Delete {
            chat_id: chat.id,
            message_id: message_id.to_string(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        self.answer_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_answers.load(Ordering::SeqCst) {
            return Err(DbotError::Bot("Bad Request: query is too old".to_string()));
        }
        let _ = self.tx.send(Call::Answer {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
        });
        Ok(())
    }
}
