//! # dbot-core
//!
//! Core types and traits for the Telegram bots: [`Bot`], [`Handler`], message, callback, keyboard and user types,
//! and tracing initialization. Transport-agnostic; used by dbot-telegram, handler-chain, handlers and catalog.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Button, CallbackEvent, CallbackHandler, Chat, Handler, HandlerResponse, Keyboard, Message,
    RichMessage, ToCoreCallback, ToCoreMessage, ToCoreUser, User,
};
