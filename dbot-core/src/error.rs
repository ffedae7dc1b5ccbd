//! Errors shared by the bot crates. Transport failures are [`DbotError::Bot`]; handler-level
//! failures that are not transport errors travel as [`HandlerError`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    /// The chat transport rejected or failed a request.
    #[error("Bot error: {0}")]
    Bot(String),

    /// A message id that the transport cannot address.
    #[error("Invalid message id: {0}")]
    InvalidMessageId(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    /// A handler could not complete because of its own state (e.g. a session or lookup failure).
    #[error("State error: {0}")]
    State(String),
}

pub type Result<T> = std::result::Result<T, DbotError>;
