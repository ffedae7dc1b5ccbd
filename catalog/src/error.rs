use std::fmt;

use dbot_core::DbotError;
use thiserror::Error;

/// What was looked up when a bound check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Index { index: usize, len: usize },
    ProductId(i64),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Index { index, len } => write!(f, "index {} (catalog size {})", index, len),
            Lookup::ProductId(id) => write!(f, "product id {}", id),
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Out of range: {0}")]
    OutOfRange(Lookup),

    #[error("Bad command tag: {0}")]
    BadCommand(String),

    #[error("Unknown command tag: {0}")]
    UnknownCommand(String),

    #[error("Render failed: {0}")]
    RenderFailed(String),

    #[error("Catalog is empty")]
    EmptyCatalog,

    #[error("Duplicate product id: {0}")]
    DuplicateProduct(i64),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Transport error: {0}")]
    Transport(#[from] DbotError),

    /// Answering the callback itself failed; the user must not be answered again.
    #[error("Callback answer failed: {0}")]
    AnswerFailed(DbotError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
