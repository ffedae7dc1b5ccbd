//! # catalog
//!
//! Paginated product catalog for the Telegram shop bot.
//!
//! - [`Catalog`]: fixed, read-only product list.
//! - [`Navigator`]: per-user position state machine (advance, retreat, reset, no-op, reserve, favorite).
//! - [`render`](render::render): product page as HTML text plus a 3-row inline keyboard.
//! - [`CatalogHandler`]: wires the above to a [`dbot_core::Bot`] for `/start` and button callbacks.

pub mod error;
pub mod handler;
pub mod navigator;
pub mod product;
pub mod render;
pub mod session;
pub mod tag;

pub use error::{CatalogError, Lookup, Result};
pub use handler::{CallbackReport, CatalogHandler, Delivery};
pub use navigator::{Command, Navigator, Notice, Outcome};
pub use product::{Catalog, Product};
pub use render::{parse_page_indicator, render, DisplayPayload};
pub use session::{InMemorySessionStore, SessionStore, UserLocks};
pub use tag::CommandTag;
