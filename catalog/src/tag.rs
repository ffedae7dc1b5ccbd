//! Button command tags: the opaque strings carried by inline buttons and echoed back on activation.
//!
//! Wire forms: `prev_{index}`, `next_{index}`, `buy_{product_id}`, `favorite_{product_id}`,
//! `main_menu`, `no_action`, `page_info`.

use std::fmt;

use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandTag {
    /// Previous product; carries the index currently shown.
    Prev(usize),
    /// Next product; carries the index currently shown.
    Next(usize),
    /// Reserve ("add to cart") the product with this id.
    Buy(i64),
    /// Add the product with this id to favorites.
    Favorite(i64),
    MainMenu,
    /// Placeholder at a pagination boundary.
    NoAction,
    /// The `n/N` indicator button.
    PageInfo,
}

impl CommandTag {
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses a tag. An unknown kind yields `UnknownCommand`; a known kind with a missing or
    /// non-numeric parameter yields `BadCommand`.
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "main_menu" => return Ok(CommandTag::MainMenu),
            "no_action" => return Ok(CommandTag::NoAction),
            "page_info" => return Ok(CommandTag::PageInfo),
            _ => {}
        }

        let (kind, param) = tag.split_once('_').unwrap_or((tag, ""));
        let bad = || CatalogError::BadCommand(tag.to_string());

        match kind {
            "prev" => param.parse().map(CommandTag::Prev).map_err(|_| bad()),
            "next" => param.parse().map(CommandTag::Next).map_err(|_| bad()),
            "buy" => param.parse().map(CommandTag::Buy).map_err(|_| bad()),
            "favorite" => param.parse().map(CommandTag::Favorite).map_err(|_| bad()),
            _ => Err(CatalogError::UnknownCommand(tag.to_string())),
        }
    }
}

impl fmt::Display for CommandTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandTag::Prev(index) => write!(f, "prev_{}", index),
            CommandTag::Next(index) => write!(f, "next_{}", index),
            CommandTag::Buy(id) => write!(f, "buy_{}", id),
            CommandTag::Favorite(id) => write!(f, "favorite_{}", id),
            CommandTag::MainMenu => f.write_str("main_menu"),
            CommandTag::NoAction => f.write_str("no_action"),
            CommandTag::PageInfo => f.write_str("page_info"),
        }
    }
}
