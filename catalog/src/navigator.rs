//! Session navigator: the pagination state machine over one catalog position per user.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::{CatalogError, Lookup, Result};
use crate::product::Catalog;
use crate::session::SessionStore;
use crate::tag::CommandTag;

/// Navigation or terminal action requested by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move forward from the given current index.
    Advance(usize),
    /// Move back from the given current index.
    Retreat(usize),
    /// Go to the first product (home, `/start`).
    Reset,
    NoOp,
    Reserve(i64),
    Favorite(i64),
}

impl From<CommandTag> for Command {
    fn from(tag: CommandTag) -> Self {
        match tag {
            CommandTag::Prev(index) => Command::Retreat(index),
            CommandTag::Next(index) => Command::Advance(index),
            CommandTag::Buy(id) => Command::Reserve(id),
            CommandTag::Favorite(id) => Command::Favorite(id),
            CommandTag::MainMenu => Command::Reset,
            CommandTag::NoAction | CommandTag::PageInfo => Command::NoOp,
        }
    }
}

/// User-visible short notice shown as a callback answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    FirstItem,
    LastItem,
    Reserved(i64),
    Favorited(i64),
    UnknownCommand,
    Error,
}

impl Notice {
    pub fn text(&self) -> String {
        match self {
            Notice::FirstItem => "Это первый товар!".to_string(),
            Notice::LastItem => "Это последний товар!".to_string(),
            Notice::Reserved(id) => format!("Товар {} добавлен в корзину!", id),
            Notice::Favorited(id) => format!("Товар {} добавлен в избранное!", id),
            Notice::UnknownCommand => "Неизвестная команда".to_string(),
            Notice::Error => "Произошла ошибка, попробуйте снова".to_string(),
        }
    }

    /// Notice for an error that is recovered locally by answering the user.
    pub fn for_error(error: &CatalogError) -> Self {
        match error {
            CatalogError::UnknownCommand(_) => Notice::UnknownCommand,
            _ => Notice::Error,
        }
    }
}

/// What the transport should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Show the product at this index; once shown, the user's session points at it.
    Render(usize),
    /// Answer with a notice; position unchanged, no re-render.
    Notify(Notice),
    /// Answer silently.
    Ack,
}

/// Resolves commands against the catalog and records delivered positions in the session store.
#[derive(Clone)]
pub struct Navigator {
    catalog: Arc<Catalog>,
    sessions: Arc<dyn SessionStore>,
}

impl Navigator {
    pub fn new(catalog: Arc<Catalog>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { catalog, sessions }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Pure transition: no session access.
    ///
    /// Indexes carried by Advance/Retreat must be valid catalog indexes, otherwise `BadCommand`.
    /// Reserve/Favorite of an unknown product id yield `OutOfRange`.
    pub fn resolve(&self, command: Command) -> Result<Outcome> {
        let len = self.catalog.size();
        match command {
            Command::Advance(current) => {
                self.check_index(current)?;
                if current + 1 < len {
                    Ok(Outcome::Render(current + 1))
                } else {
                    Ok(Outcome::Notify(Notice::LastItem))
                }
            }
            Command::Retreat(current) => {
                self.check_index(current)?;
                if current >= 1 {
                    Ok(Outcome::Render(current - 1))
                } else {
                    Ok(Outcome::Notify(Notice::FirstItem))
                }
            }
            Command::Reset => Ok(Outcome::Render(0)),
            Command::NoOp => Ok(Outcome::Ack),
            Command::Reserve(id) => {
                let product = self.catalog.find(id)?;
                Ok(Outcome::Notify(Notice::Reserved(product.id)))
            }
            Command::Favorite(id) => {
                let product = self.catalog.find(id)?;
                Ok(Outcome::Notify(Notice::Favorited(product.id)))
            }
        }
    }

    /// Records a delivered outcome for `user_id`: a Render overwrites the session position,
    /// anything else leaves it untouched. Call only once the product is actually on screen.
    #[instrument(skip(self))]
    pub async fn record(&self, user_id: i64, outcome: Outcome) -> Result<()> {
        if let Outcome::Render(index) = outcome {
            self.sessions.set_position(user_id, index).await?;
            debug!(user_id, index, "Session position recorded");
        }
        Ok(())
    }

    /// Last rendered position of the user, if any.
    pub async fn position(&self, user_id: i64) -> Result<Option<usize>> {
        self.sessions.position(user_id).await
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.catalog.size();
        if index < len {
            Ok(())
        } else {
            Err(CatalogError::BadCommand(
                Lookup::Index { index, len }.to_string(),
            ))
        }
    }
}
