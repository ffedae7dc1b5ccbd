//! Per-user session positions and per-user event serialization.
//!
//! [`SessionStore`] maps a user id to the last rendered catalog index. [`InMemorySessionStore`] keeps it
//! for the lifetime of the process; by default it never forgets a user, optionally it is bounded and
//! evicts the least recently rendered user. [`UserLocks`] hands out one async mutex per user.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;

use crate::error::Result;

/// Storage of the last displayed catalog index per user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored position, `None` if the user was never rendered to (or was evicted).
    async fn position(&self, user_id: i64) -> Result<Option<usize>>;
    /// Overwrites the user's position.
    async fn set_position(&self, user_id: i64, index: usize) -> Result<()>;
    /// Number of users with a stored position.
    async fn len(&self) -> Result<usize>;
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    index: usize,
    touched: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<i64, Entry>,
    clock: u64,
}

/// In-memory session store. Unbounded unless built with [`InMemorySessionStore::bounded`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    inner: Arc<RwLock<Inner>>,
    max_entries: Option<usize>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `max_entries` users (at least one); writing a new user into a full store evicts the
    /// least recently rendered one.
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            max_entries: Some(max_entries.max(1)),
        }
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn position(&self, user_id: i64) -> Result<Option<usize>> {
        let inner = self.inner.read().await;
        Ok(inner.entries.get(&user_id).map(|e| e.index))
    }

    async fn set_position(&self, user_id: i64, index: usize) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.clock += 1;
        let touched = inner.clock;

        if let Some(max) = self.max_entries {
            if !inner.entries.contains_key(&user_id) && inner.entries.len() >= max {
                let oldest = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, e)| e.touched)
                    .map(|(id, _)| *id);
                if let Some(evicted) = oldest {
                    inner.entries.remove(&evicted);
                    debug!(user_id = evicted, "Evicted least recently rendered session");
                }
            }
        }

        inner.entries.insert(user_id, Entry { index, touched });
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.inner.read().await.entries.len())
    }
}

/// Lock map size above which idle per-user locks are dropped on the next acquire.
const LOCK_PRUNE_THRESHOLD: usize = 1024;

/// One async mutex per user. Holding the guard serializes every event of that user.
#[derive(Debug, Clone, Default)]
pub struct UserLocks {
    locks: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and returns the user's guard.
    pub async fn lock(&self, user_id: i64) -> OwnedMutexGuard<()> {
        let user_lock = {
            let mut locks = self.locks.lock().await;
            if locks.len() > LOCK_PRUNE_THRESHOLD {
                locks.retain(|_, l| Arc::strong_count(l) > 1);
            }
            locks.entry(user_id).or_default().clone()
        };
        user_lock.lock_owned().await
    }
}
