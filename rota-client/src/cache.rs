//! Wholesale-replace entity caches
//!
//! Each entity kind the desktop shows lives in one [`CacheSlot`]: the
//! authoritative local copy of the last successful fetch. Slots are
//! only ever replaced whole; mutations elsewhere trigger a reload, and
//! a failed reload keeps the stale rows (stale beats empty).

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::ClientResult;

/// One entity kind's authoritative local copy
#[derive(Debug)]
pub struct CacheSlot<T> {
    name: &'static str,
    items: RwLock<Vec<T>>,
}

impl<T: Clone> CacheSlot<T> {
    /// `name` only labels log lines
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            items: RwLock::new(Vec::new()),
        })
    }

    /// Clone out the current collection; empty before the first load
    pub async fn snapshot(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Swap in a whole new collection. Never a partial splice.
    pub async fn replace(&self, items: Vec<T>) {
        let mut guard = self.items.write().await;
        *guard = items;
    }

    /// Drive a fetch and replace the contents on success. On error the
    /// previous contents stay and the error propagates to the caller.
    pub async fn reload(
        &self,
        fetch: impl Future<Output = ClientResult<Vec<T>>>,
    ) -> ClientResult<usize> {
        match fetch.await {
            Ok(items) => {
                let count = items.len();
                self.replace(items).await;
                debug!(cache = self.name, rows = count, "cache reloaded");
                Ok(count)
            }
            Err(err) => {
                warn!(
                    cache = self.name,
                    kept = self.len().await,
                    error = %err,
                    "cache reload failed, keeping stale rows"
                );
                Err(err)
            }
        }
    }
}
