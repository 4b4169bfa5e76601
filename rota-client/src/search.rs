//! Debounced text filtering
//!
//! Every searchable view pairs one cache slot with one haystack and
//! publishes its filtered rows through a watch channel. Keystrokes go
//! through the shared 250ms debounce; the query is read at fire time,
//! so a burst of edits costs one recompute with the final text.

use std::sync::Arc;
use tokio::sync::{RwLock, watch};

use shared::models::{OfferRecord, StaffRecord, VenueTemplate};

use crate::cache::CacheSlot;
use crate::debounce::{Debounce, SEARCH_DEBOUNCE};

/// Lowercased haystack an entity exposes to substring search
pub trait SearchText {
    fn search_text(&self) -> String;
}

impl SearchText for StaffRecord {
    fn search_text(&self) -> String {
        format!("{} {}", self.full_name, self.username).to_lowercase()
    }
}

impl SearchText for OfferRecord {
    fn search_text(&self) -> String {
        let p = &self.placement;
        format!(
            "{} {} {} {} {} {}",
            p.venue,
            p.day(),
            p.start_time,
            p.end_time,
            self.status,
            p.hourly_rate
        )
        .to_lowercase()
    }
}

impl SearchText for VenueTemplate {
    fn search_text(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Case-insensitive substring match with a pre-lowercased needle
pub(crate) fn matches(needle_lower: &str, hay: &impl SearchText) -> bool {
    hay.search_text().contains(needle_lower)
}

/// One searchable view over a cache slot
pub struct FilteredView<T> {
    cache: Arc<CacheSlot<T>>,
    query: Arc<RwLock<String>>,
    view: Arc<watch::Sender<Vec<T>>>,
    timer: Debounce,
}

impl<T> FilteredView<T>
where
    T: SearchText + Clone + Send + Sync + 'static,
{
    pub fn new(cache: Arc<CacheSlot<T>>) -> Self {
        let (view, _) = watch::channel(Vec::new());
        Self {
            cache,
            query: Arc::new(RwLock::new(String::new())),
            view: Arc::new(view),
            timer: Debounce::new(SEARCH_DEBOUNCE),
        }
    }

    /// Watch the published rows
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.view.subscribe()
    }

    /// The rows as last published
    pub fn current(&self) -> Vec<T> {
        self.view.borrow().clone()
    }

    /// Record a keystroke. An empty (or all-whitespace) query cancels
    /// any pending fire and publishes the full cache immediately;
    /// anything else restarts the debounce.
    pub async fn set_query(&self, raw: &str) {
        *self.query.write().await = raw.to_string();

        if raw.trim().is_empty() {
            self.timer.cancel().await;
            self.view.send_replace(self.cache.snapshot().await);
            return;
        }

        let cache = Arc::clone(&self.cache);
        let query = Arc::clone(&self.query);
        let view = Arc::clone(&self.view);
        self.timer
            .schedule(async move {
                publish(&cache, &query, &view).await;
            })
            .await;
    }

    /// Recompute now with the current query. Views call this after a
    /// cache reload so the published rows track the new contents.
    pub async fn refresh(&self) {
        publish(&self.cache, &self.query, &self.view).await;
    }
}

async fn publish<T>(
    cache: &CacheSlot<T>,
    query: &RwLock<String>,
    view: &watch::Sender<Vec<T>>,
) where
    T: SearchText + Clone,
{
    let needle = query.read().await.trim().to_lowercase();
    let rows = cache.snapshot().await;
    let filtered = if needle.is_empty() {
        rows
    } else {
        rows.into_iter().filter(|r| matches(&needle, r)).collect()
    };
    view.send_replace(filtered);
}
