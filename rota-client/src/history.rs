//! Schedule history view
//!
//! One staff member's offer history with the two-stage filter: a
//! Monday-aligned week window applied immediately, then the debounced
//! text match over whatever the window kept. Lifecycle actions on
//! history rows (edit/cancel/complete/delete) also live here; each
//! goes through the gateway and reloads rather than patching rows in
//! place.

use chrono::{Datelike, Days, Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::info;

use shared::models::{ConflictNotice, OfferRecord, Placement, PlacementPatch};

use crate::cache::CacheSlot;
use crate::debounce::{Debounce, SEARCH_DEBOUNCE};
use crate::error::{ClientError, ClientResult};
use crate::gateway::AdminGateway;
use crate::offers::OfferDraft;
use crate::search::matches;

/// Range stage of the history filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekWindow {
    #[default]
    All,
    ThisWeek,
    LastWeek,
}

impl WeekWindow {
    /// Monday-aligned half-open `[start, end)` bounds; `None` for All.
    /// Computed against `today` at filter time, never cached across
    /// days.
    pub fn bounds(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
        match self {
            WeekWindow::All => None,
            WeekWindow::ThisWeek => Some((monday, monday + Days::new(7))),
            WeekWindow::LastWeek => Some((monday - Days::new(7), monday)),
        }
    }
}

/// Whether a "YYYY-MM-DD" day falls inside half-open bounds. A day
/// that fails to parse never enters a bounded window.
fn in_window(day: &str, bounds: (NaiveDate, NaiveDate)) -> bool {
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(d) => bounds.0 <= d && d < bounds.1,
        Err(_) => false,
    }
}

/// Range stage then text stage, in that order
fn apply_stages(
    rows: Vec<OfferRecord>,
    window: WeekWindow,
    today: NaiveDate,
    needle_lower: &str,
) -> Vec<OfferRecord> {
    let ranged: Vec<OfferRecord> = match window.bounds(today) {
        None => rows,
        Some(b) => rows
            .into_iter()
            .filter(|o| in_window(o.placement.day(), b))
            .collect(),
    };

    if needle_lower.is_empty() {
        ranged
    } else {
        ranged
            .into_iter()
            .filter(|o| matches(needle_lower, o))
            .collect()
    }
}

/// Offer history for the staff member currently opened
pub struct HistoryDesk {
    gateway: Arc<dyn AdminGateway>,
    staff_id: RwLock<Option<String>>,
    cache: Arc<CacheSlot<OfferRecord>>,
    window: Arc<RwLock<WeekWindow>>,
    query: Arc<RwLock<String>>,
    view: Arc<watch::Sender<Vec<OfferRecord>>>,
    timer: Debounce,
}

impl HistoryDesk {
    pub fn new(gateway: Arc<dyn AdminGateway>) -> Self {
        let (view, _) = watch::channel(Vec::new());
        Self {
            gateway,
            staff_id: RwLock::new(None),
            cache: CacheSlot::new("history"),
            window: Arc::new(RwLock::new(WeekWindow::All)),
            query: Arc::new(RwLock::new(String::new())),
            view: Arc::new(view),
            timer: Debounce::new(SEARCH_DEBOUNCE),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<OfferRecord>> {
        self.view.subscribe()
    }

    pub fn current(&self) -> Vec<OfferRecord> {
        self.view.borrow().clone()
    }

    /// Load (or switch to) one staff member's history. Switching staff
    /// resets the window to All and clears the text query before
    /// anything recomputes.
    pub async fn open_staff(&self, staff_id: &str) -> ClientResult<usize> {
        *self.staff_id.write().await = Some(staff_id.to_string());
        *self.window.write().await = WeekWindow::All;
        *self.query.write().await = String::new();
        self.timer.cancel().await;
        let count = self
            .cache
            .reload(self.gateway.fetch_offers_by_staff(staff_id))
            .await?;
        self.publish_now().await;
        Ok(count)
    }

    /// Refetch the opened staff member's history
    pub async fn reload(&self) -> ClientResult<usize> {
        let Some(staff_id) = self.staff_id.read().await.clone() else {
            return Ok(0);
        };
        let count = self
            .cache
            .reload(self.gateway.fetch_offers_by_staff(&staff_id))
            .await?;
        self.publish_now().await;
        Ok(count)
    }

    /// Window changes apply immediately, reapplying the current text
    pub async fn set_window(&self, window: WeekWindow) {
        *self.window.write().await = window;
        self.publish_now().await;
    }

    /// Text changes ride the debounce; clearing publishes the ranged
    /// rows immediately and drops any pending fire
    pub async fn set_query(&self, raw: &str) {
        *self.query.write().await = raw.to_string();

        if raw.trim().is_empty() {
            self.timer.cancel().await;
            self.publish_now().await;
            return;
        }

        let cache = Arc::clone(&self.cache);
        let window = Arc::clone(&self.window);
        let query = Arc::clone(&self.query);
        let view = Arc::clone(&self.view);
        self.timer
            .schedule(async move {
                publish(&cache, &window, &query, &view).await;
            })
            .await;
    }

    async fn publish_now(&self) {
        publish(&self.cache, &self.window, &self.query, &self.view).await;
    }

    // ========== Offer submission ==========

    /// Validate the draft and send an offer to the opened staff member.
    ///
    /// A structured booking conflict is not an error here: it comes
    /// back as [`SubmitOutcome::Conflict`] carrying the choice the
    /// operator has to make. Everything else propagates.
    pub async fn submit_offer(&self, draft: &OfferDraft) -> ClientResult<SubmitOutcome<'_>> {
        let Some(staff_id) = self.staff_id.read().await.clone() else {
            return Err(ClientError::Validation("pick a staff member first".into()));
        };
        let placement = draft.validate()?;

        match self.gateway.send_offer(&staff_id, &placement, false).await {
            Ok(reply) => {
                info!(offer_id = %reply.offer_id, staff_id, "offer sent");
                self.reload().await?;
                Ok(SubmitOutcome::Sent {
                    offer_id: reply.offer_id,
                })
            }
            Err(ClientError::Conflict(notice)) => {
                info!(staff_id, conflicts = notice.conflicts.len(), "offer conflicts with existing booking");
                Ok(SubmitOutcome::Conflict(PendingConflict {
                    desk: self,
                    staff_id,
                    placement,
                    notice,
                }))
            }
            Err(err) => Err(err),
        }
    }

    // ========== Offer lifecycle ==========

    /// Edit a pending offer's placement. Hours ride along recomputed
    /// when the patch carries both times, like the send path.
    pub async fn edit_offer(&self, offer_id: &str, patch: &PlacementPatch) -> ClientResult<()> {
        let patch = patch.clone().with_recomputed_hours();
        self.gateway.edit_offer(offer_id, &patch).await?;
        info!(offer_id, "offer edited");
        self.reload().await?;
        Ok(())
    }

    pub async fn cancel_offer(&self, offer_id: &str, reason: &str) -> ClientResult<()> {
        self.gateway.cancel_offer(offer_id, reason).await?;
        info!(offer_id, "offer cancelled");
        self.reload().await?;
        Ok(())
    }

    pub async fn complete_offer(&self, offer_id: &str) -> ClientResult<()> {
        self.gateway.complete_offer(offer_id).await?;
        info!(offer_id, "offer marked completed");
        self.reload().await?;
        Ok(())
    }

    pub async fn delete_offer(&self, offer_id: &str) -> ClientResult<()> {
        self.gateway.delete_offer(offer_id).await?;
        info!(offer_id, "offer deleted");
        self.reload().await?;
        Ok(())
    }
}

/// How a submission ended, short of a plain error
#[derive(Debug)]
#[must_use]
pub enum SubmitOutcome<'a> {
    Sent { offer_id: String },
    Conflict(PendingConflict<'a>),
}

/// A submission the service bounced with a structured conflict,
/// waiting on the operator.
///
/// Both ways out consume the value, so an offer can be forced through
/// at most once and a declined draft cannot be resent.
pub struct PendingConflict<'a> {
    desk: &'a HistoryDesk,
    staff_id: String,
    placement: Placement,
    notice: ConflictNotice,
}

impl std::fmt::Debug for PendingConflict<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingConflict")
            .field("staff_id", &self.staff_id)
            .field("placement", &self.placement)
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}

impl PendingConflict<'_> {
    pub fn notice(&self) -> &ConflictNotice {
        &self.notice
    }

    /// Drop the draft. Not an error and nothing is sent or touched.
    pub fn decline(self) {
        info!(staff_id = %self.staff_id, "offer conflict declined");
    }

    /// Send the same placement once more with the override flag. A
    /// second conflict, or anything else, is a plain failure.
    pub async fn force(self) -> ClientResult<String> {
        let reply = self
            .desk
            .gateway
            .send_offer(&self.staff_id, &self.placement, true)
            .await?;
        info!(offer_id = %reply.offer_id, staff_id = %self.staff_id, "offer sent with override");
        self.desk.reload().await?;
        Ok(reply.offer_id)
    }
}

async fn publish(
    cache: &CacheSlot<OfferRecord>,
    window: &RwLock<WeekWindow>,
    query: &RwLock<String>,
    view: &watch::Sender<Vec<OfferRecord>>,
) {
    let needle = query.read().await.trim().to_lowercase();
    let window = *window.read().await;
    let today = Local::now().date_naive();
    let rows = apply_stages(cache.snapshot().await, window, today, &needle);
    view.send_replace(rows);
}
