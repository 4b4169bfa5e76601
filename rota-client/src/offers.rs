//! Offer drafting and the pending-approvals desk

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

use shared::models::{OfferDecision, OfferRecord, Placement, PlacementPatch, worked_hours};

use crate::cache::CacheSlot;
use crate::error::{ClientError, ClientResult};
use crate::gateway::AdminGateway;

/// A placement offer as entered in the send form, fields still raw
#[derive(Debug, Clone, Default)]
pub struct OfferDraft {
    pub venue: String,
    pub role_title: String,
    /// "YYYY-MM-DD"
    pub date: String,
    /// "HH:MM"
    pub start_time: String,
    /// "HH:MM"
    pub end_time: String,
    /// As typed; empty means 0
    pub hourly_rate: String,
    pub address_line: String,
    pub notes: String,
}

impl OfferDraft {
    /// Check the draft and build the placement that goes on the wire.
    ///
    /// Hours are always recomputed from the times here, never taken
    /// from form state. Failures are local and nothing is sent.
    pub fn validate(&self) -> ClientResult<Placement> {
        let venue = self.venue.trim();
        let role_title = self.role_title.trim();
        let date = self.date.trim();
        let start = self.start_time.trim();
        let end = self.end_time.trim();

        if venue.is_empty() || role_title.is_empty() || date.is_empty() {
            return Err(ClientError::Validation(
                "venue, role and date are required".into(),
            ));
        }
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(ClientError::Validation(format!(
                "date must be YYYY-MM-DD, got {date:?}"
            )));
        }
        let Some(total_hours) = worked_hours(start, end) else {
            return Err(ClientError::Validation(
                "start and end times must be HH:MM".into(),
            ));
        };

        let rate = self.hourly_rate.trim();
        let hourly_rate = if rate.is_empty() {
            Decimal::ZERO
        } else {
            rate.parse::<Decimal>().map_err(|_| {
                ClientError::Validation(format!("hourly rate must be a number, got {rate:?}"))
            })?
        };
        if hourly_rate < Decimal::ZERO {
            return Err(ClientError::Validation(
                "hourly rate must not be negative".into(),
            ));
        }

        Ok(Placement {
            venue: venue.to_string(),
            role_title: role_title.to_string(),
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            hourly_rate,
            total_hours,
            address_line: none_if_empty(self.address_line.trim()),
            city: None,
            postcode: None,
            notes: none_if_empty(self.notes.trim()),
        })
    }
}

fn none_if_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Offers sitting at "pending" waiting for an approve/reject call
pub struct OfferDesk {
    gateway: Arc<dyn AdminGateway>,
    cache: Arc<CacheSlot<OfferRecord>>,
}

impl OfferDesk {
    pub fn new(gateway: Arc<dyn AdminGateway>) -> Self {
        Self {
            gateway,
            cache: CacheSlot::new("pending_offers"),
        }
    }

    /// Refetch the pending list, replacing it wholesale
    pub async fn reload(&self) -> ClientResult<usize> {
        self.cache
            .reload(self.gateway.fetch_pending_offers())
            .await
    }

    pub async fn pending(&self) -> Vec<OfferRecord> {
        self.cache.snapshot().await
    }

    /// Approve or reject one pending offer, then reload the list
    pub async fn decide(&self, offer_id: &str, decision: OfferDecision) -> ClientResult<()> {
        self.gateway.decide_offer(offer_id, decision).await?;
        info!(offer_id, ?decision, "offer decided");
        self.reload().await?;
        Ok(())
    }

    /// Edit a pending offer's placement before deciding on it
    pub async fn edit(&self, offer_id: &str, patch: &PlacementPatch) -> ClientResult<()> {
        let patch = patch.clone().with_recomputed_hours();
        self.gateway.edit_offer(offer_id, &patch).await?;
        info!(offer_id, "pending offer edited");
        self.reload().await?;
        Ok(())
    }
}
