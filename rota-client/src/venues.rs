//! Saved venue templates
//!
//! Backs two surfaces: the venues page (searchable list plus CRUD) and
//! the venue quick-pick on the send-offer form, where a template match
//! autofills the address and note fields.

use std::sync::Arc;
use tracing::info;

use shared::models::{VenueCreate, VenueTemplate, VenueUpdate};

use crate::cache::CacheSlot;
use crate::error::{ClientError, ClientResult};
use crate::gateway::AdminGateway;
use crate::search::FilteredView;

/// Values a resolved template pushes into the offer form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueFill {
    pub venue: String,
    pub address: String,
    pub note: String,
}

/// Names containing the partial text, case-insensitive, in cache
/// order. An empty partial matches everything.
fn matching_names(venues: &[VenueTemplate], partial: &str) -> Vec<String> {
    let needle = partial.trim().to_lowercase();
    venues
        .iter()
        .filter(|v| v.name.to_lowercase().contains(&needle))
        .map(|v| v.name.clone())
        .collect()
}

/// First template whose name equals `name`, ignoring case and
/// surrounding whitespace
fn exact_match<'a>(venues: &'a [VenueTemplate], name: &str) -> Option<&'a VenueTemplate> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    venues.iter().find(|v| v.name.to_lowercase() == wanted)
}

pub struct VenueBook {
    gateway: Arc<dyn AdminGateway>,
    cache: Arc<CacheSlot<VenueTemplate>>,
    list: FilteredView<VenueTemplate>,
}

impl VenueBook {
    pub fn new(gateway: Arc<dyn AdminGateway>) -> Self {
        let cache = CacheSlot::new("venues");
        let list = FilteredView::new(Arc::clone(&cache));
        Self {
            gateway,
            cache,
            list,
        }
    }

    /// Debounce-searched page view over the templates
    pub fn list(&self) -> &FilteredView<VenueTemplate> {
        &self.list
    }

    pub async fn reload(&self) -> ClientResult<usize> {
        let count = self.cache.reload(self.gateway.list_venues()).await?;
        self.list.refresh().await;
        Ok(count)
    }

    // ========== Quick-pick ==========

    pub async fn suggestions(&self, partial: &str) -> Vec<String> {
        matching_names(&self.cache.snapshot().await, partial)
    }

    pub async fn resolve_exact(&self, name: &str) -> Option<VenueTemplate> {
        exact_match(&self.cache.snapshot().await, name).cloned()
    }

    /// Autofill for an explicitly picked suggestion. The picked name
    /// goes into the form verbatim.
    pub async fn pick_suggestion(&self, name: &str) -> Option<VenueFill> {
        let template = self.resolve_exact(name).await?;
        Some(VenueFill {
            venue: name.trim().to_string(),
            address: template.address,
            note: template.note,
        })
    }

    /// Autofill when the operator finishes the field with free text.
    /// Only an exact match fills anything; the field keeps free text
    /// otherwise, which stays allowed.
    pub async fn confirm_free_text(&self, text: &str) -> Option<VenueFill> {
        let template = self.resolve_exact(text).await?;
        Some(VenueFill {
            venue: template.name,
            address: template.address,
            note: template.note,
        })
    }

    // ========== CRUD ==========

    pub async fn create(&self, name: &str, address: &str, note: &str) -> ClientResult<()> {
        let venue = VenueCreate {
            name: required_name(name)?,
            address: address.trim().to_string(),
            note: note.trim().to_string(),
        };
        self.gateway.create_venue(&venue).await?;
        info!(name = %venue.name, "venue template saved");
        self.reload().await?;
        Ok(())
    }

    /// Full-record update; the page always submits every field
    pub async fn update(
        &self,
        venue_id: &str,
        name: &str,
        address: &str,
        note: &str,
    ) -> ClientResult<()> {
        let patch = VenueUpdate {
            name: Some(required_name(name)?),
            address: Some(address.trim().to_string()),
            note: Some(note.trim().to_string()),
        };
        self.gateway.update_venue(venue_id, &patch).await?;
        info!(venue_id, "venue template updated");
        self.reload().await?;
        Ok(())
    }

    pub async fn delete(&self, venue_id: &str) -> ClientResult<()> {
        self.gateway.delete_venue(venue_id).await?;
        info!(venue_id, "venue template deleted");
        self.reload().await?;
        Ok(())
    }
}

fn required_name(name: &str) -> ClientResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClientError::Validation("venue name is required".into()));
    }
    Ok(name.to_string())
}
