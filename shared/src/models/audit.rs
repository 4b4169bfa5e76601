//! Audit log models

use serde::{Deserialize, Serialize};

use super::offer::StaffRef;

/// One audit trail entry. `meta` is whatever context the action
/// recorded, passed through opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    #[serde(rename = "_id")]
    pub id: String,
    /// Populated with the actor's username when available
    #[serde(default, rename = "actorId", skip_serializing_if = "Option::is_none")]
    pub actor: Option<StaffRef>,
    pub action: String,
    #[serde(default)]
    pub target_type: String,
    #[serde(default)]
    pub target_id: String,
    #[serde(default)]
    pub meta: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
