//! Offer models
//!
//! An offer ties a staff member to a placement and walks
//! pending -> accepted/rejected -> completed (or is cancelled).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::placement::Placement;

/// Offer lifecycle status.
///
/// Older service builds used a six-state vocabulary on the wire; the
/// aliases fold those into the semantic set so either generation of
/// the service parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    #[serde(alias = "offered", alias = "user_accepted")]
    Pending,
    #[serde(alias = "booking_confirmed")]
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
            OfferStatus::Completed => "completed",
            OfferStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for OfferStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff identity embedded in an offer when the service populates it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffIdentity {
    #[serde(default, rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
}

/// The `userId` field of an offer: a populated identity on listing
/// endpoints, a bare id string elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StaffRef {
    Populated(StaffIdentity),
    Id(String),
}

impl StaffRef {
    pub fn id(&self) -> &str {
        match self {
            StaffRef::Populated(s) => &s.id,
            StaffRef::Id(id) => id,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            StaffRef::Populated(s) => &s.username,
            StaffRef::Id(_) => "",
        }
    }

    pub fn full_name(&self) -> &str {
        match self {
            StaffRef::Populated(s) => &s.full_name,
            StaffRef::Id(_) => "",
        }
    }
}

/// Offer as returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub staff: StaffRef,
    #[serde(rename = "placementId")]
    pub placement: Placement,
    #[serde(default)]
    pub status: OfferStatus,
    #[serde(default)]
    pub cancel_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// By-staff listings arrive either bare or wrapped in `{"offers": [...]}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OfferListing {
    Bare(Vec<OfferRecord>),
    Wrapped { offers: Vec<OfferRecord> },
}

impl OfferListing {
    pub fn into_vec(self) -> Vec<OfferRecord> {
        match self {
            OfferListing::Bare(v) => v,
            OfferListing::Wrapped { offers } => offers,
        }
    }
}

/// Send-offer request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSendRequest {
    pub user_id: String,
    pub placement: Placement,
    pub force: bool,
}

/// Send-offer success reply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSendReply {
    pub offer_id: String,
}

/// Operator verdict on a pending offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferDecision {
    Approve,
    Reject,
}

/// Decision request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub decision: OfferDecision,
}

/// Cancel request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: String,
}

/// One row of the structured conflict payload: an existing booking
/// overlapping the placement being sent. Status is passed through raw
/// for operator display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictingBooking {
    #[serde(default)]
    pub offer_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

/// Body of a structured 409 ("code": "CONFLICT")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictNotice {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conflicts: Vec<ConflictingBooking>,
}
