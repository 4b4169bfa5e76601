//! Staff directory models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::client::default_true;

/// Staff member as listed in the admin staff directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Date of birth, ISO date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    /// Suspended accounts cannot log in or receive offers
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Free-text availability note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Staff profile with career totals computed by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    #[serde(flatten)]
    pub staff: StaffRecord,
    /// Completed placements
    #[serde(default)]
    pub total_jobs_worked: u64,
    #[serde(default)]
    pub total_hours_worked: Decimal,
    #[serde(default)]
    pub total_earnings: Decimal,
}

/// Body for toggling account suspension
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffActiveUpdate {
    pub is_active: bool,
}

/// Headline counters for the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    #[serde(default)]
    pub staff_total: u64,
    #[serde(default)]
    pub offers_pending: u64,
    #[serde(default)]
    pub offers_accepted: u64,
    #[serde(default)]
    pub offers_completed: u64,
}
