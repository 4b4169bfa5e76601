//! Auth DTOs for the scheduling service
//!
//! Request/response bodies for the login handshake and account
//! provisioning. Everything else lives under [`crate::models`].

use serde::{Deserialize, Serialize};

/// Account role as issued by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Staff,
}

impl Role {
    /// Whether this role may operate the admin desktop
    pub fn is_operator(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response with bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Authenticated user info returned at login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Account provisioning payload (staff and manager accounts share it)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreate {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Date of birth, ISO date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
}

pub(crate) fn default_true() -> bool {
    true
}
