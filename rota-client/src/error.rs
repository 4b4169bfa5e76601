//! Client error types

use shared::models::ConflictNotice;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the admin client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local pre-flight validation failure; nothing was sent
    #[error("validation error: {0}")]
    Validation(String),

    /// Login rejected by the service
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Structured scheduling conflict (409 with code "CONFLICT");
    /// recoverable through the operator's force/decline choice
    #[error("scheduling conflict: {}", .0.message)]
    Conflict(ConflictNotice),

    /// The configured deadline elapsed before the service answered
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Transport-level failure (connection refused, DNS, TLS, ...)
    #[error("network error: {0}")]
    Network(reqwest::Error),

    /// Auth-required call attempted without a logged-in session
    #[error("no active session")]
    NoSession,

    /// Non-success status with no structured meaning for the client
    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// 2xx body that failed to decode
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl ClientError {
    /// Map a transport error, peeling timeouts into their own variant
    /// so callers can tell a slow service from an unreachable one.
    pub(crate) fn transport(err: reqwest::Error, deadline: Duration) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(deadline)
        } else {
            ClientError::Network(err)
        }
    }

    /// Whether this is the recoverable scheduling conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Conflict(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
