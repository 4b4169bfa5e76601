//! Shared types for the Rota admin tools
//!
//! Wire models and auth DTOs used by the admin desktop client and any
//! other consumer of the scheduling service API.

pub mod client;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, Role, UserInfo};
pub use models::*;
