//! Rota Client - admin client for the rota scheduling service
//!
//! Typed gateway over the scheduling HTTP API, plus the state the
//! admin desktop works from: debounce-searched list views, the offer
//! send flow with conflict override, week-windowed schedule history,
//! venue quick-pick and the payroll drilldown.

pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod export;
pub mod gateway;
pub mod history;
pub mod offers;
pub mod payroll;
pub mod search;
pub mod session;
pub mod staff;
pub mod venues;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use gateway::{AdminGateway, HttpGateway};
pub use session::Session;

// Desks, one per admin surface
pub use history::{HistoryDesk, PendingConflict, SubmitOutcome, WeekWindow};
pub use offers::{OfferDesk, OfferDraft};
pub use payroll::{PayrollDesk, PayrollMismatch, StaffPayView};
pub use staff::{AccountDraft, StaffDesk};
pub use venues::{VenueBook, VenueFill};

// View plumbing
pub use cache::CacheSlot;
pub use debounce::{Debounce, SEARCH_DEBOUNCE};
pub use search::FilteredView;

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, Role, UserInfo};
pub use shared::models::{ConflictNotice, OfferDecision, OfferRecord, StaffRecord};
