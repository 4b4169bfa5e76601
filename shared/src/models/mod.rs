//! Data models
//!
//! Wire records exchanged with the scheduling service. Field names are
//! camelCase on the wire; record ids arrive as `_id`.

pub mod audit;
pub mod offer;
pub mod payroll;
pub mod placement;
pub mod staff;
pub mod venue;

// Re-exports
pub use audit::*;
pub use offer::*;
pub use payroll::*;
pub use placement::*;
pub use staff::*;
pub use venue::*;
