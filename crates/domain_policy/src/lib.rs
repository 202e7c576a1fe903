//! Policy Domain
//!
//! This crate implements the policy record and its claim lifecycle:
//!
//! ```text
//! created (activa=true) -> claims registered -> claims approved/denied
//!                       -> cancelled (activa=false, terminal)
//! ```
//!
//! Records are never deleted; cancellation leaves an `activa = false`
//! tombstone with the cancellation metadata written at that transition.

pub mod claim;
pub mod error;
pub mod record;

pub use claim::{ClaimRecord, ClaimStatus};
pub use error::PolicyError;
pub use record::{NewPolicy, PolicyRecord, VehicleInfo};
