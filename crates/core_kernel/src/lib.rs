//! Core Kernel - Foundational types for the policy ledger
//!
//! This crate provides the building blocks shared by the domain and
//! interface layers:
//! - Strongly-typed generated identifiers (claims, transactions)
//! - The caller-supplied policy key type
//! - Common error helpers

pub mod error;
pub mod identifiers;
pub mod keys;

pub use error::CoreError;
pub use identifiers::{ClaimId, TransactionId};
pub use keys::PolicyKey;
