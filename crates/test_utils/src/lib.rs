//! Shared test utilities for the policy ledger test suite
//!
//! Builders with sensible defaults, canned fixtures, and proptest
//! strategies, so tests only spell out the fields they care about.

pub mod builders;
pub mod fixtures;
pub mod generators;

pub use builders::PolicyRecordBuilder;
pub use fixtures::{memory_repository, sample_vehicle, seed_key};
