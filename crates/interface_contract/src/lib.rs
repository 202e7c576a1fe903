//! Contract Interface
//!
//! This crate is the transaction surface of the policy ledger: the
//! [`PolicyContract`] operations, the invocation boundary that maps
//! named operations with string arguments onto them, and the error
//! taxonomy callers branch on.
//!
//! The platform hosting the contract supplies the world state and the
//! transaction envelope (commit, conflict detection, identity); this
//! crate only implements the deterministic read-modify-write logic
//! executed inside it.

pub mod contract;
pub mod dispatch;
pub mod error;
pub mod telemetry;

pub use contract::PolicyContract;
pub use dispatch::{invoke, transaction_class, TransactionClass};
pub use error::ContractError;
