//! World-State Layer
//!
//! This crate abstracts the ordered key-value world state the platform
//! supplies to transaction logic. It follows the ports-and-adapters
//! pattern: the domain and interface layers speak to the [`WorldState`]
//! trait, never to a concrete backend.
//!
//! Two pieces live here:
//!
//! - The port itself ([`WorldState`], [`StateCursor`]) with an
//!   in-memory ordered implementation ([`MemoryLedger`]) for tests and
//!   for embedders without a platform binding.
//! - [`PolicyRepository`], the thin mapping of policy keys to encoded
//!   policy records, owning serialization and existence checks.
//!
//! Atomicity of a whole invocation is the platform's concern; this
//! layer only performs the individual get/put/scan calls.

pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

pub use error::StateError;
pub use memory::MemoryLedger;
pub use repository::{LedgerEntry, PolicyRepository, RecordValue};
pub use store::{RawCursor, StateCursor, StateEntry, WorldState};
