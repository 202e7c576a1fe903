//! Canned fixtures

use std::sync::Arc;

use core_kernel::PolicyKey;
use domain_policy::VehicleInfo;
use ledger_state::{MemoryLedger, PolicyRepository};

/// The vehicle used across fixtures
pub fn sample_vehicle() -> VehicleInfo {
    VehicleInfo {
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        year: 2023,
        plate: "ABC123".to_string(),
    }
}

/// The key `initLedger` seeds
pub fn seed_key() -> PolicyKey {
    PolicyKey::new("POL001").expect("static fixture key")
}

/// A fresh in-memory ledger with a repository over it
///
/// Returns both so tests can reach past the repository (for raw writes
/// and cursor accounting) while exercising it.
pub fn memory_repository() -> (Arc<MemoryLedger>, PolicyRepository) {
    let ledger = Arc::new(MemoryLedger::new());
    let repo = PolicyRepository::new(ledger.clone());
    (ledger, repo)
}
