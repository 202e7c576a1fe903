//! Proptest strategies for random test data

use proptest::prelude::*;

use domain_policy::{ClaimStatus, PolicyRecord, VehicleInfo};

use crate::builders::PolicyRecordBuilder;

/// Strategy for policy keys
pub fn policy_key_strategy() -> impl Strategy<Value = String> {
    "POL[0-9]{3,6}"
}

/// Strategy for holder names
pub fn holder_strategy() -> impl Strategy<Value = String> {
    "[A-ZÁÉÍÓÚ][a-zñáéíóú]{2,12} [A-ZÁÉÍÓÚ][a-zñáéíóú]{2,12}"
}

/// Strategy for vehicles
pub fn vehicle_strategy() -> impl Strategy<Value = VehicleInfo> {
    (
        "[A-Z][a-z]{2,10}",
        "[A-Z][a-z]{2,10}",
        1990u16..2030u16,
        "[A-Z]{3}[0-9]{3}",
    )
        .prop_map(|(make, model, year, plate)| VehicleInfo {
            make,
            model,
            year,
            plate,
        })
}

/// Strategy for claim statuses
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pendiente),
        Just(ClaimStatus::Aprobada),
        Just(ClaimStatus::Rechazada),
    ]
}

/// Strategy for whole policy records (active, no claims)
pub fn policy_record_strategy() -> impl Strategy<Value = PolicyRecord> {
    (
        policy_key_strategy(),
        holder_strategy(),
        vehicle_strategy(),
        0u64..10_000_000u64,
        0u64..1_000_000u64,
    )
        .prop_map(|(id, holder, vehicle, coverage, premium)| {
            PolicyRecordBuilder::new()
                .with_id(id)
                .with_holder(holder)
                .with_vehicle(vehicle)
                .with_coverage(coverage)
                .with_annual_premium(premium)
                .build()
        })
}
