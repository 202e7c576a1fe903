//! Test data builders
//!
//! Builder patterns for constructing test records with defaults, so a
//! test specifies only the fields relevant to its assertion.

use core_kernel::PolicyKey;
use domain_policy::{NewPolicy, PolicyRecord, VehicleInfo};

use crate::fixtures::sample_vehicle;

/// Builder for policy records
pub struct PolicyRecordBuilder {
    id: String,
    policy_type: String,
    holder: String,
    document: String,
    vehicle: VehicleInfo,
    coverage: u64,
    annual_premium: u64,
    start_date: String,
    end_date: String,
}

impl Default for PolicyRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyRecordBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            id: "POL100".to_string(),
            policy_type: "AUTOMOVIL".to_string(),
            holder: "Juan Pérez".to_string(),
            document: "12345678A".to_string(),
            vehicle: sample_vehicle(),
            coverage: 10_000,
            annual_premium: 300,
            start_date: "2025-01-01".to_string(),
            end_date: "2026-01-01".to_string(),
        }
    }

    /// Sets the policy id / world-state key
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the policy type
    pub fn with_policy_type(mut self, policy_type: impl Into<String>) -> Self {
        self.policy_type = policy_type.into();
        self
    }

    /// Sets the holder name
    pub fn with_holder(mut self, holder: impl Into<String>) -> Self {
        self.holder = holder.into();
        self
    }

    /// Sets the insured vehicle
    pub fn with_vehicle(mut self, vehicle: VehicleInfo) -> Self {
        self.vehicle = vehicle;
        self
    }

    /// Sets the coverage amount
    pub fn with_coverage(mut self, coverage: u64) -> Self {
        self.coverage = coverage;
        self
    }

    /// Sets the annual premium
    pub fn with_annual_premium(mut self, premium: u64) -> Self {
        self.annual_premium = premium;
        self
    }

    /// Sets the policy term
    pub fn with_term(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    /// Builds the constructor input without creating the record
    pub fn build_input(self) -> NewPolicy {
        NewPolicy {
            id: PolicyKey::new(self.id).expect("builder id must be non-empty"),
            policy_type: self.policy_type,
            holder: self.holder,
            document: self.document,
            vehicle: self.vehicle,
            coverage: self.coverage,
            annual_premium: self.annual_premium,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// Builds an active record with no claims
    pub fn build(self) -> PolicyRecord {
        PolicyRecord::new(self.build_input())
    }
}
