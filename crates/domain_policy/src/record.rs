//! The policy record aggregate
//!
//! `PolicyRecord` is the unit of storage: one JSON value per policy key
//! in the world state, claims embedded. The struct is the consistency
//! boundary for the claim lifecycle and for cancellation.
//!
//! # Invariants
//!
//! - `claims` is append-only; existing entries may only change status
//! - Claims may only be registered while `active` is true
//! - Cancellation is terminal; a cancelled record is immutable apart
//!   from the metadata written at the cancellation transition

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, PolicyKey};

use crate::claim::{ClaimRecord, ClaimStatus};
use crate::error::PolicyError;

/// The vehicle covered by a policy
///
/// A value object with no identity of its own; fully owned by its
/// `PolicyRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    #[serde(rename = "marca")]
    pub make: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "año")]
    pub year: u16,
    #[serde(rename = "placa")]
    pub plate: String,
}

/// One insured policy, keyed in the world state by its `id`
///
/// Field names on the wire keep the spelling of the stored JSON format,
/// so records written by earlier deployments decode unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Caller-supplied key, immutable after creation
    pub id: PolicyKey,
    /// Policy type, free-form (e.g. "AUTOMOVIL")
    #[serde(rename = "tipo")]
    pub policy_type: String,
    /// Holder name
    #[serde(rename = "titular")]
    pub holder: String,
    /// Holder identity document
    #[serde(rename = "documento")]
    pub document: String,
    /// Insured vehicle
    #[serde(rename = "vehiculo")]
    pub vehicle: VehicleInfo,
    /// Coverage amount
    #[serde(rename = "cobertura")]
    pub coverage: u64,
    /// Annual premium
    #[serde(rename = "primaAnual")]
    pub annual_premium: u64,
    /// Term start, passed through unparsed
    #[serde(rename = "fechaInicio")]
    pub start_date: String,
    /// Term end, passed through unparsed
    #[serde(rename = "fechaFin")]
    pub end_date: String,
    /// False once cancelled; the record's tombstone state
    #[serde(rename = "activa")]
    pub active: bool,
    /// Claims in filing order
    #[serde(rename = "reclamaciones", default)]
    pub claims: Vec<ClaimRecord>,
    /// Stamped at cancellation
    #[serde(
        rename = "fechaCancelacion",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub cancellation_date: Option<DateTime<Utc>>,
    /// Recorded at cancellation
    #[serde(
        rename = "motivoCancelacion",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub cancellation_reason: Option<String>,
}

/// Constructor input for a new policy record
///
/// Groups the caller-supplied fields so the signature stays readable at
/// the invocation boundary.
#[derive(Debug, Clone)]
pub struct NewPolicy {
    pub id: PolicyKey,
    pub policy_type: String,
    pub holder: String,
    pub document: String,
    pub vehicle: VehicleInfo,
    pub coverage: u64,
    pub annual_premium: u64,
    pub start_date: String,
    pub end_date: String,
}

impl PolicyRecord {
    /// Creates an active record with no claims
    pub fn new(input: NewPolicy) -> Self {
        Self {
            id: input.id,
            policy_type: input.policy_type,
            holder: input.holder,
            document: input.document,
            vehicle: input.vehicle,
            coverage: input.coverage,
            annual_premium: input.annual_premium,
            start_date: input.start_date,
            end_date: input.end_date,
            active: true,
            claims: Vec::new(),
            cancellation_date: None,
            cancellation_reason: None,
        }
    }

    /// Returns true while the policy has not been cancelled
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Files a new claim against the policy
    ///
    /// The claim starts in PENDIENTE status with a generated identifier.
    ///
    /// # Errors
    ///
    /// Returns `PolicyInactive` if the policy has been cancelled. The
    /// record is left untouched on error.
    pub fn register_claim(
        &mut self,
        description: impl Into<String>,
        amount: i64,
        date: impl Into<String>,
    ) -> Result<ClaimRecord, PolicyError> {
        if !self.active {
            return Err(PolicyError::PolicyInactive {
                id: self.id.to_string(),
            });
        }

        let claim = ClaimRecord::file(description, amount, date);
        self.claims.push(claim.clone());
        Ok(claim)
    }

    /// Overwrites the status of an existing claim
    ///
    /// An APROBADA transition also stamps the claim's approval date with
    /// `now`. Other claims on the policy are untouched.
    ///
    /// # Errors
    ///
    /// Returns `ClaimNotFound` if no claim with `claim_id` exists.
    pub fn update_claim_status(
        &mut self,
        claim_id: ClaimId,
        status: ClaimStatus,
        now: DateTime<Utc>,
    ) -> Result<ClaimRecord, PolicyError> {
        let policy_id = self.id.to_string();
        let claim = self
            .claims
            .iter_mut()
            .find(|claim| claim.id == claim_id)
            .ok_or(PolicyError::ClaimNotFound {
                policy_id,
                claim_id: claim_id.to_string(),
            })?;

        claim.set_status(status, now);
        Ok(claim.clone())
    }

    /// Cancels the policy
    ///
    /// Sets `active` to false and records the cancellation metadata.
    /// Cancellation is terminal: repeating it is rejected rather than
    /// silently overwriting the original metadata.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCancelled` if the policy is already inactive.
    pub fn cancel(
        &mut self,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), PolicyError> {
        if !self.active {
            return Err(PolicyError::AlreadyCancelled {
                id: self.id.to_string(),
            });
        }

        self.active = false;
        self.cancellation_date = Some(now);
        self.cancellation_reason = Some(reason.into());
        Ok(())
    }

    /// Looks up a claim by identifier
    pub fn find_claim(&self, claim_id: ClaimId) -> Option<&ClaimRecord> {
        self.claims.iter().find(|claim| claim.id == claim_id)
    }
}
