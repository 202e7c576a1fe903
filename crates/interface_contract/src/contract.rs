//! The policy contract
//!
//! Implements the contract operations as read-modify-write logic
//! against the world state, with all validation performed before any
//! write. The store handle is injected at construction; there is no
//! ambient ledger reference.

use std::sync::Arc;

use chrono::Utc;

use core_kernel::{ClaimId, PolicyKey};
use domain_policy::{ClaimRecord, ClaimStatus, NewPolicy, PolicyRecord, VehicleInfo};
use ledger_state::{LedgerEntry, PolicyRepository, StateError, WorldState};

use crate::error::ContractError;

/// The contract over policy records and their claims
///
/// One instance serves any number of invocations; all persistent state
/// lives in the injected world state.
#[derive(Clone)]
pub struct PolicyContract {
    repo: PolicyRepository,
}

impl PolicyContract {
    /// Creates the contract over a world-state handle
    pub fn new(store: Arc<dyn WorldState>) -> Self {
        Self {
            repo: PolicyRepository::new(store),
        }
    }

    /// Creates the contract over an existing repository
    pub fn from_repository(repo: PolicyRepository) -> Self {
        Self { repo }
    }

    /// Seeds the ledger with the fixed example records
    pub async fn init_ledger(&self) -> Result<(), ContractError> {
        for record in seed_policies() {
            self.repo.put(&record).await?;
            tracing::info!(policy = %record.id, "seed policy written");
        }
        Ok(())
    }

    /// Creates a new policy record
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if a record is stored under the key. Nothing is
    /// written on failure.
    pub async fn create_policy(&self, input: NewPolicy) -> Result<PolicyRecord, ContractError> {
        if self.repo.exists(&input.id).await? {
            return Err(ContractError::already_exists(input.id.as_str()));
        }

        let record = PolicyRecord::new(input);
        self.repo.put(&record).await?;
        tracing::info!(policy = %record.id, "policy created");
        Ok(record)
    }

    /// Returns true iff a policy is stored under the key
    pub async fn policy_exists(&self, id: &PolicyKey) -> Result<bool, ContractError> {
        let exists = self.repo.exists(id).await?;
        tracing::debug!(policy = %id, exists, "existence check");
        Ok(exists)
    }

    /// Loads the policy stored under the key
    ///
    /// # Errors
    ///
    /// `NotFound` if absent.
    pub async fn get_policy(&self, id: &PolicyKey) -> Result<PolicyRecord, ContractError> {
        self.fetch(id).await
    }

    /// Enumerates every entry in the world state
    ///
    /// Entries that are not policy records come back as raw values; see
    /// [`ledger_state::RecordValue`].
    pub async fn get_all_policies(&self) -> Result<Vec<LedgerEntry>, ContractError> {
        Ok(self.repo.scan_all().await?)
    }

    /// Files a claim against an active policy
    ///
    /// # Errors
    ///
    /// `NotFound` if the policy is absent; `InvalidState` if it has
    /// been cancelled. The stored record is untouched on failure.
    pub async fn register_claim(
        &self,
        id: &PolicyKey,
        description: &str,
        amount: i64,
        date: &str,
    ) -> Result<ClaimRecord, ContractError> {
        let mut record = self.fetch(id).await?;
        let claim = record.register_claim(description, amount, date)?;
        self.repo.put(&record).await?;
        tracing::info!(policy = %id, claim = %claim.id, "claim registered");
        Ok(claim)
    }

    /// Overwrites the status of an existing claim
    ///
    /// An APROBADA transition stamps the claim's approval date.
    ///
    /// # Errors
    ///
    /// `NotFound` if the policy or the claim is absent.
    pub async fn update_claim_status(
        &self,
        id: &PolicyKey,
        claim_id: ClaimId,
        status: ClaimStatus,
    ) -> Result<ClaimRecord, ContractError> {
        let mut record = self.fetch(id).await?;
        let claim = record.update_claim_status(claim_id, status, Utc::now())?;
        self.repo.put(&record).await?;
        tracing::info!(policy = %id, claim = %claim.id, status = %claim.status, "claim status updated");
        Ok(claim)
    }

    /// Cancels a policy
    ///
    /// Terminal: repeating the cancellation is rejected rather than
    /// overwriting the original metadata.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent; `InvalidState` if already cancelled.
    pub async fn cancel_policy(
        &self,
        id: &PolicyKey,
        reason: &str,
    ) -> Result<PolicyRecord, ContractError> {
        let mut record = self.fetch(id).await?;
        record.cancel(reason, Utc::now())?;
        self.repo.put(&record).await?;
        tracing::info!(policy = %id, "policy cancelled");
        Ok(record)
    }

    async fn fetch(&self, id: &PolicyKey) -> Result<PolicyRecord, ContractError> {
        self.repo.get(id).await.map_err(|error| match error {
            StateError::NotFound { key } => ContractError::not_found("policy", key),
            other => ContractError::State(other),
        })
    }
}

/// The fixed records `initLedger` writes
fn seed_policies() -> Vec<PolicyRecord> {
    vec![PolicyRecord::new(NewPolicy {
        id: PolicyKey::new("POL001").expect("static seed key"),
        policy_type: "AUTOMOVIL".to_string(),
        holder: "Juan Pérez".to_string(),
        document: "12345678A".to_string(),
        vehicle: VehicleInfo {
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2023,
            plate: "ABC123".to_string(),
        },
        coverage: 15_000,
        annual_premium: 450,
        start_date: "2025-01-01".to_string(),
        end_date: "2026-01-01".to_string(),
    })]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_state::MemoryLedger;

    fn contract() -> PolicyContract {
        PolicyContract::new(Arc::new(MemoryLedger::new()))
    }

    fn new_policy(id: &str) -> NewPolicy {
        NewPolicy {
            id: PolicyKey::new(id).unwrap(),
            policy_type: "AUTOMOVIL".to_string(),
            holder: "Lucía Romero".to_string(),
            document: "11223344C".to_string(),
            vehicle: VehicleInfo {
                make: "Seat".to_string(),
                model: "Ibiza".to_string(),
                year: 2020,
                plate: "JKL456".to_string(),
            },
            coverage: 12_000,
            annual_premium: 380,
            start_date: "2025-03-01".to_string(),
            end_date: "2026-03-01".to_string(),
        }
    }

    #[tokio::test]
    async fn init_ledger_writes_the_seed() {
        let contract = contract();
        contract.init_ledger().await.unwrap();

        let key = PolicyKey::new("POL001").unwrap();
        let record = contract.get_policy(&key).await.unwrap();
        assert_eq!(record.vehicle.make, "Toyota");
        assert!(record.is_active());
    }

    #[tokio::test]
    async fn duplicate_create_leaves_the_original_untouched() {
        let contract = contract();
        let created = contract.create_policy(new_policy("POL010")).await.unwrap();

        let mut duplicate = new_policy("POL010");
        duplicate.holder = "Otro Titular".to_string();
        let result = contract.create_policy(duplicate).await;
        assert!(matches!(result, Err(ContractError::AlreadyExists { .. })));

        let stored = contract.get_policy(&created.id).await.unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn claim_on_missing_policy_is_not_found() {
        let contract = contract();
        let key = PolicyKey::new("POL404").unwrap();

        let result = contract.register_claim(&key, "choque", 500, "2025-05-05").await;
        assert!(matches!(
            result,
            Err(ContractError::NotFound { entity: "policy", .. })
        ));
    }

    #[tokio::test]
    async fn claim_on_cancelled_policy_is_invalid_state_and_writes_nothing() {
        let contract = contract();
        let created = contract.create_policy(new_policy("POL011")).await.unwrap();
        contract.cancel_policy(&created.id, "impago").await.unwrap();

        let before = contract.get_policy(&created.id).await.unwrap();
        let result = contract.register_claim(&created.id, "tardía", 100, "2025-06-06").await;
        assert!(matches!(result, Err(ContractError::InvalidState { .. })));

        let after = contract.get_policy(&created.id).await.unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn unknown_claim_update_is_not_found() {
        let contract = contract();
        let created = contract.create_policy(new_policy("POL012")).await.unwrap();

        let result = contract
            .update_claim_status(&created.id, ClaimId::new_v7(), ClaimStatus::Aprobada)
            .await;
        assert!(matches!(
            result,
            Err(ContractError::NotFound { entity: "claim", .. })
        ));
    }

    #[tokio::test]
    async fn repeat_cancellation_is_rejected() {
        let contract = contract();
        let created = contract.create_policy(new_policy("POL013")).await.unwrap();

        let cancelled = contract.cancel_policy(&created.id, "venta").await.unwrap();
        assert!(!cancelled.is_active());

        let result = contract.cancel_policy(&created.id, "otro motivo").await;
        assert!(matches!(result, Err(ContractError::InvalidState { .. })));

        let stored = contract.get_policy(&created.id).await.unwrap();
        assert_eq!(stored.cancellation_reason.as_deref(), Some("venta"));
    }
}
