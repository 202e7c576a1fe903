//! Policy domain errors

use thiserror::Error;

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Claim registration attempted against an inactive policy
    #[error("Policy {id} is not active")]
    PolicyInactive { id: String },

    /// Cancellation attempted on an already-cancelled policy
    #[error("Policy {id} is already cancelled")]
    AlreadyCancelled { id: String },

    /// The referenced claim does not exist on the policy
    #[error("Claim {claim_id} does not exist on policy {policy_id}")]
    ClaimNotFound {
        policy_id: String,
        claim_id: String,
    },

    /// The supplied claim status is not one of the closed set
    #[error("Unknown claim status: {value}")]
    UnknownClaimStatus { value: String },
}
