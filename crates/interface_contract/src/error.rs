//! Contract error taxonomy
//!
//! A closed set of failure kinds with structured context, replacing the
//! stringly-typed errors of earlier deployments. Callers at the
//! invocation boundary branch on [`ContractError::code`].

use thiserror::Error;

use domain_policy::PolicyError;
use ledger_state::StateError;

/// Errors surfaced at the contract boundary
#[derive(Debug, Error)]
pub enum ContractError {
    /// Create attempted with a key that is already stored
    #[error("Policy {id} already exists")]
    AlreadyExists { id: String },

    /// The referenced policy or claim is not stored
    #[error("The {entity} {id} does not exist")]
    NotFound { entity: &'static str, id: String },

    /// A boundary argument could not be parsed
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// The operation is not allowed in the record's current state
    #[error("Invalid state for policy {id}: {message}")]
    InvalidState { id: String, message: String },

    /// The operation name is not part of the contract
    #[error("Unknown operation: {operation}")]
    UnknownOperation { operation: String },

    /// The world-state store failed
    #[error(transparent)]
    State(#[from] StateError),
}

impl ContractError {
    pub fn already_exists(id: impl Into<String>) -> Self {
        ContractError::AlreadyExists { id: id.into() }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ContractError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        ContractError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_state(id: impl Into<String>, message: impl Into<String>) -> Self {
        ContractError::InvalidState {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            ContractError::AlreadyExists { .. } => "ALREADY_EXISTS",
            ContractError::NotFound { .. } => "NOT_FOUND",
            ContractError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            ContractError::InvalidState { .. } => "INVALID_STATE",
            ContractError::UnknownOperation { .. } => "UNKNOWN_OPERATION",
            ContractError::State(_) => "STATE_ERROR",
        }
    }

    /// Returns true if this error indicates a missing policy or claim
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContractError::NotFound { .. })
    }
}

impl From<PolicyError> for ContractError {
    fn from(error: PolicyError) -> Self {
        match error {
            PolicyError::PolicyInactive { id } => {
                ContractError::invalid_state(id, "policy is not active")
            }
            PolicyError::AlreadyCancelled { id } => {
                ContractError::invalid_state(id, "policy is already cancelled")
            }
            PolicyError::ClaimNotFound { claim_id, .. } => {
                ContractError::not_found("claim", claim_id)
            }
            PolicyError::UnknownClaimStatus { value } => ContractError::invalid_argument(
                "nuevoEstado",
                format!("'{value}' is not one of PENDIENTE/APROBADA/RECHAZADA"),
            ),
        }
    }
}
