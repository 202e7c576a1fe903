//! Invocation boundary
//!
//! Maps a named operation plus ordered string arguments onto the typed
//! contract operations, and serializes the result as one JSON string.
//! Operation names keep the identifiers external callers have always
//! used. The submit/evaluate split mirrors the caller-side distinction
//! between state-mutating and read-only invocations.

use serde::Serialize;
use tracing::Instrument;

use core_kernel::{ClaimId, PolicyKey, TransactionId};
use domain_policy::{ClaimStatus, NewPolicy, VehicleInfo};

use crate::contract::PolicyContract;
use crate::error::ContractError;

/// Whether an operation must go through consensus or may be evaluated
/// against a single peer's state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionClass {
    /// State-mutating; must be submitted for commit
    Submit,
    /// Read-only; may bypass commit
    Evaluate,
}

/// Resolves the invocation class of an operation name
pub fn transaction_class(operation: &str) -> Option<TransactionClass> {
    match operation {
        "initLedger"
        | "crearPoliza"
        | "registrarReclamacion"
        | "actualizarEstadoReclamacion"
        | "cancelarPoliza" => Some(TransactionClass::Submit),
        "polizaExiste" | "consultarPoliza" | "consultarTodasLasPolizas" => {
            Some(TransactionClass::Evaluate)
        }
        _ => None,
    }
}

/// Dispatches one invocation against the contract
///
/// Returns the serialized JSON result (`null` for operations without
/// one), or the contract error unchanged.
///
/// # Errors
///
/// `UnknownOperation` for names outside the contract;
/// `InvalidArgument` for wrong arity or unparsable arguments; otherwise
/// whatever the operation itself raises.
pub async fn invoke(
    contract: &PolicyContract,
    operation: &str,
    args: &[String],
) -> Result<String, ContractError> {
    let txn = TransactionId::new_v7();
    let span = tracing::info_span!("invoke", %txn, operation);

    dispatch(contract, operation, args).instrument(span).await
}

async fn dispatch(
    contract: &PolicyContract,
    operation: &str,
    args: &[String],
) -> Result<String, ContractError> {
    match operation {
        "initLedger" => {
            expect_arity(operation, args, 0)?;
            contract.init_ledger().await?;
            encode(&serde_json::Value::Null)
        }
        "crearPoliza" => {
            expect_arity(operation, args, 9)?;
            let input = NewPolicy {
                id: parse_key(&args[0])?,
                policy_type: args[1].clone(),
                holder: args[2].clone(),
                document: args[3].clone(),
                vehicle: parse_vehicle(&args[4])?,
                coverage: parse_unsigned("cobertura", &args[5])?,
                annual_premium: parse_unsigned("primaAnual", &args[6])?,
                start_date: args[7].clone(),
                end_date: args[8].clone(),
            };
            encode(&contract.create_policy(input).await?)
        }
        "polizaExiste" => {
            expect_arity(operation, args, 1)?;
            encode(&contract.policy_exists(&parse_key(&args[0])?).await?)
        }
        "consultarPoliza" => {
            expect_arity(operation, args, 1)?;
            encode(&contract.get_policy(&parse_key(&args[0])?).await?)
        }
        "consultarTodasLasPolizas" => {
            expect_arity(operation, args, 0)?;
            encode(&contract.get_all_policies().await?)
        }
        "registrarReclamacion" => {
            expect_arity(operation, args, 4)?;
            let key = parse_key(&args[0])?;
            let amount = parse_signed("monto", &args[2])?;
            encode(&contract.register_claim(&key, &args[1], amount, &args[3]).await?)
        }
        "actualizarEstadoReclamacion" => {
            expect_arity(operation, args, 3)?;
            let key = parse_key(&args[0])?;
            let claim_id = parse_claim_id(&args[1])?;
            let status: ClaimStatus = args[2].parse().map_err(ContractError::from)?;
            encode(&contract.update_claim_status(&key, claim_id, status).await?)
        }
        "cancelarPoliza" => {
            expect_arity(operation, args, 2)?;
            let key = parse_key(&args[0])?;
            encode(&contract.cancel_policy(&key, &args[1]).await?)
        }
        other => Err(ContractError::UnknownOperation {
            operation: other.to_string(),
        }),
    }
}

fn expect_arity(operation: &str, args: &[String], expected: usize) -> Result<(), ContractError> {
    if args.len() != expected {
        return Err(ContractError::invalid_argument(
            "args",
            format!(
                "{operation} expects {expected} argument(s), got {}",
                args.len()
            ),
        ));
    }
    Ok(())
}

fn parse_key(value: &str) -> Result<PolicyKey, ContractError> {
    PolicyKey::new(value).map_err(|error| ContractError::invalid_argument("id", error.to_string()))
}

fn parse_claim_id(value: &str) -> Result<ClaimId, ContractError> {
    value.parse().map_err(|_| {
        ContractError::invalid_argument(
            "reclamacionId",
            format!("'{value}' is not a claim identifier"),
        )
    })
}

fn parse_vehicle(value: &str) -> Result<VehicleInfo, ContractError> {
    serde_json::from_str(value).map_err(|error| {
        ContractError::invalid_argument("vehiculo", format!("not a vehicle object: {error}"))
    })
}

fn parse_unsigned(field: &'static str, value: &str) -> Result<u64, ContractError> {
    value.trim().parse().map_err(|_| {
        ContractError::invalid_argument(field, format!("'{value}' is not a non-negative integer"))
    })
}

fn parse_signed(field: &'static str, value: &str) -> Result<i64, ContractError> {
    value.trim().parse().map_err(|_| {
        ContractError::invalid_argument(field, format!("'{value}' is not an integer"))
    })
}

fn encode<T: Serialize>(value: &T) -> Result<String, ContractError> {
    serde_json::to_string(value).map_err(|error| {
        ContractError::State(ledger_state::StateError::backend(format!(
            "failed to encode result: {error}"
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutating_operations_are_submit() {
        for op in [
            "initLedger",
            "crearPoliza",
            "registrarReclamacion",
            "actualizarEstadoReclamacion",
            "cancelarPoliza",
        ] {
            assert_eq!(transaction_class(op), Some(TransactionClass::Submit));
        }
    }

    #[test]
    fn read_only_operations_are_evaluate() {
        for op in ["polizaExiste", "consultarPoliza", "consultarTodasLasPolizas"] {
            assert_eq!(transaction_class(op), Some(TransactionClass::Evaluate));
        }
    }

    #[test]
    fn unknown_operations_have_no_class() {
        assert_eq!(transaction_class("transferirPoliza"), None);
    }

    #[test]
    fn numeric_parsing_rejects_garbage() {
        assert!(parse_unsigned("cobertura", "10000").is_ok());
        assert!(parse_unsigned("cobertura", " 10000 ").is_ok());
        assert!(parse_unsigned("cobertura", "-5").is_err());
        assert!(parse_unsigned("cobertura", "diez mil").is_err());
        assert!(parse_signed("monto", "-500").is_ok());
        assert!(parse_signed("monto", "5.5").is_err());
    }

    #[test]
    fn vehicle_parsing_uses_wire_field_names() {
        let vehicle =
            parse_vehicle(r#"{"marca":"Ford","modelo":"Fiesta","año":2019,"placa":"DEF321"}"#)
                .unwrap();
        assert_eq!(vehicle.make, "Ford");
        assert_eq!(vehicle.year, 2019);

        let result = parse_vehicle("not json");
        assert!(matches!(
            result,
            Err(ContractError::InvalidArgument { .. })
        ));
    }
}
