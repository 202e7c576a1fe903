//! End-to-end tests for the contract through the invocation boundary

use std::sync::Arc;

use core_kernel::PolicyKey;
use domain_policy::ClaimStatus;
use interface_contract::{invoke, telemetry, ContractError, PolicyContract};
use ledger_state::{MemoryLedger, WorldState};
use test_utils::{seed_key, PolicyRecordBuilder};

fn setup() -> (Arc<MemoryLedger>, PolicyContract) {
    telemetry::init("warn");
    let ledger = Arc::new(MemoryLedger::new());
    let contract = PolicyContract::new(ledger.clone());
    (ledger, contract)
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

const VEHICLE_JSON: &str = r#"{"marca":"Toyota","modelo":"Corolla","año":2023,"placa":"ABC123"}"#;

mod scenario {
    use super::*;

    /// The full lifecycle: create, query, claim, approve, cancel, and
    /// the rejected late claim.
    #[tokio::test]
    async fn pol100_end_to_end() {
        let (_ledger, contract) = setup();

        let created = invoke(
            &contract,
            "crearPoliza",
            &args(&[
                "POL100",
                "AUTOMOVIL",
                "Juan Pérez",
                "12345678A",
                VEHICLE_JSON,
                "10000",
                "300",
                "2025-01-01",
                "2026-01-01",
            ]),
        )
        .await
        .unwrap();
        let created: serde_json::Value = serde_json::from_str(&created).unwrap();
        assert_eq!(created["cobertura"], 10_000);
        assert_eq!(created["primaAnual"], 300);

        let exists = invoke(&contract, "polizaExiste", &args(&["POL100"])).await.unwrap();
        assert_eq!(exists, "true");

        let policy = invoke(&contract, "consultarPoliza", &args(&["POL100"])).await.unwrap();
        let policy: serde_json::Value = serde_json::from_str(&policy).unwrap();
        assert_eq!(policy["activa"], true);
        assert_eq!(policy["reclamaciones"], serde_json::json!([]));

        let claim = invoke(
            &contract,
            "registrarReclamacion",
            &args(&["POL100", "parabrisas roto", "500", "2025-03-15"]),
        )
        .await
        .unwrap();
        let claim: serde_json::Value = serde_json::from_str(&claim).unwrap();
        assert_eq!(claim["estado"], "PENDIENTE");
        assert_eq!(claim["monto"], 500);
        let claim_id = claim["id"].as_str().unwrap().to_string();

        let policy = invoke(&contract, "consultarPoliza", &args(&["POL100"])).await.unwrap();
        let policy: serde_json::Value = serde_json::from_str(&policy).unwrap();
        assert_eq!(policy["reclamaciones"].as_array().unwrap().len(), 1);

        let approved = invoke(
            &contract,
            "actualizarEstadoReclamacion",
            &args(&["POL100", &claim_id, "APROBADA"]),
        )
        .await
        .unwrap();
        let approved: serde_json::Value = serde_json::from_str(&approved).unwrap();
        assert_eq!(approved["estado"], "APROBADA");
        assert!(!approved["fechaAprobacion"].as_str().unwrap().is_empty());

        let cancelled = invoke(
            &contract,
            "cancelarPoliza",
            &args(&["POL100", "venta del vehículo"]),
        )
        .await
        .unwrap();
        let cancelled: serde_json::Value = serde_json::from_str(&cancelled).unwrap();
        assert_eq!(cancelled["activa"], false);
        assert_eq!(cancelled["motivoCancelacion"], "venta del vehículo");

        let late = invoke(
            &contract,
            "registrarReclamacion",
            &args(&["POL100", "tardía", "100", "2025-09-01"]),
        )
        .await;
        match late {
            Err(error) => assert_eq!(error.code(), "INVALID_STATE"),
            Ok(_) => panic!("claim against cancelled policy must fail"),
        }
    }
}

mod boundary {
    use super::*;

    #[tokio::test]
    async fn unknown_operation_is_rejected() {
        let (_ledger, contract) = setup();
        let result = invoke(&contract, "transferirPoliza", &args(&["POL001"])).await;
        match result {
            Err(error) => assert_eq!(error.code(), "UNKNOWN_OPERATION"),
            Ok(_) => panic!("unknown operation must fail"),
        }
    }

    #[tokio::test]
    async fn wrong_arity_is_invalid_argument() {
        let (_ledger, contract) = setup();
        let result = invoke(&contract, "consultarPoliza", &args(&[])).await;
        match result {
            Err(error) => assert_eq!(error.code(), "INVALID_ARGUMENT"),
            Ok(_) => panic!("missing argument must fail"),
        }
    }

    #[tokio::test]
    async fn malformed_numeric_field_fails_before_any_write() {
        let (ledger, contract) = setup();
        let result = invoke(
            &contract,
            "crearPoliza",
            &args(&[
                "POL101",
                "AUTOMOVIL",
                "Ana Ruiz",
                "55555555E",
                VEHICLE_JSON,
                "mucho",
                "300",
                "2025-01-01",
                "2026-01-01",
            ]),
        )
        .await;
        assert!(matches!(result, Err(ContractError::InvalidArgument { .. })));
        assert_eq!(ledger.len(), 0);
    }

    #[tokio::test]
    async fn malformed_vehicle_json_fails_before_any_write() {
        let (ledger, contract) = setup();
        let result = invoke(
            &contract,
            "crearPoliza",
            &args(&[
                "POL102",
                "AUTOMOVIL",
                "Ana Ruiz",
                "55555555E",
                "{not json",
                "10000",
                "300",
                "2025-01-01",
                "2026-01-01",
            ]),
        )
        .await;
        assert!(matches!(result, Err(ContractError::InvalidArgument { .. })));
        assert_eq!(ledger.len(), 0);
    }

    #[tokio::test]
    async fn unknown_status_string_is_invalid_argument() {
        let (_ledger, contract) = setup();
        let created = contract
            .create_policy(PolicyRecordBuilder::new().with_id("POL103").build_input())
            .await
            .unwrap();
        let claim = contract
            .register_claim(&created.id, "golpe", 200, "2025-04-01")
            .await
            .unwrap();

        let result = invoke(
            &contract,
            "actualizarEstadoReclamacion",
            &args(&["POL103", &claim.id.to_string(), "TAL VEZ"]),
        )
        .await;
        match result {
            Err(error) => assert_eq!(error.code(), "INVALID_ARGUMENT"),
            Ok(_) => panic!("unknown status must fail"),
        }
    }

    #[tokio::test]
    async fn duplicate_create_reports_already_exists() {
        let (_ledger, contract) = setup();
        let create_args = args(&[
            "POL104",
            "AUTOMOVIL",
            "Luis Vega",
            "99999999F",
            VEHICLE_JSON,
            "8000",
            "250",
            "2025-01-01",
            "2026-01-01",
        ]);

        invoke(&contract, "crearPoliza", &create_args).await.unwrap();
        let result = invoke(&contract, "crearPoliza", &create_args).await;
        match result {
            Err(error) => assert_eq!(error.code(), "ALREADY_EXISTS"),
            Ok(_) => panic!("duplicate create must fail"),
        }
    }
}

mod enumeration {
    use super::*;

    #[tokio::test]
    async fn scan_returns_policies_and_foreign_keys() {
        let (ledger, contract) = setup();
        contract.init_ledger().await.unwrap();
        contract
            .create_policy(PolicyRecordBuilder::new().with_id("POL200").build_input())
            .await
            .unwrap();
        // A pre-existing non-policy key survives in the result as raw
        ledger
            .put("CONFIG-channel", b"not a policy".to_vec())
            .await
            .unwrap();

        let result = invoke(&contract, "consultarTodasLasPolizas", &args(&[])).await.unwrap();
        let entries: serde_json::Value = serde_json::from_str(&result).unwrap();
        let entries = entries.as_array().unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["Key"], "CONFIG-channel");
        assert_eq!(entries[0]["Record"], "not a policy");
        assert_eq!(entries[1]["Key"], seed_key().as_str());
        assert_eq!(entries[1]["Record"]["tipo"], "AUTOMOVIL");
        assert_eq!(entries[2]["Key"], "POL200");

        // Scan released its cursor
        assert_eq!(ledger.open_cursors(), 0);
    }
}

mod typed_surface {
    use super::*;

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let (_ledger, contract) = setup();
        let input = PolicyRecordBuilder::new()
            .with_id("POL300")
            .with_policy_type("MOTOCICLETA")
            .with_holder("Carmen Soler")
            .with_coverage(25_000)
            .with_term("2025-06-01", "2026-06-01")
            .build_input();

        let created = contract.create_policy(input).await.unwrap();
        let key = PolicyKey::new("POL300").unwrap();
        let loaded = contract.get_policy(&key).await.unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn approving_one_claim_leaves_others_untouched() {
        let (_ledger, contract) = setup();
        let created = contract
            .create_policy(PolicyRecordBuilder::new().with_id("POL301").build_input())
            .await
            .unwrap();

        let first = contract
            .register_claim(&created.id, "faro", 120, "2025-02-02")
            .await
            .unwrap();
        let second = contract
            .register_claim(&created.id, "capó", 900, "2025-02-10")
            .await
            .unwrap();

        contract
            .update_claim_status(&created.id, second.id, ClaimStatus::Aprobada)
            .await
            .unwrap();

        let stored = contract.get_policy(&created.id).await.unwrap();
        assert_eq!(stored.claims.len(), 2);
        assert_eq!(stored.claims[0], first);
        assert_eq!(stored.claims[1].status, ClaimStatus::Aprobada);
        assert!(stored.claims[1].approval_date.is_some());
    }
}

mod properties {
    use proptest::prelude::*;
    use test_utils::generators::policy_record_strategy;
    use test_utils::memory_repository;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn stored_records_roundtrip(record in policy_record_strategy()) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            rt.block_on(async {
                let (_ledger, repo) = memory_repository();
                repo.put(&record).await.unwrap();
                let loaded = repo.get(&record.id).await.unwrap();
                assert_eq!(loaded, record);
            });
        }
    }
}
