//! Claim records embedded in a policy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::ClaimId;

use crate::error::PolicyError;

/// Claim status
///
/// A closed set; boundary strings outside it are rejected rather than
/// stored verbatim. Wire values keep the uppercase Spanish spelling the
/// stored JSON always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Filed, awaiting adjudication
    #[serde(rename = "PENDIENTE")]
    Pendiente,
    /// Approved for payout
    #[serde(rename = "APROBADA")]
    Aprobada,
    /// Denied
    #[serde(rename = "RECHAZADA")]
    Rechazada,
}

impl ClaimStatus {
    /// Returns the wire spelling of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pendiente => "PENDIENTE",
            ClaimStatus::Aprobada => "APROBADA",
            ClaimStatus::Rechazada => "RECHAZADA",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDIENTE" => Ok(ClaimStatus::Pendiente),
            "APROBADA" => Ok(ClaimStatus::Aprobada),
            "RECHAZADA" => Ok(ClaimStatus::Rechazada),
            other => Err(PolicyError::UnknownClaimStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// A claim filed against a policy
///
/// Claims are append-only members of `PolicyRecord::claims`: once filed,
/// only `status` (and the derived `approval_date`) may change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Generated identifier, unique within the policy
    pub id: ClaimId,
    /// What happened
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Claimed amount
    #[serde(rename = "monto")]
    pub amount: i64,
    /// Caller-supplied loss date, passed through unparsed
    #[serde(rename = "fecha")]
    pub date: String,
    /// Current status
    #[serde(rename = "estado")]
    pub status: ClaimStatus,
    /// Set once, when the claim transitions to APROBADA
    #[serde(
        rename = "fechaAprobacion",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub approval_date: Option<DateTime<Utc>>,
}

impl ClaimRecord {
    /// Creates a freshly-filed claim in PENDIENTE status
    pub fn file(description: impl Into<String>, amount: i64, date: impl Into<String>) -> Self {
        Self {
            id: ClaimId::new_v7(),
            description: description.into(),
            amount,
            date: date.into(),
            status: ClaimStatus::Pendiente,
            approval_date: None,
        }
    }

    /// Overwrites the status; approval stamps `approval_date`
    pub fn set_status(&mut self, status: ClaimStatus, now: DateTime<Utc>) {
        self.status = status;
        if status == ClaimStatus::Aprobada {
            self.approval_date = Some(now);
        }
    }
}
