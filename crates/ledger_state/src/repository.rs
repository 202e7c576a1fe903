//! Policy repository
//!
//! Thin mapping of policy keys to encoded [`PolicyRecord`] values
//! against the world state. Owns the JSON codec and existence checks;
//! contains no business rules.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use core_kernel::PolicyKey;
use domain_policy::PolicyRecord;

use crate::error::StateError;
use crate::store::WorldState;

/// Repository for policy records
///
/// Holds a shared handle to the world state; cloning the repository
/// clones the handle, not the data.
#[derive(Clone)]
pub struct PolicyRepository {
    store: Arc<dyn WorldState>,
}

/// The decoded-or-raw value of one scanned world-state entry
///
/// Serialized untagged, so a policy entry renders as the record object
/// and a malformed entry renders as its raw string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    Policy(PolicyRecord),
    Raw(String),
}

/// One entry of a full-range scan, in the shape the boundary returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: RecordValue,
}

impl PolicyRepository {
    /// Creates a repository over the given store handle
    pub fn new(store: Arc<dyn WorldState>) -> Self {
        Self { store }
    }

    /// Returns true iff a non-empty value is stored under the key
    pub async fn exists(&self, id: &PolicyKey) -> Result<bool, StateError> {
        let value = self.store.get(id.as_str()).await?;
        Ok(matches!(value, Some(bytes) if !bytes.is_empty()))
    }

    /// Loads and decodes the record stored under the key
    ///
    /// # Errors
    ///
    /// `NotFound` if the key is absent or holds an empty value; `Codec`
    /// if the stored bytes are not a valid policy record.
    pub async fn get(&self, id: &PolicyKey) -> Result<PolicyRecord, StateError> {
        let bytes = self
            .store
            .get(id.as_str())
            .await?
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| StateError::not_found(id.as_str()))?;

        serde_json::from_slice(&bytes).map_err(|source| StateError::Codec {
            key: id.to_string(),
            source,
        })
    }

    /// Serializes and writes the record, overwriting any prior value
    pub async fn put(&self, record: &PolicyRecord) -> Result<(), StateError> {
        let bytes = serde_json::to_vec(record).map_err(|source| StateError::Codec {
            key: record.id.to_string(),
            source,
        })?;
        self.store.put(record.id.as_str(), bytes).await
    }

    /// Scans the full key range and decodes each entry
    ///
    /// Entries that fail to decode as policy records are surfaced as
    /// their raw value rather than aborting the scan, so callers still
    /// see malformed data. Empty values are skipped. The scan cursor is
    /// released on every path, including early return on a store error.
    pub async fn scan_all(&self) -> Result<Vec<LedgerEntry>, StateError> {
        let mut cursor = self.store.scan().await?;
        let mut entries = Vec::new();

        // An early `?` drops the cursor, which releases it.
        while let Some(state_entry) = cursor.next().await? {
            if state_entry.value.is_empty() {
                continue;
            }

            let record = match serde_json::from_slice::<PolicyRecord>(&state_entry.value) {
                Ok(record) => RecordValue::Policy(record),
                Err(error) => {
                    tracing::warn!(
                        key = %state_entry.key,
                        %error,
                        "entry is not a policy record, surfacing raw value"
                    );
                    RecordValue::Raw(String::from_utf8_lossy(&state_entry.value).into_owned())
                }
            };

            entries.push(LedgerEntry {
                key: state_entry.key,
                record,
            });
        }

        cursor.close();
        tracing::debug!(count = entries.len(), "full-range scan complete");
        Ok(entries)
    }
}
