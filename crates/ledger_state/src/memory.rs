//! In-memory world state
//!
//! A BTreeMap-backed [`WorldState`] with the same observable semantics
//! as a platform-supplied store: keys in lexical order, scans over a
//! snapshot, explicit cursor release. Used by the test suite and by
//! embedders that run the contract without a ledger platform.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::StateError;
use crate::store::{RawCursor, StateCursor, StateEntry, WorldState};

/// Ordered in-memory key-value store
#[derive(Default)]
pub struct MemoryLedger {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
    open_cursors: Arc<AtomicUsize>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scan cursors not yet released
    ///
    /// Exposed so tests can assert that every exit path of a scan,
    /// including early abort, released its cursor.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.data.read().map(|data| data.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl WorldState for MemoryLedger {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        let data = self
            .data
            .read()
            .map_err(|_| StateError::backend("memory ledger lock poisoned"))?;
        Ok(data.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StateError::backend("memory ledger lock poisoned"))?;
        data.insert(key.to_string(), value);
        Ok(())
    }

    async fn scan(&self) -> Result<StateCursor, StateError> {
        let data = self
            .data
            .read()
            .map_err(|_| StateError::backend("memory ledger lock poisoned"))?;

        // Snapshot under the read lock; the cursor never observes
        // writes made after it was opened.
        let entries: Vec<StateEntry> = data
            .iter()
            .map(|(key, value)| StateEntry {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();

        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        Ok(StateCursor::new(Box::new(MemoryCursor {
            entries: entries.into_iter(),
            open_cursors: Arc::clone(&self.open_cursors),
            released: false,
        })))
    }
}

struct MemoryCursor {
    entries: std::vec::IntoIter<StateEntry>,
    open_cursors: Arc<AtomicUsize>,
    released: bool,
}

#[async_trait]
impl RawCursor for MemoryCursor {
    async fn next(&mut self) -> Result<Option<StateEntry>, StateError> {
        Ok(self.entries.next())
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.open_cursors.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
