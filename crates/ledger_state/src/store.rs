//! The world-state port
//!
//! [`WorldState`] is the seam between this core and the platform that
//! hosts it: point get/put by key plus a full-range scan cursor. Each
//! invocation of the contract runs inside a platform-managed
//! transaction, so implementations only need per-call semantics.
//!
//! The scan cursor is the one store-side resource the core holds.
//! [`StateCursor`] owns it and releases it structurally: callers that
//! drop the cursor mid-scan release it just as surely as callers that
//! drain it.

use async_trait::async_trait;

use crate::error::StateError;

/// One key/value pair yielded by a range scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub key: String,
    pub value: Vec<u8>,
}

/// Ordered key-value world state supplied by the platform
#[async_trait]
pub trait WorldState: Send + Sync {
    /// Reads the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    /// Writes `value` under `key`, overwriting any prior value
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StateError>;

    /// Opens a cursor over the full key range, in key order
    async fn scan(&self) -> Result<StateCursor, StateError>;
}

/// Backend-specific cursor state
///
/// Implemented by store adapters; consumers use [`StateCursor`], which
/// wraps this and guarantees release.
#[async_trait]
pub trait RawCursor: Send {
    /// Advances the cursor; `None` when exhausted
    async fn next(&mut self) -> Result<Option<StateEntry>, StateError>;

    /// Releases store-side resources; must be idempotent
    fn release(&mut self);
}

/// An owned, lazy, finite, non-restartable scan over the world state
///
/// The underlying store resource is released exactly once, on
/// [`close`](StateCursor::close) or on drop, whichever comes first.
pub struct StateCursor {
    inner: Box<dyn RawCursor>,
    released: bool,
}

impl StateCursor {
    /// Wraps a backend cursor
    pub fn new(inner: Box<dyn RawCursor>) -> Self {
        Self {
            inner,
            released: false,
        }
    }

    /// Yields the next entry, or `None` once the range is exhausted
    pub async fn next(&mut self) -> Result<Option<StateEntry>, StateError> {
        self.inner.next().await
    }

    /// Releases the cursor early
    ///
    /// Dropping the cursor has the same effect; `close` exists for
    /// callers that want the release to be visible in the control flow.
    pub fn close(mut self) {
        self.inner.release();
        self.released = true;
    }
}

impl Drop for StateCursor {
    fn drop(&mut self) {
        if !self.released {
            self.inner.release();
        }
    }
}
