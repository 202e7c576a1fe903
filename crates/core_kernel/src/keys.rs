//! Policy record keys
//!
//! Policy identifiers are caller-supplied strings (e.g. "POL001") that
//! double as the world-state key for the record. The newtype validates
//! the one constraint the store imposes: keys must be non-empty, since
//! an empty string is the unbounded-range marker in the scan API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A validated, caller-supplied policy identifier / world-state key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyKey(String);

impl PolicyKey {
    /// Creates a key, rejecting empty or whitespace-only input
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::validation("policy id must not be empty"));
        }
        Ok(Self(id))
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PolicyKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PolicyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
