//! References into global state: state root hashes and purses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque pointer to a snapshot of global state.
///
/// Fetched fresh for every query; never cached.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateRootHash(String);

impl StateRootHash {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateRootHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to the purse holding an account's spendable funds.
///
/// An empty reference means the account record carried no main purse.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurseUref(String);

impl PurseUref {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The reference returned when no purse could be found.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PurseUref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
