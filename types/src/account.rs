//! Account public key, hex-encoded with a leading algorithm tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CasperFlowError;

/// Signature algorithm named by the first byte of a public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Ed25519,
    Secp256k1,
}

/// A Casper account public key, hex-encoded.
///
/// The first two characters are the algorithm tag (`01` for ed25519, `02` for
/// secp256k1); the remainder is the raw key. Supplied once per session by the
/// wallet provider and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKeyHex(String);

impl PublicKeyHex {
    /// Number of characters occupied by the algorithm tag.
    pub const TAG_LEN: usize = 2;

    /// Label prepended to the untagged key when addressing the account record.
    pub const ACCOUNT_HASH_LABEL: &'static str = "account-hash-";

    /// Parse and validate a hex-encoded public key.
    pub fn parse(raw: impl Into<String>) -> Result<Self, CasperFlowError> {
        let s = raw.into().trim().to_string();
        if s.len() <= Self::TAG_LEN {
            return Err(CasperFlowError::InvalidPublicKey(format!(
                "expected more than {} hex characters, got {}",
                Self::TAG_LEN,
                s.len()
            )));
        }
        hex::decode(&s).map_err(|e| CasperFlowError::InvalidPublicKey(format!("{s}: {e}")))?;
        Ok(Self(s))
    }

    /// Return the raw hex string, tag included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The algorithm named by the tag, if recognised.
    pub fn algorithm(&self) -> Option<KeyAlgorithm> {
        match &self.0[..Self::TAG_LEN] {
            "01" => Some(KeyAlgorithm::Ed25519),
            "02" => Some(KeyAlgorithm::Secp256k1),
            _ => None,
        }
    }

    /// The key without its algorithm tag.
    pub fn untagged(&self) -> &str {
        &self.0[Self::TAG_LEN..]
    }

    /// The global-state key of this account's record: `account-hash-<untagged>`.
    pub fn account_key(&self) -> String {
        format!("{}{}", Self::ACCOUNT_HASH_LABEL, self.untagged())
    }
}

impl fmt::Display for PublicKeyHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PublicKeyHex {
    type Err = CasperFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PublicKeyHex {
    type Error = CasperFlowError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<PublicKeyHex> for String {
    fn from(key: PublicKeyHex) -> Self {
        key.0
    }
}
