//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for CasperFlow domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CasperFlowError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount overflows the motes range")]
    AmountOverflow,

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}
