//! RPC error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("endpoint returned HTTP {0}")]
    Http(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("remote error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    #[error("config error: {0}")]
    Config(String),
}
