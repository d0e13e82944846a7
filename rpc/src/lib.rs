//! JSON-RPC client for Casper chain state.
//!
//! Provides:
//! - The JSON-RPC request/response envelope
//! - A transport seam ([`RpcTransport`]) with an HTTP implementation
//! - [`ChainClient`]: state root, main purse, balance and deploy status queries
//! - [`DeployWatcher`]: cancellable interval polling of a deploy's status

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod methods;
pub mod poller;
pub mod transport;

pub use client::ChainClient;
pub use config::ClientConfig;
pub use envelope::{RpcErrorObject, RpcRequest, RpcResponse};
pub use error::RpcError;
pub use poller::DeployWatcher;
pub use transport::{HttpTransport, RpcTransport};
