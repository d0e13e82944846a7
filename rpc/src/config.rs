//! Client configuration with TOML support.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use casperflow_types::NetworkId;

use crate::error::RpcError;

/// Configuration for a [`ChainClient`](crate::ChainClient).
///
/// Usually read from the `[client]` table of the CLI's TOML file, or built
/// programmatically in tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Network whose public endpoint is used when `rpc_url` is unset.
    #[serde(default)]
    pub network: NetworkId,

    /// Explicit JSON-RPC endpoint, overriding the network default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    /// Seconds between deploy status polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Per-request timeout in seconds. Unset means requests may wait forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_poll_interval_secs() -> u64 {
    5
}

impl ClientConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RpcError> {
        toml::from_str(s).map_err(|e| RpcError::Config(e.to_string()))
    }

    /// The endpoint every request goes to.
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }

    /// Poll interval, never shorter than one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: NetworkId::default(),
            rpc_url: None,
            poll_interval_secs: default_poll_interval_secs(),
            request_timeout_secs: None,
        }
    }
}
