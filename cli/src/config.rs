//! CLI configuration: one TOML file with `[client]` and `[staking]` tables.
//!
//! ```toml
//! log_level = "info"
//! log_format = "human"
//!
//! [client]
//! network = "testnet"
//! poll_interval_secs = 5
//!
//! [staking]
//! instant_fee_bp = 50
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use casperflow_rpc::ClientConfig;
use casperflow_types::NetworkId;
use casperflow_utils::LogFormat;
use casperflow_wallet_core::StakingConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub staking: StakingConfig,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CliConfig {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Point both the client and the staking summaries at `network`.
    pub fn set_network(&mut self, network: NetworkId) {
        self.client.network = network;
        self.staking.network = network;
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            staking: StakingConfig::default(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(CliConfig::from_toml_str("").unwrap(), CliConfig::default());
    }

    #[test]
    fn tables_override_defaults() {
        let config = CliConfig::from_toml_str(
            r#"
            log_level = "debug"
            log_format = "json"

            [client]
            network = "mainnet"
            poll_interval_secs = 2

            [staking]
            instant_fee_bp = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.client.network, NetworkId::Mainnet);
        assert_eq!(config.client.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.staking.instant_fee_bp, 100);
        // Untouched fields keep their defaults.
        assert_eq!(config.staking.network, NetworkId::Testnet);
        assert_eq!(config.staking.exchange_rate, 1_020_000_000);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(CliConfig::from_toml_str(r#"log_format = "xml""#).is_err());
    }

    #[test]
    fn set_network_updates_both_tables() {
        let mut config = CliConfig::default();
        config.set_network(NetworkId::Mainnet);
        assert_eq!(config.client.network, NetworkId::Mainnet);
        assert_eq!(config.staking.network, NetworkId::Mainnet);
        assert_eq!(config.staking.explorer_url(), "https://cspr.live");
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[client]\nrpc_url = \"http://127.0.0.1:7777/rpc\"").unwrap();

        let config = CliConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.client.rpc_url(), "http://127.0.0.1:7777/rpc");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = CliConfig::from_toml_file(Path::new("/nonexistent/casperflow.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/casperflow.toml"));
    }
}
