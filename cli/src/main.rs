//! casperflow: command line client for the CasperFlow staking pool.

mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{debug, info};

use casperflow_rpc::{ChainClient, DeployWatcher, HttpTransport};
use casperflow_types::{DeployHash, DeployStatus, Motes, NetworkId, PublicKeyHex};
use casperflow_utils::{format_duration, init_logging, LogFormat};
use casperflow_wallet_core::staking::parse_amount;
use casperflow_wallet_core::{
    connect_wallet, StakingDesk, StakingSession, StaticWalletProvider, SubmissionReceipt,
};

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "casperflow", about = "CasperFlow liquid staking client")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "CASPERFLOW_CONFIG")]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint (defaults to the network's public node).
    #[arg(long, env = "CASPERFLOW_RPC_URL")]
    rpc_url: Option<String>,

    /// Network: "mainnet" or "testnet".
    #[arg(long, env = "CASPERFLOW_NETWORK")]
    network: Option<NetworkId>,

    /// Log filter, e.g. "info" or "warn,casperflow_rpc=debug".
    #[arg(long, env = "CASPERFLOW_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output: "human" or "json".
    #[arg(long, env = "CASPERFLOW_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Public key the wallet provider reports as the active account.
    #[arg(long, env = "CASPERFLOW_PUBLIC_KEY")]
    public_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the current state root hash.
    StateRoot,

    /// Print an account's main purse.
    Purse { public_key: String },

    /// Print an account's balance (defaults to the wallet account).
    Balance { public_key: Option<String> },

    /// Print a deploy's execution status.
    Status {
        deploy_hash: String,
        /// Poll until the deploy settles.
        #[arg(long)]
        watch: bool,
    },

    /// Stake CSPR into the pool (placeholder, nothing is sent).
    Stake {
        amount: String,
        /// Wait for the deploy to settle and print the new balance.
        #[arg(long)]
        watch: bool,
    },

    /// Unstake stCSPR from the pool (placeholder, nothing is sent).
    Unstake {
        amount: String,
        /// Skip the unbonding period for a fee.
        #[arg(long)]
        instant: bool,
        #[arg(long)]
        watch: bool,
    },

    /// Show what unstaking an amount of stCSPR would return.
    Quote {
        amount: String,
        #[arg(long)]
        instant: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        info!("loaded config from {}", path.display());
    }
    info!(
        network = %config.client.network,
        rpc_url = config.client.rpc_url(),
        "casperflow starting"
    );

    let client = Arc::new(
        ChainClient::from_config(&config.client).context("building the JSON-RPC client")?,
    );
    let interval = config.client.poll_interval();
    let desk = StakingDesk::new(config.staking.clone());
    let provider = cli.public_key.as_deref().map(StaticWalletProvider::new);

    match cli.command {
        Command::StateRoot => {
            let root = client.state_root_hash().await?;
            println!("{root}");
        }
        Command::Purse { public_key } => {
            let account = PublicKeyHex::parse(public_key)?;
            let purse = client.main_purse(&account).await?;
            if purse.is_empty() {
                println!("no main purse found for {account}");
            } else {
                println!("{purse}");
            }
        }
        Command::Balance { public_key } => {
            let account = match public_key {
                Some(key) => PublicKeyHex::parse(key)?,
                None => connect_wallet(provider.as_ref()).await?,
            };
            println!("{} CSPR", client.account_balance(&account).await);
        }
        Command::Status { deploy_hash, watch } => {
            let deploy = DeployHash::new(deploy_hash);
            let status = if watch {
                watch_until_settled(&client, deploy, interval).await
            } else {
                client.deploy_status(&deploy).await
            };
            println!("{status}");
        }
        Command::Stake { amount, watch } => {
            let amount = parse_amount(&amount)?;
            if watch {
                stake_and_wait(Arc::clone(&client), desk, provider.as_ref(), amount, interval).await?;
            } else {
                let account = connect_wallet(provider.as_ref()).await?;
                print_receipt(&desk.stake(&account, amount)?);
            }
        }
        Command::Unstake {
            amount,
            instant,
            watch,
        } => {
            let amount = parse_amount(&amount)?;
            let account = connect_wallet(provider.as_ref()).await?;
            let receipt = desk.unstake(&account, amount, instant)?;
            print_receipt(&receipt);
            if watch {
                let status = watch_until_settled(&client, receipt.deploy_hash, interval).await;
                println!("{status}");
            }
        }
        Command::Quote { amount, instant } => {
            let quote = desk.quote_unstake(parse_amount(&amount)?, instant)?;
            println!("Unstaking {} stCSPR", quote.stcspr.to_display());
            println!("CSPR out:  {}", quote.cspr_out.to_display());
            println!("Fee:       {}", quote.fee.to_display());
            println!("You get:   {} CSPR", quote.net.to_display());
            if !instant {
                println!("Standard unstaking waits for the unbonding period.");
            }
        }
    }

    debug!(requests = client.stats().total(), counts = %client.stats(), "done");
    Ok(())
}

/// Defaults, then the TOML file, then env vars and flags.
fn load_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };

    if let Some(network) = cli.network {
        config.set_network(network);
    }
    if let Some(url) = &cli.rpc_url {
        config.client.rpc_url = Some(url.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

fn print_receipt(receipt: &SubmissionReceipt) {
    println!("{receipt}");
    println!("No deploy was sent: contract calls are not wired up in this client.");
}

/// Poll until the deploy settles, printing each status change.
///
/// Ctrl-C cancels the watcher and returns the last observed status.
async fn watch_until_settled(
    client: &Arc<ChainClient<HttpTransport>>,
    deploy: DeployHash,
    interval: Duration,
) -> DeployStatus {
    info!(deploy = %deploy, every = %format_duration(interval), "watching deploy");
    let watcher = DeployWatcher::spawn(Arc::clone(client), deploy, interval);
    let mut updates = watcher.subscribe();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = *updates.borrow_and_update();
                eprintln!("{}: {status}", watcher.deploy());
                if status.is_terminal() {
                    break;
                }
            }
            _ = signal::ctrl_c() => {
                info!("interrupted, cancelling watcher");
                watcher.cancel();
                break;
            }
        }
    }

    watcher.wait().await
}

/// Stake through a session so the balance is refreshed once the deploy settles.
async fn stake_and_wait(
    client: Arc<ChainClient<HttpTransport>>,
    desk: StakingDesk,
    provider: Option<&StaticWalletProvider>,
    amount: Motes,
    interval: Duration,
) -> anyhow::Result<()> {
    let mut session = StakingSession::connect(client, desk, provider).await?;
    println!("Balance: {} CSPR", session.balance());

    tokio::select! {
        outcome = session.stake(amount, interval) => {
            let outcome = outcome?;
            print_receipt(&outcome.receipt);
            println!("{}", outcome.status);
            println!("Balance: {} CSPR", outcome.balance);
        }
        _ = signal::ctrl_c() => {
            info!("interrupted, stake not confirmed");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\n[client]\nnetwork = \"mainnet\"\nrpc_url = \"http://file/rpc\""
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from([
            "casperflow",
            "--config",
            path,
            "--rpc-url",
            "http://flag/rpc",
            "state-root",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();

        assert_eq!(config.client.rpc_url(), "http://flag/rpc");
        assert_eq!(config.client.network, NetworkId::Mainnet);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn network_flag_sets_staking_network() {
        let cli = Cli::try_parse_from(["casperflow", "--network", "mainnet", "quote", "1"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.staking.network, NetworkId::Mainnet);
        assert_eq!(config.client.rpc_url(), "https://node.mainnet.casper.network/rpc");
    }

    #[test]
    fn unknown_network_is_rejected() {
        assert!(Cli::try_parse_from(["casperflow", "--network", "devnet", "state-root"]).is_err());
    }

    #[test]
    fn unstake_flags_parse() {
        let cli =
            Cli::try_parse_from(["casperflow", "unstake", "2.5", "--instant", "--watch"]).unwrap();
        match cli.command {
            Command::Unstake {
                amount,
                instant,
                watch,
            } => {
                assert_eq!(amount, "2.5");
                assert!(instant);
                assert!(watch);
            }
            _ => panic!("expected unstake"),
        }
    }
}
