//! Stake and unstake placeholders.
//!
//! No signing or contract-call integration exists, so nothing here reaches a
//! network. Each submission yields a [`SubmissionReceipt`]: a summary of what
//! would have been sent and a locally generated `demo-` deploy reference
//! whose status resolves to success without a request.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use casperflow_types::{DeployHash, Motes, NetworkId, PublicKeyHex, MOTES_PER_CSPR};
use casperflow_utils::unix_millis;

use crate::error::WalletError;

/// Basis points in one whole.
const BASIS_POINTS: u128 = 10_000;

/// Length of the random part of a placeholder deploy reference.
const DEMO_SUFFIX_LEN: usize = 9;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Staking configuration, the `[staking]` table of the CLI's TOML file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StakingConfig {
    /// Staking pool contract the placeholders refer to.
    #[serde(default = "default_contract_hash")]
    pub contract_hash: String,

    /// Network named in summaries and explorer links.
    #[serde(default)]
    pub network: NetworkId,

    /// Explorer base URL, overriding the network default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,

    /// Fee for instant unstaking, in basis points.
    #[serde(default = "default_instant_fee_bp")]
    pub instant_fee_bp: u32,

    /// CSPR motes returned per whole stCSPR (10^9 = 1:1).
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: u64,
}

fn default_contract_hash() -> String {
    "430d190b13d41b456a9fdf1eb8c6b49d0e0239d7ee72186f015022d090e9bf23".to_string()
}

fn default_instant_fee_bp() -> u32 {
    50
}

fn default_exchange_rate() -> u64 {
    1_020_000_000
}

impl StakingConfig {
    pub fn explorer_url(&self) -> &str {
        self.explorer_url
            .as_deref()
            .unwrap_or_else(|| self.network.explorer_url())
    }
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            contract_hash: default_contract_hash(),
            network: NetworkId::default(),
            explorer_url: None,
            instant_fee_bp: default_instant_fee_bp(),
            exchange_rate: default_exchange_rate(),
        }
    }
}

/// What a submission would have done.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StakeAction {
    Stake { amount: Motes },
    Unstake { amount: Motes, instant: bool, fee_bp: u32 },
}

impl StakeAction {
    pub fn amount(&self) -> Motes {
        match self {
            Self::Stake { amount } | Self::Unstake { amount, .. } => *amount,
        }
    }
}

/// Outcome of a placeholder submission, handed back instead of a dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub deploy_hash: DeployHash,
    pub account: PublicKeyHex,
    pub action: StakeAction,
    pub contract_hash: String,
    pub network: NetworkId,
    pub explorer_link: String,
}

impl fmt::Display for SubmissionReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            StakeAction::Stake { amount } => {
                writeln!(f, "Staking {} CSPR", amount.to_display())?;
            }
            StakeAction::Unstake {
                amount,
                instant,
                fee_bp,
            } => {
                let fee = if *instant { *fee_bp } else { 0 };
                writeln!(f, "Unstaking {} stCSPR", amount.to_display())?;
                writeln!(f, "Instant: {instant}")?;
                writeln!(f, "Fee: {}", format_basis_points(fee))?;
            }
        }
        writeln!(f, "Contract: {}", self.contract_hash)?;
        writeln!(f, "Network: {}", network_label(self.network))?;
        writeln!(f, "Deploy hash: {}", self.deploy_hash)?;
        write!(f, "Explorer: {}", self.explorer_link)
    }
}

/// Expected proceeds of an unstake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnstakeQuote {
    /// stCSPR burned.
    pub stcspr: Motes,
    /// CSPR owed at the exchange rate, before fees.
    pub cspr_out: Motes,
    /// Instant unstake fee (zero for standard unstaking).
    pub fee: Motes,
    /// CSPR received.
    pub net: Motes,
    pub instant: bool,
}

/// Parse a user-entered CSPR amount, rejecting zero.
pub fn parse_amount(input: &str) -> Result<Motes, WalletError> {
    let amount = Motes::parse_cspr(input)?;
    if amount.is_zero() {
        return Err(WalletError::InvalidAmount(format!(
            "{input}: amount must be positive"
        )));
    }
    Ok(amount)
}

/// Builds placeholder submissions against the configured contract.
#[derive(Clone, Debug)]
pub struct StakingDesk {
    config: StakingConfig,
}

impl StakingDesk {
    pub fn new(config: StakingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StakingConfig {
        &self.config
    }

    /// Placeholder for a `deposit` call attaching `amount`.
    pub fn stake(
        &self,
        account: &PublicKeyHex,
        amount: Motes,
    ) -> Result<SubmissionReceipt, WalletError> {
        ensure_positive(amount)?;
        let receipt = self.receipt(account, StakeAction::Stake { amount });
        info!(
            account = %account,
            amount = %amount,
            deploy = %receipt.deploy_hash,
            "stake placeholder created; no deploy was sent"
        );
        Ok(receipt)
    }

    /// Placeholder for a `withdraw` call burning `amount` stCSPR.
    pub fn unstake(
        &self,
        account: &PublicKeyHex,
        amount: Motes,
        instant: bool,
    ) -> Result<SubmissionReceipt, WalletError> {
        ensure_positive(amount)?;
        let receipt = self.receipt(
            account,
            StakeAction::Unstake {
                amount,
                instant,
                fee_bp: self.config.instant_fee_bp,
            },
        );
        info!(
            account = %account,
            amount = %amount,
            instant,
            deploy = %receipt.deploy_hash,
            "unstake placeholder created; no deploy was sent"
        );
        Ok(receipt)
    }

    /// Quote the proceeds of unstaking `stcspr`.
    pub fn quote_unstake(&self, stcspr: Motes, instant: bool) -> Result<UnstakeQuote, WalletError> {
        let overflow = || WalletError::InvalidAmount(format!("{stcspr}: quote overflows"));

        let cspr_out = stcspr
            .mul_div(u128::from(self.config.exchange_rate), MOTES_PER_CSPR)
            .ok_or_else(overflow)?;
        let fee = if instant {
            cspr_out
                .mul_div(u128::from(self.config.instant_fee_bp), BASIS_POINTS)
                .ok_or_else(overflow)?
        } else {
            Motes::ZERO
        };

        Ok(UnstakeQuote {
            stcspr,
            cspr_out,
            fee,
            net: cspr_out.saturating_sub(fee),
            instant,
        })
    }

    fn receipt(&self, account: &PublicKeyHex, action: StakeAction) -> SubmissionReceipt {
        let deploy_hash = placeholder_deploy_hash();
        let explorer_link = format!(
            "{}/deploy/{}",
            self.config.explorer_url().trim_end_matches('/'),
            deploy_hash
        );
        SubmissionReceipt {
            deploy_hash,
            account: account.clone(),
            action,
            contract_hash: self.config.contract_hash.clone(),
            network: self.config.network,
            explorer_link,
        }
    }
}

fn ensure_positive(amount: Motes) -> Result<(), WalletError> {
    if amount.is_zero() {
        return Err(WalletError::InvalidAmount("amount must be positive".into()));
    }
    Ok(())
}

/// `demo-<unix millis>-<9 random base36 chars>`
fn placeholder_deploy_hash() -> DeployHash {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..DEMO_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    DeployHash::demo(unix_millis(), &suffix)
}

/// `50` -> `"0.5%"`, `0` -> `"0%"`, `125` -> `"1.25%"`.
fn format_basis_points(bp: u32) -> String {
    if bp % 100 == 0 {
        format!("{}%", bp / 100)
    } else {
        let fraction = format!("{:02}", bp % 100);
        format!("{}.{}%", bp / 100, fraction.trim_end_matches('0'))
    }
}

fn network_label(network: NetworkId) -> &'static str {
    match network {
        NetworkId::Mainnet => "Casper Mainnet",
        NetworkId::Testnet => "Casper Testnet",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "01a35887f3962a6a232e8e11fa7d4567b6866d68850974aad7289ef287676825f6";

    fn account() -> PublicKeyHex {
        PublicKeyHex::parse(KEY).unwrap()
    }

    #[test]
    fn stake_produces_demo_receipt() {
        let desk = StakingDesk::new(StakingConfig::default());
        let receipt = desk.stake(&account(), Motes::new(10 * MOTES_PER_CSPR)).unwrap();

        assert!(receipt.deploy_hash.is_demo());
        let parts: Vec<&str> = receipt.deploy_hash.as_str().splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<u64>().is_ok());
        assert_eq!(parts[2].len(), DEMO_SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));

        assert_eq!(
            receipt.explorer_link,
            format!("https://testnet.cspr.live/deploy/{}", receipt.deploy_hash)
        );
        let summary = receipt.to_string();
        assert!(summary.starts_with("Staking 10.00 CSPR"));
        assert!(summary.contains("Network: Casper Testnet"));
        assert!(summary.contains(&default_contract_hash()));
    }

    #[test]
    fn zero_amount_rejected() {
        let desk = StakingDesk::new(StakingConfig::default());
        assert!(matches!(
            desk.stake(&account(), Motes::ZERO),
            Err(WalletError::InvalidAmount(_))
        ));
        assert!(matches!(parse_amount("0.0"), Err(WalletError::InvalidAmount(_))));
        assert!(matches!(parse_amount("abc"), Err(WalletError::InvalidAmount(_))));
        assert_eq!(parse_amount("2.5"), Ok(Motes::new(2_500_000_000)));
    }

    #[test]
    fn unstake_summary_shows_fee_only_when_instant() {
        let desk = StakingDesk::new(StakingConfig::default());
        let amount = Motes::new(MOTES_PER_CSPR);

        let instant = desk.unstake(&account(), amount, true).unwrap().to_string();
        assert!(instant.contains("Instant: true"));
        assert!(instant.contains("Fee: 0.5%"));

        let standard = desk.unstake(&account(), amount, false).unwrap().to_string();
        assert!(standard.contains("Instant: false"));
        assert!(standard.contains("Fee: 0%"));
    }

    #[test]
    fn receipts_get_distinct_hashes() {
        let desk = StakingDesk::new(StakingConfig::default());
        let a = desk.stake(&account(), Motes::new(1)).unwrap();
        let b = desk.stake(&account(), Motes::new(1)).unwrap();
        assert_ne!(a.deploy_hash, b.deploy_hash);
    }

    #[test]
    fn quote_applies_rate_and_fee() {
        let desk = StakingDesk::new(StakingConfig::default());
        let quote = desk.quote_unstake(Motes::new(100 * MOTES_PER_CSPR), true).unwrap();
        assert_eq!(quote.cspr_out, Motes::new(102 * MOTES_PER_CSPR));
        assert_eq!(quote.fee, Motes::new(510_000_000));
        assert_eq!(quote.net, Motes::new(101_490_000_000));

        let standard = desk.quote_unstake(Motes::new(100 * MOTES_PER_CSPR), false).unwrap();
        assert_eq!(standard.fee, Motes::ZERO);
        assert_eq!(standard.net, standard.cspr_out);
    }

    #[test]
    fn basis_points_formatting() {
        assert_eq!(format_basis_points(50), "0.5%");
        assert_eq!(format_basis_points(0), "0%");
        assert_eq!(format_basis_points(125), "1.25%");
        assert_eq!(format_basis_points(300), "3%");
    }

    #[test]
    fn config_from_toml_defaults() {
        let config: StakingConfig = toml::from_str("instant_fee_bp = 25").unwrap();
        assert_eq!(config.instant_fee_bp, 25);
        assert_eq!(config.exchange_rate, 1_020_000_000);
        assert_eq!(config.explorer_url(), "https://testnet.cspr.live");
    }
}
