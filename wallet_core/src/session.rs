//! A connected staking session.
//!
//! Ties the pieces together the way a front-end uses them: connect the
//! wallet and show the balance, submit a stake or unstake, poll its status
//! until it settles, then update the staked total and refresh the balance.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use casperflow_rpc::{ChainClient, DeployWatcher, RpcTransport};
use casperflow_types::{DeployStatus, Motes, PublicKeyHex};

use crate::error::WalletError;
use crate::provider::{connect_wallet, WalletProvider};
use crate::staking::{StakingDesk, SubmissionReceipt};

/// Result of a submission once its status settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub receipt: SubmissionReceipt,
    pub status: DeployStatus,
    /// Display balance after the submission settled.
    pub balance: String,
}

pub struct StakingSession<T> {
    client: Arc<ChainClient<T>>,
    desk: StakingDesk,
    account: PublicKeyHex,
    balance: String,
    total_staked: Motes,
}

impl<T: RpcTransport + 'static> StakingSession<T> {
    /// Connect the wallet and fetch the initial balance.
    pub async fn connect<P: WalletProvider>(
        client: Arc<ChainClient<T>>,
        desk: StakingDesk,
        provider: Option<&P>,
    ) -> Result<Self, WalletError> {
        let account = connect_wallet(provider).await?;
        let balance = client.account_balance(&account).await;
        Ok(Self {
            client,
            desk,
            account,
            balance,
            total_staked: Motes::ZERO,
        })
    }

    pub fn account(&self) -> &PublicKeyHex {
        &self.account
    }

    /// Last fetched display balance.
    pub fn balance(&self) -> &str {
        &self.balance
    }

    /// Amount staked through this session and not yet unstaked.
    pub fn total_staked(&self) -> Motes {
        self.total_staked
    }

    pub async fn refresh_balance(&mut self) -> &str {
        self.balance = self.client.account_balance(&self.account).await;
        &self.balance
    }

    /// Start polling the status of a receipt's deploy.
    pub fn watch(&self, receipt: &SubmissionReceipt, interval: Duration) -> DeployWatcher {
        DeployWatcher::spawn(
            Arc::clone(&self.client),
            receipt.deploy_hash.clone(),
            interval,
        )
    }

    /// Stake `amount` and wait for the deploy to settle.
    ///
    /// On success the amount is added to the staked total and the balance
    /// is refreshed.
    pub async fn stake(
        &mut self,
        amount: Motes,
        interval: Duration,
    ) -> Result<SessionOutcome, WalletError> {
        let receipt = self.desk.stake(&self.account, amount)?;
        let status = self.watch(&receipt, interval).wait().await;

        if status == DeployStatus::Success {
            self.total_staked = self.total_staked.saturating_add(amount);
            self.refresh_balance().await;
            info!(account = %self.account, total_staked = %self.total_staked, "stake settled");
        }

        Ok(SessionOutcome {
            receipt,
            status,
            balance: self.balance.clone(),
        })
    }

    /// Unstake everything staked in this session and wait for it to settle.
    ///
    /// On success the staked total is reset and the balance is refreshed.
    pub async fn unstake_all(
        &mut self,
        instant: bool,
        interval: Duration,
    ) -> Result<SessionOutcome, WalletError> {
        if self.total_staked.is_zero() {
            return Err(WalletError::NothingStaked);
        }

        let receipt = self.desk.unstake(&self.account, self.total_staked, instant)?;
        let status = self.watch(&receipt, interval).wait().await;

        if status == DeployStatus::Success {
            self.total_staked = Motes::ZERO;
            self.refresh_balance().await;
            info!(account = %self.account, "unstake settled");
        }

        Ok(SessionOutcome {
            receipt,
            status,
            balance: self.balance.clone(),
        })
    }
}
