//! Wallet core library for CasperFlow.
//!
//! Provides everything a front-end needs besides presentation:
//! - Wallet provider capability and the connect flow
//! - Stake / unstake placeholders producing structured receipts
//! - Unstake quotes (exchange rate and instant fee)
//! - A staking session tying connect, submit, status polling and balance
//!   refresh together

pub mod error;
pub mod provider;
pub mod session;
pub mod staking;

pub use error::WalletError;
pub use provider::{connect_wallet, StaticWalletProvider, WalletProvider};
pub use session::{SessionOutcome, StakingSession};
pub use staking::{StakeAction, StakingConfig, StakingDesk, SubmissionReceipt, UnstakeQuote};
