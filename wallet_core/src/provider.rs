//! Wallet provider capability and the connect flow.
//!
//! In a browser the provider is an object injected by the wallet extension;
//! here it is any type implementing [`WalletProvider`]. Its absence is an
//! ordinary condition, expressed by passing `None` to [`connect_wallet`].

use std::future::Future;

use tracing::{info, warn};

use casperflow_types::PublicKeyHex;

use crate::error::WalletError;

/// The operations a wallet provider exposes.
pub trait WalletProvider: Send + Sync {
    /// Ask the user to approve a connection.
    fn request_connection(&self) -> impl Future<Output = Result<(), WalletError>> + Send;

    /// Whether the site is currently connected.
    fn is_connected(&self) -> impl Future<Output = Result<bool, WalletError>> + Send;

    /// The hex public key of the active account, if any.
    fn active_public_key(
        &self,
    ) -> impl Future<Output = Result<Option<String>, WalletError>> + Send;
}

/// Connect to the wallet and return the active account.
///
/// - No provider: [`WalletError::ProviderUnavailable`], nothing is called.
/// - Provider failure: [`WalletError::Provider`].
/// - Not connected after the request, or no active key:
///   [`WalletError::ConnectionDeclined`].
/// - A key that is not valid hex: [`WalletError::InvalidAccount`].
pub async fn connect_wallet<P: WalletProvider>(
    provider: Option<&P>,
) -> Result<PublicKeyHex, WalletError> {
    let provider = provider.ok_or(WalletError::ProviderUnavailable)?;

    if let Err(e) = provider.request_connection().await {
        warn!("wallet connection request failed: {e}");
        return Err(e);
    }

    if !provider.is_connected().await? {
        return Err(WalletError::ConnectionDeclined);
    }

    let raw = provider
        .active_public_key()
        .await?
        .ok_or(WalletError::ConnectionDeclined)?;
    let key = PublicKeyHex::parse(raw)?;

    info!(account = %key, algorithm = ?key.algorithm(), "wallet connected");
    Ok(key)
}

/// A provider backed by a fixed public key.
///
/// Used where no browser extension exists (the CLI, scripts). It is always
/// connected once a connection has been requested.
#[derive(Clone, Debug)]
pub struct StaticWalletProvider {
    public_key: String,
}

impl StaticWalletProvider {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
        }
    }
}

impl WalletProvider for StaticWalletProvider {
    async fn request_connection(&self) -> Result<(), WalletError> {
        Ok(())
    }

    async fn is_connected(&self) -> Result<bool, WalletError> {
        Ok(true)
    }

    async fn active_public_key(&self) -> Result<Option<String>, WalletError> {
        Ok(Some(self.public_key.clone()))
    }
}
