//! Nullable wallet provider: scripted connection outcomes.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use casperflow_wallet_core::{WalletError, WalletProvider};

/// A wallet provider whose behaviour is fixed at construction.
pub struct NullWalletProvider {
    public_key: Option<String>,
    approves: bool,
    failure: Option<String>,
    connected: AtomicBool,
    connection_requests: AtomicUsize,
}

impl NullWalletProvider {
    /// A provider that approves the connection and reports `public_key`.
    pub fn approving(public_key: &str) -> Self {
        Self::build(Some(public_key.to_string()), true, None)
    }

    /// A provider whose user declines the connection.
    pub fn declining() -> Self {
        Self::build(None, false, None)
    }

    /// A provider that connects but has no active account.
    pub fn without_account() -> Self {
        Self::build(None, true, None)
    }

    /// A provider whose connection request itself errors.
    pub fn failing(reason: &str) -> Self {
        Self::build(None, false, Some(reason.to_string()))
    }

    fn build(public_key: Option<String>, approves: bool, failure: Option<String>) -> Self {
        Self {
            public_key,
            approves,
            failure,
            connected: AtomicBool::new(false),
            connection_requests: AtomicUsize::new(0),
        }
    }

    /// How many times a connection was requested.
    pub fn connection_requests(&self) -> usize {
        self.connection_requests.load(Ordering::SeqCst)
    }
}

impl WalletProvider for NullWalletProvider {
    async fn request_connection(&self) -> Result<(), WalletError> {
        self.connection_requests.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.failure {
            return Err(WalletError::Provider(reason.clone()));
        }
        self.connected.store(self.approves, Ordering::SeqCst);
        Ok(())
    }

    async fn is_connected(&self) -> Result<bool, WalletError> {
        Ok(self.connected.load(Ordering::SeqCst))
    }

    async fn active_public_key(&self) -> Result<Option<String>, WalletError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.public_key.clone())
    }
}
