//! Nullable infrastructure for deterministic testing.
//!
//! The client's external dependencies (the JSON-RPC endpoint and the
//! browser-injected wallet provider) sit behind traits. This crate provides
//! test-friendly implementations that:
//! - Return scripted values
//! - Record every call for assertions
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod transport;
pub mod wallet;

pub use transport::NullTransport;
pub use wallet::NullWalletProvider;
