//! Fundamental types for the CasperFlow staking client.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identifiers, state and purse references, mote amounts, deploy
//! references and statuses, and network identifiers.

pub mod account;
pub mod amount;
pub mod deploy;
pub mod error;
pub mod network;
pub mod state;

pub use account::{KeyAlgorithm, PublicKeyHex};
pub use amount::{Motes, MOTES_PER_CSPR};
pub use deploy::{DeployHash, DeployStatus};
pub use error::CasperFlowError;
pub use network::NetworkId;
pub use state::{PurseUref, StateRootHash};
