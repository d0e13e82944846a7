use casperflow_types::CasperFlowError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("no wallet provider is available")]
    ProviderUnavailable,

    #[error("wallet connection was declined")]
    ConnectionDeclined,

    #[error("wallet provider error: {0}")]
    Provider(String),

    #[error("invalid account: {0}")]
    InvalidAccount(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("nothing staked in this session")]
    NothingStaked,

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

impl From<CasperFlowError> for WalletError {
    fn from(e: CasperFlowError) -> Self {
        match e {
            CasperFlowError::InvalidPublicKey(msg) => WalletError::InvalidAccount(msg),
            CasperFlowError::InvalidAmount(msg) => WalletError::InvalidAmount(msg),
            CasperFlowError::AmountOverflow => {
                WalletError::InvalidAmount(CasperFlowError::AmountOverflow.to_string())
            }
            CasperFlowError::UnknownNetwork(name) => WalletError::UnknownNetwork(name),
        }
    }
}
