use arl_contract::ContractError;
use arl_store::StoreError;

/// Errors produced by the ledger peer.
#[derive(Debug, thiserror::Error)]
pub enum PeerError {
    #[error("identity {0} is not enrolled in the network")]
    UnknownIdentity(String),

    #[error("channel not found: {0}")]
    UnknownChannel(String),

    #[error("contract {contract} is not deployed on channel {channel}")]
    UnknownContract { channel: String, contract: String },

    #[error("{0}")]
    Contract(#[from] ContractError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PeerError {
    /// Whether the transaction failed because the record key is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Contract(e) if e.is_not_found())
    }
}

pub type PeerResult<T> = Result<T, PeerError>;
