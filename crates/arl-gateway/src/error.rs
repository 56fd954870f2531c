use thiserror::Error;

use arl_peer::PeerError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to connect to gateway: {0}")]
    Connection(String),

    #[error("transaction {transaction} failed: {source}")]
    Transaction {
        transaction: String,
        #[source]
        source: PeerError,
    },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Whether the ledger reported that the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Transaction { source, .. } if source.is_not_found())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
