use arl_store::StoreError;

/// Errors produced by contract transactions.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("record {0} does not exist")]
    NotFound(String),

    #[error("record {0} already exists")]
    AlreadyExists(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("unknown transaction: {0}")]
    UnknownTransaction(String),

    #[error("transaction {transaction} expects {expected} arguments, got {actual}")]
    ArgumentCount {
        transaction: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid argument {position} ({value:?}): {reason}")]
    InvalidArgument {
        position: usize,
        value: String,
        reason: String,
    },
}

impl ContractError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type ContractResult<T> = Result<T, ContractError>;
