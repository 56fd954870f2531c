/// Errors from world state operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Ledger keys must be non-empty.
    #[error("key must not be an empty string")]
    EmptyKey,

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure of a log frame.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
