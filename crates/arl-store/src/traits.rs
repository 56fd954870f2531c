use crate::error::{StoreError, StoreResult};
use crate::write_set::WriteSet;

/// Key-value world state of a single contract namespace.
///
/// All implementations must satisfy these invariants:
/// - `get_state` observes only committed values.
/// - `apply` installs every entry of the write set or none of them.
/// - Writes to the same key are last-write-wins.
pub trait WorldState: Send + Sync {
    /// Read the committed value under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored there.
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Atomically install every write in `writes`.
    fn apply(&self, writes: &WriteSet) -> StoreResult<()>;

    /// Number of keys currently holding a value.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write a single key. Default implementation applies a one-entry set.
    fn put_state(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        let mut writes = WriteSet::new();
        writes.put(key, value)?;
        self.apply(&writes)
    }
}

/// Reject keys the ledger cannot address.
pub fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::EmptyKey);
    }
    Ok(())
}
