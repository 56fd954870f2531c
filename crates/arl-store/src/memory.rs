use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreResult;
use crate::traits::WorldState;
use crate::write_set::WriteSet;

/// In-memory, HashMap-based world state.
///
/// Intended for tests and embedding. Values live behind a `RwLock`; a write
/// set is installed under a single write guard so readers never see half of
/// a commit.
pub struct InMemoryWorldState {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryWorldState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryWorldState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldState for InMemoryWorldState {
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn apply(&self, writes: &WriteSet) -> StoreResult<()> {
        let mut map = self.entries.write().expect("lock poisoned");
        for (key, value) in writes.iter() {
            map.insert(key.to_string(), value.to_vec());
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }
}

impl std::fmt::Debug for InMemoryWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryWorldState")
            .field("key_count", &self.len())
            .finish()
    }
}
