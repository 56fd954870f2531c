use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::traits::validate_key;

/// Writes staged by one transaction, keyed and ordered by ledger key.
///
/// A later write to the same key replaces the earlier one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteSet {
    writes: BTreeMap<String, Vec<u8>>,
}

impl WriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a write. Fails on an empty key.
    pub fn put(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        validate_key(key)?;
        self.writes.insert(key.to_string(), value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.writes.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.writes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
