use arl_store::{StoreResult, WorldState, WriteSet};
use arl_types::Identity;

/// State access granted to a running transaction.
pub trait TransactionContext {
    /// Peer-assigned transaction id.
    fn tx_id(&self) -> &str;

    /// Identity that proposed the transaction.
    fn creator(&self) -> &Identity;

    /// Read the committed value under `key`.
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Stage a write under `key`.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()>;
}

/// Runs a transaction against committed state without touching it.
///
/// Reads go straight to the world state and do not observe this
/// transaction's own staged writes. Writes accumulate in a [`WriteSet`]
/// that the peer either commits or discards.
pub struct SimulationContext<'a> {
    tx_id: String,
    creator: Identity,
    state: &'a dyn WorldState,
    writes: WriteSet,
}

impl<'a> SimulationContext<'a> {
    pub fn new(tx_id: impl Into<String>, creator: Identity, state: &'a dyn WorldState) -> Self {
        Self {
            tx_id: tx_id.into(),
            creator,
            state,
            writes: WriteSet::new(),
        }
    }

    pub fn write_set(&self) -> &WriteSet {
        &self.writes
    }

    pub fn into_write_set(self) -> WriteSet {
        self.writes
    }
}

impl TransactionContext for SimulationContext<'_> {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn creator(&self) -> &Identity {
        &self.creator
    }

    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.state.get_state(key)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.writes.put(key, value)
    }
}
