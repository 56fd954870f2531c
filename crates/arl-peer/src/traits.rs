use chrono::{DateTime, Utc};

use arl_types::Identity;

use crate::error::PeerResult;

/// A named transaction invocation, as sent by a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub channel: String,
    pub contract: String,
    pub transaction: String,
    pub args: Vec<String>,
    pub creator: Identity,
}

/// Outcome of a committed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub tx_id: String,
    /// Number of transactions committed by the peer, this one included.
    pub height: u64,
    pub payload: Vec<u8>,
    pub committed_at: DateTime<Utc>,
}

/// Transaction boundary between ledger clients and the peer.
///
/// Clients never reach world state directly; everything goes through a
/// [`Proposal`].
pub trait LedgerEndpoint: Send + Sync {
    /// Fails unless `identity` is enrolled.
    fn authenticate(&self, identity: &Identity) -> PeerResult<()>;

    fn has_channel(&self, channel: &str) -> bool;

    /// Run a mutating transaction and commit its writes.
    fn submit(&self, proposal: &Proposal) -> PeerResult<TransactionReceipt>;

    /// Run a transaction read-only and return its payload.
    fn evaluate(&self, proposal: &Proposal) -> PeerResult<Vec<u8>>;
}
