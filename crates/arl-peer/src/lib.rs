//! In-process ledger peer for the Asset Registry Ledger.
//!
//! The peer hosts contracts on named channels, each over its own world
//! state, and gives clients the two ledger paths:
//! - **submit**: simulate, then commit the write set atomically under the
//!   peer's commit lock, so mutating transactions are totally ordered
//! - **evaluate**: simulate against committed state and discard the writes
//!
//! Only identities enrolled through the [`NetworkConfig`] may transact.

pub mod config;
pub mod error;
pub mod peer;
pub mod traits;

pub use config::{ChannelConfig, ContractConfig, NetworkConfig, OrganizationConfig, StateConfig};
pub use error::{PeerError, PeerResult};
pub use peer::Peer;
pub use traits::{LedgerEndpoint, Proposal, TransactionReceipt};
