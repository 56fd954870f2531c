//! Asset record contract for the Asset Registry Ledger (ARL).
//!
//! This crate is the ledger-side logic. It provides:
//! - [`AssetContract`] with the `Create` / `Query` / `Update` record lifecycle
//! - [`TransactionContext`], the state view a peer hands to a running transaction
//! - [`SimulationContext`], which reads committed state and stages writes
//! - [`Chaincode`], the named-transaction entry point with text arguments
//!
//! The contract performs no locking. Ordering of concurrent writes to the
//! same key is the peer's job.

pub mod chaincode;
pub mod context;
pub mod contract;
pub mod error;

pub use chaincode::Chaincode;
pub use context::{SimulationContext, TransactionContext};
pub use contract::{AssetContract, CreateMode};
pub use error::{ContractError, ContractResult};
