//! World state storage for the Asset Registry Ledger.
//!
//! The world state is the current value of every ledger key. Contracts
//! never write it directly: a transaction collects its writes in a
//! [`WriteSet`], and the peer applies that set atomically on commit.
//!
//! # Storage Backends
//!
//! All backends implement the [`WorldState`] trait:
//!
//! - [`InMemoryWorldState`] -- `HashMap`-based state for tests and embedding
//! - [`FileWorldState`] -- write-ahead logged state that survives restarts
//!
//! # Design Rules
//!
//! 1. Keys are non-empty UTF-8 strings; values are opaque bytes.
//! 2. `apply` is all-or-nothing: readers observe either none or all of a write set.
//! 3. The store never interprets values.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;
pub mod write_set;

pub use error::{StoreError, StoreResult};
pub use file::{FileWorldState, SyncMode};
pub use memory::InMemoryWorldState;
pub use traits::{validate_key, WorldState};
pub use write_set::WriteSet;
