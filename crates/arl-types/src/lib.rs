//! Foundation types for the Asset Registry Ledger (ARL).
//!
//! Every other ARL crate depends on `arl-types`.
//!
//! # Key Types
//!
//! - [`Record`] — the single ledger entity, keyed by its dealer id
//! - [`Identity`] — an enrolled ledger client (`user@msp`)
//! - [`Transaction`] — the named operations of the asset contract

pub mod identity;
pub mod record;
pub mod transaction;

pub use identity::Identity;
pub use record::Record;
pub use transaction::Transaction;
