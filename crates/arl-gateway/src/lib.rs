//! Client SDK for the Asset Registry Ledger.
//!
//! A [`Gateway`] is a session for one enrolled identity against a ledger
//! endpoint. From it, a [`Network`] (channel) yields a [`Contract`] handle
//! that submits or evaluates named transactions with text arguments.
//! [`RecordClient`] layers the typed record operations on top.
//!
//! ```ignore
//! let gateway = Gateway::connect(endpoint, Identity::new("Org1", "User1"))?;
//! let network = gateway.network("mychannel")?;
//! let records = RecordClient::new(network.contract("asset-management"));
//! let record = records.query("D1")?;
//! ```

pub mod error;
pub mod gateway;
pub mod records;

pub use error::{GatewayError, GatewayResult};
pub use gateway::{Contract, Gateway, Network};
pub use records::RecordClient;

// Re-export key types
pub use arl_peer::LedgerEndpoint;
pub use arl_types::{Identity, Record};
