use serde::{Deserialize, Serialize};

/// A dealer asset record stored on the ledger under [`Record::dealer_id`].
///
/// The JSON shape is fixed by the REST surface and by what is already
/// stored on the ledger. Absent fields decode to their zero value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Record {
    /// Ledger key. Immutable once created.
    pub dealer_id: String,
    /// Mobile number associated with the dealer; not used for lookup.
    pub msisdn: String,
    /// Opaque credential, stored verbatim.
    pub mpin: String,
    pub balance: i64,
    pub status: String,
    /// Amount of the last recorded transaction.
    pub trans_amount: i64,
    /// Free-form label of the last recorded transaction.
    pub trans_type: String,
    pub remarks: String,
}

impl Record {
    /// Encode as the JSON bytes stored on the ledger.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decode from ledger JSON bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Overwrite the two mutable fields, leaving everything else intact.
    pub fn apply_update(&mut self, balance: i64, status: impl Into<String>) {
        self.balance = balance;
        self.status = status.into();
    }
}
