use std::fmt;

use serde::{Deserialize, Serialize};

/// A client identity as enrolled with the ledger network.
///
/// Identities are addressed by their organization (MSP id) and a user label
/// within it, e.g. `User1@Org1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub msp_id: String,
    pub user: String,
}

impl Identity {
    pub fn new(msp_id: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            msp_id: msp_id.into(),
            user: user.into(),
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new("Org1", "User1")
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.msp_id)
    }
}
