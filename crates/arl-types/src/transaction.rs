use std::fmt;

/// Named transactions exposed by the asset contract.
///
/// Every argument travels as text; numeric arguments are decimal strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transaction {
    /// `Create(dealerId, msisdn, mpin, balance, status, transAmount, transType, remarks)`
    Create,
    /// `Query(dealerId)`
    Query,
    /// `Update(dealerId, balance, status)`
    Update,
}

impl Transaction {
    /// Canonical transaction name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Query => "Query",
            Self::Update => "Update",
        }
    }

    /// Resolve a transaction by name. The `*Asset` spellings are accepted
    /// for clients written against the original contract.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Create" | "CreateAsset" => Some(Self::Create),
            "Query" | "QueryAsset" => Some(Self::Query),
            "Update" | "UpdateAsset" => Some(Self::Update),
            _ => None,
        }
    }

    /// Number of text arguments the transaction takes.
    pub fn arity(&self) -> usize {
        match self {
            Self::Create => 8,
            Self::Query => 1,
            Self::Update => 3,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_and_legacy_names() {
        for tx in [Transaction::Create, Transaction::Query, Transaction::Update] {
            assert_eq!(Transaction::parse(tx.name()), Some(tx));
        }
        assert_eq!(Transaction::parse("CreateAsset"), Some(Transaction::Create));
        assert_eq!(Transaction::parse("QueryAsset"), Some(Transaction::Query));
        assert_eq!(Transaction::parse("UpdateAsset"), Some(Transaction::Update));
        assert_eq!(Transaction::parse("Delete"), None);
    }
}
