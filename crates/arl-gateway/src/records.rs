use arl_types::{Record, Transaction};

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::Contract;

/// Typed access to the asset contract.
///
/// Numeric fields travel as decimal text, the only form the transaction
/// channel carries.
#[derive(Debug)]
pub struct RecordClient<'g> {
    contract: Contract<'g>,
}

impl<'g> RecordClient<'g> {
    pub fn new(contract: Contract<'g>) -> Self {
        Self { contract }
    }

    /// Submit `Create` with every field of `record`.
    pub fn create(&self, record: &Record) -> GatewayResult<()> {
        let balance = record.balance.to_string();
        let trans_amount = record.trans_amount.to_string();
        self.contract.submit_transaction(
            Transaction::Create.name(),
            &[
                record.dealer_id.as_str(),
                record.msisdn.as_str(),
                record.mpin.as_str(),
                balance.as_str(),
                record.status.as_str(),
                trans_amount.as_str(),
                record.trans_type.as_str(),
                record.remarks.as_str(),
            ],
        )?;
        Ok(())
    }

    /// Evaluate `Query` and decode the stored record.
    pub fn query(&self, dealer_id: &str) -> GatewayResult<Record> {
        let bytes = self
            .contract
            .evaluate_transaction(Transaction::Query.name(), &[dealer_id])?;
        Record::from_json_bytes(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Submit `Update` with the two mutable fields.
    pub fn update(&self, dealer_id: &str, balance: i64, status: &str) -> GatewayResult<()> {
        let balance = balance.to_string();
        self.contract.submit_transaction(
            Transaction::Update.name(),
            &[dealer_id, balance.as_str(), status],
        )?;
        Ok(())
    }
}
