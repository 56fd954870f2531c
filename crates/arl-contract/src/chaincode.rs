use arl_types::{Record, Transaction};

use crate::context::TransactionContext;
use crate::contract::AssetContract;
use crate::error::{ContractError, ContractResult};

/// Entry point the peer uses to run a named transaction.
///
/// Arguments arrive as text. The returned payload is handed back to the
/// client unchanged.
pub trait Chaincode: Send + Sync {
    fn invoke(
        &self,
        ctx: &mut dyn TransactionContext,
        function: &str,
        args: &[String],
    ) -> ContractResult<Vec<u8>>;
}

impl Chaincode for AssetContract {
    fn invoke(
        &self,
        ctx: &mut dyn TransactionContext,
        function: &str,
        args: &[String],
    ) -> ContractResult<Vec<u8>> {
        let tx = Transaction::parse(function)
            .ok_or_else(|| ContractError::UnknownTransaction(function.to_string()))?;
        if args.len() != tx.arity() {
            return Err(ContractError::ArgumentCount {
                transaction: tx.name().to_string(),
                expected: tx.arity(),
                actual: args.len(),
            });
        }

        match tx {
            Transaction::Create => {
                let record = Record {
                    dealer_id: args[0].clone(),
                    msisdn: args[1].clone(),
                    mpin: args[2].clone(),
                    balance: parse_int(args, 3)?,
                    status: args[4].clone(),
                    trans_amount: parse_int(args, 5)?,
                    trans_type: args[6].clone(),
                    remarks: args[7].clone(),
                };
                self.create(ctx, &record)?;
                Ok(Vec::new())
            }
            Transaction::Query => {
                let record = self.query(&*ctx, &args[0])?;
                record
                    .to_json_bytes()
                    .map_err(|e| ContractError::Serialization(e.to_string()))
            }
            Transaction::Update => {
                let balance = parse_int(args, 1)?;
                self.update(ctx, &args[0], balance, &args[2])?;
                Ok(Vec::new())
            }
        }
    }
}

fn parse_int(args: &[String], position: usize) -> ContractResult<i64> {
    let value = &args[position];
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| ContractError::InvalidArgument {
            position,
            value: value.clone(),
            reason: e.to_string(),
        })
}
