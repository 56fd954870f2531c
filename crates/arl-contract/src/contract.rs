use serde::{Deserialize, Serialize};
use tracing::debug;

use arl_types::Record;

use crate::context::TransactionContext;
use crate::error::{ContractError, ContractResult};

/// What `Create` does when the key already holds a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreateMode {
    /// Replace the stored record unconditionally.
    #[default]
    Overwrite,
    /// Fail with [`ContractError::AlreadyExists`].
    RejectExisting,
}

/// The asset record contract.
#[derive(Clone, Debug, Default)]
pub struct AssetContract {
    create_mode: CreateMode,
}

impl AssetContract {
    /// Name the contract is deployed under by default.
    pub const DEFAULT_NAME: &'static str = "asset-management";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_mode(create_mode: CreateMode) -> Self {
        Self { create_mode }
    }

    /// Store `record` under its dealer id.
    pub fn create<C>(&self, ctx: &mut C, record: &Record) -> ContractResult<()>
    where
        C: TransactionContext + ?Sized,
    {
        if self.create_mode == CreateMode::RejectExisting
            && ctx.get_state(&record.dealer_id)?.is_some()
        {
            return Err(ContractError::AlreadyExists(record.dealer_id.clone()));
        }
        self.write(ctx, record)?;
        debug!(tx_id = ctx.tx_id(), key = %record.dealer_id, "record created");
        Ok(())
    }

    /// Load the record stored under `dealer_id`.
    pub fn query<C>(&self, ctx: &C, dealer_id: &str) -> ContractResult<Record>
    where
        C: TransactionContext + ?Sized,
    {
        let bytes = ctx
            .get_state(dealer_id)?
            .ok_or_else(|| ContractError::NotFound(dealer_id.to_string()))?;
        Record::from_json_bytes(&bytes)
            .map_err(|e| ContractError::Serialization(format!("failed to decode record: {e}")))
    }

    /// Replace `balance` and `status` of an existing record.
    pub fn update<C>(
        &self,
        ctx: &mut C,
        dealer_id: &str,
        balance: i64,
        status: &str,
    ) -> ContractResult<()>
    where
        C: TransactionContext + ?Sized,
    {
        let mut record = self.query(&*ctx, dealer_id)?;
        record.apply_update(balance, status);
        self.write(ctx, &record)?;
        debug!(tx_id = ctx.tx_id(), key = dealer_id, balance, status, "record updated");
        Ok(())
    }

    fn write<C>(&self, ctx: &mut C, record: &Record) -> ContractResult<()>
    where
        C: TransactionContext + ?Sized,
    {
        let bytes = record
            .to_json_bytes()
            .map_err(|e| ContractError::Serialization(format!("failed to encode record: {e}")))?;
        ctx.put_state(&record.dealer_id, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SimulationContext;
    use arl_store::{InMemoryWorldState, StoreError, WorldState};
    use arl_types::Identity;

    fn d1() -> Record {
        Record {
            dealer_id: "D1".into(),
            msisdn: "9990001111".into(),
            mpin: "1234".into(),
            balance: 100,
            status: "active".into(),
            trans_amount: 0,
            trans_type: String::new(),
            remarks: "init".into(),
        }
    }

    /// Run `f` in a fresh context and commit whatever it staged.
    fn commit<T>(
        state: &InMemoryWorldState,
        f: impl FnOnce(&mut SimulationContext<'_>) -> ContractResult<T>,
    ) -> ContractResult<T> {
        let mut ctx = SimulationContext::new("tx", Identity::default(), state);
        let out = f(&mut ctx)?;
        state.apply(ctx.write_set())?;
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Create / Query
    // -----------------------------------------------------------------------

    #[test]
    fn create_then_query_returns_same_record() {
        let state = InMemoryWorldState::new();
        let contract = AssetContract::new();
        commit(&state, |ctx| contract.create(ctx, &d1())).unwrap();

        let got = commit(&state, |ctx| contract.query(&*ctx, "D1")).unwrap();
        assert_eq!(got, d1());
    }

    #[test]
    fn query_unknown_key_is_not_found() {
        let state = InMemoryWorldState::new();
        let contract = AssetContract::new();
        let err = commit(&state, |ctx| contract.query(&*ctx, "ghost")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "record ghost does not exist");
    }

    #[test]
    fn query_undecodable_bytes_is_serialization_error() {
        let state = InMemoryWorldState::new();
        state.put_state("bad", b"{not json".to_vec()).unwrap();
        let contract = AssetContract::new();
        let err = commit(&state, |ctx| contract.query(&*ctx, "bad")).unwrap_err();
        assert!(matches!(err, ContractError::Serialization(_)));
    }

    #[test]
    fn create_overwrites_by_default() {
        let state = InMemoryWorldState::new();
        let contract = AssetContract::new();
        commit(&state, |ctx| contract.create(ctx, &d1())).unwrap();

        let mut second = d1();
        second.msisdn = "0000000000".into();
        commit(&state, |ctx| contract.create(ctx, &second)).unwrap();

        let got = commit(&state, |ctx| contract.query(&*ctx, "D1")).unwrap();
        assert_eq!(got, second);
    }

    #[test]
    fn reject_existing_mode_refuses_duplicate() {
        let state = InMemoryWorldState::new();
        let contract = AssetContract::with_create_mode(CreateMode::RejectExisting);
        commit(&state, |ctx| contract.create(ctx, &d1())).unwrap();

        let err = commit(&state, |ctx| contract.create(ctx, &d1())).unwrap_err();
        assert!(matches!(err, ContractError::AlreadyExists(ref k) if k == "D1"));
    }

    #[test]
    fn create_with_empty_key_is_storage_error() {
        let state = InMemoryWorldState::new();
        let contract = AssetContract::new();
        let mut record = d1();
        record.dealer_id.clear();
        let err = commit(&state, |ctx| contract.create(ctx, &record)).unwrap_err();
        assert!(matches!(err, ContractError::Storage(StoreError::EmptyKey)));
        assert!(state.is_empty());
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[test]
    fn update_changes_only_balance_and_status() {
        let state = InMemoryWorldState::new();
        let contract = AssetContract::new();
        commit(&state, |ctx| contract.create(ctx, &d1())).unwrap();
        commit(&state, |ctx| contract.update(ctx, "D1", 150, "inactive")).unwrap();

        let got = commit(&state, |ctx| contract.query(&*ctx, "D1")).unwrap();
        let mut expected = d1();
        expected.balance = 150;
        expected.status = "inactive".into();
        assert_eq!(got, expected);
        assert_eq!(got.msisdn, "9990001111");
    }

    #[test]
    fn update_unknown_key_stages_no_write() {
        let state = InMemoryWorldState::new();
        let contract = AssetContract::new();
        let mut ctx = SimulationContext::new("tx", Identity::default(), &state);

        let err = contract.update(&mut ctx, "ghost", 1, "x").unwrap_err();
        assert!(err.is_not_found());
        assert!(ctx.write_set().is_empty());
    }

    // -----------------------------------------------------------------------
    // Storage failures
    // -----------------------------------------------------------------------

    /// World state whose backend is unreachable.
    struct Unavailable;

    impl WorldState for Unavailable {
        fn get_state(&self, _key: &str) -> arl_store::StoreResult<Option<Vec<u8>>> {
            Err(StoreError::Io(std::io::Error::other("backend offline")))
        }

        fn apply(&self, _writes: &arl_store::WriteSet) -> arl_store::StoreResult<()> {
            Err(StoreError::Io(std::io::Error::other("backend offline")))
        }

        fn len(&self) -> usize {
            0
        }
    }

    #[test]
    fn failed_read_surfaces_as_storage_error() {
        let contract = AssetContract::new();
        let mut ctx = SimulationContext::new("tx", Identity::default(), &Unavailable);

        let err = contract.query(&ctx, "D1").unwrap_err();
        assert!(matches!(err, ContractError::Storage(StoreError::Io(_))));
        assert!(!err.is_not_found());

        let err = contract.update(&mut ctx, "D1", 1, "x").unwrap_err();
        assert!(matches!(err, ContractError::Storage(StoreError::Io(_))));
        assert!(ctx.write_set().is_empty());

        let strict = AssetContract::with_create_mode(CreateMode::RejectExisting);
        let err = strict.create(&mut ctx, &d1()).unwrap_err();
        assert!(matches!(err, ContractError::Storage(_)));
        assert!(ctx.write_set().is_empty());
    }

    #[test]
    fn create_mode_deserializes_kebab_case() {
        let mode: CreateMode = serde_json::from_str("\"reject-existing\"").unwrap();
        assert_eq!(mode, CreateMode::RejectExisting);
        assert_eq!(CreateMode::default(), CreateMode::Overwrite);
    }
}
