use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use arl_contract::{AssetContract, Chaincode, SimulationContext};
use arl_store::{FileWorldState, InMemoryWorldState, WorldState, WriteSet};
use arl_types::Identity;

use crate::config::{NetworkConfig, StateConfig};
use crate::error::{PeerError, PeerResult};
use crate::traits::{LedgerEndpoint, Proposal, TransactionReceipt};

struct Deployment {
    chaincode: Box<dyn Chaincode>,
    state: Box<dyn WorldState>,
}

/// A single ledger peer hosting every channel of a network.
pub struct Peer {
    network: String,
    members: HashSet<Identity>,
    channels: HashMap<String, HashMap<String, Deployment>>,
    commit_lock: Mutex<()>,
    height: AtomicU64,
}

impl Peer {
    /// Create an empty peer with no members and no channels.
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            members: HashSet::new(),
            channels: HashMap::new(),
            commit_lock: Mutex::new(()),
            height: AtomicU64::new(0),
        }
    }

    /// Build a peer from a connection profile, deploying an
    /// [`AssetContract`] for every configured contract.
    pub fn open(config: &NetworkConfig) -> PeerResult<Self> {
        config.validate()?;
        let mut peer = Self::new(config.name.clone());
        for identity in config.identities() {
            peer.enroll(identity);
        }
        for channel in &config.channels {
            peer.channels.entry(channel.name.clone()).or_default();
            for contract in &channel.contracts {
                let state: Box<dyn WorldState> = match &config.state {
                    StateConfig::Memory => Box::new(InMemoryWorldState::new()),
                    StateConfig::File { dir, sync } => {
                        let path = dir.join(&channel.name).join(format!("{}.log", contract.name));
                        Box::new(FileWorldState::open(&path, *sync)?)
                    }
                };
                peer.deploy(
                    &channel.name,
                    &contract.name,
                    Box::new(AssetContract::with_create_mode(contract.create_mode)),
                    state,
                );
            }
        }
        info!(
            network = %peer.network,
            channels = peer.channels.len(),
            members = peer.members.len(),
            "peer opened"
        );
        Ok(peer)
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn enroll(&mut self, identity: Identity) {
        self.members.insert(identity);
    }

    /// Install `chaincode` as `contract` on `channel`, creating the channel
    /// if needed. Replaces any previous deployment under that name.
    pub fn deploy(
        &mut self,
        channel: &str,
        contract: &str,
        chaincode: Box<dyn Chaincode>,
        state: Box<dyn WorldState>,
    ) {
        self.channels
            .entry(channel.to_string())
            .or_default()
            .insert(contract.to_string(), Deployment { chaincode, state });
    }

    /// Number of committed transactions.
    pub fn height(&self) -> u64 {
        self.height.load(Ordering::SeqCst)
    }

    fn deployment(&self, channel: &str, contract: &str) -> PeerResult<&Deployment> {
        let contracts = self
            .channels
            .get(channel)
            .ok_or_else(|| PeerError::UnknownChannel(channel.to_string()))?;
        contracts
            .get(contract)
            .ok_or_else(|| PeerError::UnknownContract {
                channel: channel.to_string(),
                contract: contract.to_string(),
            })
    }

    fn simulate(
        &self,
        deployment: &Deployment,
        tx_id: &str,
        proposal: &Proposal,
    ) -> PeerResult<(Vec<u8>, WriteSet)> {
        let mut ctx = SimulationContext::new(tx_id, proposal.creator.clone(), &*deployment.state);
        let payload = deployment
            .chaincode
            .invoke(&mut ctx, &proposal.transaction, &proposal.args)?;
        Ok((payload, ctx.into_write_set()))
    }
}

impl LedgerEndpoint for Peer {
    fn authenticate(&self, identity: &Identity) -> PeerResult<()> {
        if self.members.contains(identity) {
            Ok(())
        } else {
            Err(PeerError::UnknownIdentity(identity.to_string()))
        }
    }

    fn has_channel(&self, channel: &str) -> bool {
        self.channels.contains_key(channel)
    }

    fn submit(&self, proposal: &Proposal) -> PeerResult<TransactionReceipt> {
        self.authenticate(&proposal.creator)?;
        let deployment = self.deployment(&proposal.channel, &proposal.contract)?;
        let tx_id = Uuid::now_v7().to_string();

        let _guard = self.commit_lock.lock().expect("commit lock poisoned");
        let (payload, writes) = self.simulate(deployment, &tx_id, proposal)?;
        deployment.state.apply(&writes)?;
        let height = self.height.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            tx_id = %tx_id,
            channel = %proposal.channel,
            contract = %proposal.contract,
            transaction = %proposal.transaction,
            writes = writes.len(),
            height,
            "transaction committed"
        );
        Ok(TransactionReceipt {
            tx_id,
            height,
            payload,
            committed_at: Utc::now(),
        })
    }

    fn evaluate(&self, proposal: &Proposal) -> PeerResult<Vec<u8>> {
        self.authenticate(&proposal.creator)?;
        let deployment = self.deployment(&proposal.channel, &proposal.contract)?;
        let tx_id = Uuid::now_v7().to_string();

        let (payload, writes) = self.simulate(deployment, &tx_id, proposal)?;
        debug!(
            tx_id = %tx_id,
            transaction = %proposal.transaction,
            discarded_writes = writes.len(),
            "transaction evaluated"
        );
        Ok(payload)
    }
}

impl std::fmt::Debug for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Peer")
            .field("network", &self.network)
            .field("channels", &self.channels.keys().collect::<Vec<_>>())
            .field("height", &self.height())
            .finish()
    }
}
