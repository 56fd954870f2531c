use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use arl_peer::{LedgerEndpoint, Proposal};
use arl_types::Identity;

use crate::error::{GatewayError, GatewayResult};

/// A client session against a ledger endpoint.
///
/// The session is released when the `Gateway` is dropped or closed, so a
/// handle created inside a request never outlives it.
pub struct Gateway {
    endpoint: Arc<dyn LedgerEndpoint>,
    identity: Identity,
    session_id: Uuid,
}

impl Gateway {
    /// Open a session as `identity`. Fails if the identity is not enrolled.
    pub fn connect(endpoint: Arc<dyn LedgerEndpoint>, identity: Identity) -> GatewayResult<Self> {
        endpoint
            .authenticate(&identity)
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        let session_id = Uuid::now_v7();
        debug!(session = %session_id, identity = %identity, "gateway connected");
        Ok(Self {
            endpoint,
            identity,
            session_id,
        })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Select a channel.
    pub fn network(&self, channel: &str) -> GatewayResult<Network<'_>> {
        if !self.endpoint.has_channel(channel) {
            return Err(GatewayError::Connection(format!(
                "channel not found: {channel}"
            )));
        }
        Ok(Network {
            gateway: self,
            channel: channel.to_string(),
        })
    }

    /// Release the session.
    pub fn close(self) {}
}

impl Drop for Gateway {
    fn drop(&mut self) {
        debug!(session = %self.session_id, "gateway closed");
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("identity", &self.identity)
            .field("session_id", &self.session_id)
            .finish()
    }
}

/// A channel reached through a [`Gateway`].
#[derive(Debug)]
pub struct Network<'g> {
    gateway: &'g Gateway,
    channel: String,
}

impl<'g> Network<'g> {
    pub fn name(&self) -> &str {
        &self.channel
    }

    pub fn contract(&self, name: &str) -> Contract<'g> {
        Contract {
            gateway: self.gateway,
            channel: self.channel.clone(),
            name: name.to_string(),
        }
    }
}

/// A deployed contract reached through a [`Network`].
#[derive(Debug)]
pub struct Contract<'g> {
    gateway: &'g Gateway,
    channel: String,
    name: String,
}

impl Contract<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run a mutating transaction and wait for it to commit.
    pub fn submit_transaction(&self, transaction: &str, args: &[&str]) -> GatewayResult<Vec<u8>> {
        let proposal = self.proposal(transaction, args);
        let receipt = self
            .gateway
            .endpoint
            .submit(&proposal)
            .map_err(|source| GatewayError::Transaction {
                transaction: transaction.to_string(),
                source,
            })?;
        debug!(
            session = %self.gateway.session_id,
            tx_id = %receipt.tx_id,
            transaction,
            "submitted"
        );
        Ok(receipt.payload)
    }

    /// Run a transaction read-only and return its result.
    pub fn evaluate_transaction(&self, transaction: &str, args: &[&str]) -> GatewayResult<Vec<u8>> {
        let proposal = self.proposal(transaction, args);
        self.gateway
            .endpoint
            .evaluate(&proposal)
            .map_err(|source| GatewayError::Transaction {
                transaction: transaction.to_string(),
                source,
            })
    }

    fn proposal(&self, transaction: &str, args: &[&str]) -> Proposal {
        Proposal {
            channel: self.channel.clone(),
            contract: self.name.clone(),
            transaction: transaction.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            creator: self.gateway.identity.clone(),
        }
    }
}
