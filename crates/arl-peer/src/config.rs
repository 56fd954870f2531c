use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use arl_contract::{AssetContract, CreateMode};
use arl_store::SyncMode;
use arl_types::Identity;

use crate::error::{PeerError, PeerResult};

/// Connection profile of a ledger network: who may transact, which channels
/// exist, and what is deployed on them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub name: String,
    pub state: StateConfig,
    pub organizations: Vec<OrganizationConfig>,
    pub channels: Vec<ChannelConfig>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "local".into(),
            state: StateConfig::Memory,
            organizations: vec![OrganizationConfig {
                msp_id: "Org1".into(),
                users: vec!["User1".into()],
            }],
            channels: vec![ChannelConfig {
                name: "mychannel".into(),
                contracts: vec![ContractConfig {
                    name: AssetContract::DEFAULT_NAME.into(),
                    create_mode: CreateMode::default(),
                }],
            }],
        }
    }
}

/// Where each deployed contract keeps its world state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "kebab-case")]
pub enum StateConfig {
    Memory,
    /// One log file per channel/contract pair under `dir`.
    File {
        dir: PathBuf,
        #[serde(default)]
        sync: SyncMode,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationConfig {
    pub msp_id: String,
    #[serde(default)]
    pub users: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub name: String,
    #[serde(default)]
    pub contracts: Vec<ContractConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    pub name: String,
    #[serde(default)]
    pub create_mode: CreateMode,
}

impl NetworkConfig {
    /// Read a TOML connection profile.
    pub fn load(path: &Path) -> PeerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> PeerResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| PeerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Every enrolled identity.
    pub fn identities(&self) -> impl Iterator<Item = Identity> + '_ {
        self.organizations.iter().flat_map(|org| {
            org.users
                .iter()
                .map(move |user| Identity::new(org.msp_id.clone(), user.clone()))
        })
    }

    /// Reject profiles the peer cannot host. Channel and contract names also
    /// name the state log directory and file, so they must be plain path
    /// components.
    pub fn validate(&self) -> PeerResult<()> {
        let mut channels = HashSet::new();
        for channel in &self.channels {
            validate_name("channel", &channel.name)?;
            if !channels.insert(channel.name.as_str()) {
                return Err(PeerError::Config(format!(
                    "duplicate channel: {}",
                    channel.name
                )));
            }
            let mut contracts = HashSet::new();
            for contract in &channel.contracts {
                validate_name("contract", &contract.name)?;
                if !contracts.insert(contract.name.as_str()) {
                    return Err(PeerError::Config(format!(
                        "duplicate contract {} on channel {}",
                        contract.name, channel.name
                    )));
                }
            }
        }
        Ok(())
    }
}

fn validate_name(kind: &str, name: &str) -> PeerResult<()> {
    if name.is_empty() {
        return Err(PeerError::Config(format!("{kind} name must not be empty")));
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(PeerError::Config(format!("invalid {kind} name: {name:?}")));
    }
    Ok(())
}
