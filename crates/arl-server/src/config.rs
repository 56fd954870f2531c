use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use arl_contract::AssetContract;
use arl_peer::NetworkConfig;
use arl_types::Identity;

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Identity every gateway session is opened as.
    pub identity: Identity,
    pub channel: String,
    pub contract: String,
    /// Answer 404 instead of 500 when a queried record does not exist.
    pub not_found_as_404: bool,
    /// Connection profile of the ledger network.
    pub network: NetworkConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            identity: Identity::default(),
            channel: "mychannel".into(),
            contract: AssetContract::DEFAULT_NAME.into(),
            not_found_as_404: false,
            network: NetworkConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))?;
        config.network.validate()?;
        Ok(config)
    }
}
