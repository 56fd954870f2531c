use std::sync::Arc;

use tokio::net::TcpListener;

use arl_gateway::LedgerEndpoint;
use arl_peer::Peer;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Record gateway server.
///
/// The ledger endpoint lives as long as the server; gateway sessions are
/// opened per request.
pub struct ArlServer {
    config: ServerConfig,
    endpoint: Arc<dyn LedgerEndpoint>,
}

impl ArlServer {
    /// Open the in-process peer described by `config.network`.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let peer = Peer::open(&config.network)?;
        Ok(Self::with_endpoint(config, Arc::new(peer)))
    }

    /// Serve against an already running ledger endpoint.
    pub fn with_endpoint(config: ServerConfig, endpoint: Arc<dyn LedgerEndpoint>) -> Self {
        Self { config, endpoint }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(self.config.clone(), Arc::clone(&self.endpoint)))
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            channel = %self.config.channel,
            contract = %self.config.contract,
            identity = %self.config.identity,
            "ARL record gateway listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
