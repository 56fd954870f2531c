use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use arl_gateway::{Gateway, GatewayError, GatewayResult, LedgerEndpoint, RecordClient};
use arl_types::Record;

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Shared handler state: the process-wide ledger endpoint and config.
#[derive(Clone)]
pub struct AppState {
    endpoint: Arc<dyn LedgerEndpoint>,
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, endpoint: Arc<dyn LedgerEndpoint>) -> Self {
        Self {
            endpoint,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    fn ledger_error(&self, action: &'static str, source: GatewayError) -> ApiError {
        if self.config.not_found_as_404 && source.is_not_found() {
            ApiError::NotFound { action, source }
        } else {
            ApiError::Ledger { action, source }
        }
    }

    /// Run `f` against the record contract inside a fresh gateway session.
    ///
    /// Connecting and transacting block, so both happen on the blocking
    /// pool. The session is dropped before the result is returned.
    async fn with_records<T, F>(&self, action: &'static str, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&RecordClient<'_>) -> GatewayResult<T> + Send + 'static,
    {
        let endpoint = Arc::clone(&self.endpoint);
        let config = Arc::clone(&self.config);
        let joined = tokio::task::spawn_blocking(move || {
            let gateway = Gateway::connect(endpoint, config.identity.clone())?;
            let network = gateway.network(&config.channel)?;
            let records = RecordClient::new(network.contract(&config.contract));
            f(&records)
        })
        .await;

        match joined {
            Ok(result) => result.map_err(|source| self.ledger_error(action, source)),
            Err(e) => Err(ApiError::Internal(e.to_string())),
        }
    }
}

fn decode_record(body: &[u8]) -> Result<Record, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// `POST /records`
pub async fn create_record(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let record = decode_record(&body)?;
    let submitted = record.clone();
    state
        .with_records("create", move |records| records.create(&submitted))
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /records/{key}`
pub async fn query_record(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let record = state
        .with_records("query", move |records| records.query(&key))
        .await?;
    Ok(Json(record))
}

/// `PUT /records/{key}`
///
/// The body may carry a whole record, but only `balance` and `status` are
/// sent to the ledger.
pub async fn update_record(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let record = decode_record(&body)?;
    state
        .with_records("update", move |records| {
            records.update(&key, record.balance, &record.status)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
