use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use arl_gateway::GatewayError;

/// Failures that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("peer error: {0}")]
    Peer(#[from] arl_peer::PeerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Per-request failures, rendered as plain-text HTTP errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not a record.
    #[error("failed to decode request body: {0}")]
    Decode(String),

    /// The ledger reported the record missing and 404s are enabled.
    #[error("failed to {action} record: {source}")]
    NotFound {
        action: &'static str,
        #[source]
        source: GatewayError,
    },

    /// Any other connection or transaction failure.
    #[error("failed to {action} record: {source}")]
    Ledger {
        action: &'static str,
        #[source]
        source: GatewayError,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Ledger { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::Decode("x".into()).status(), StatusCode::BAD_REQUEST);
        let conn = || GatewayError::Connection("down".into());
        assert_eq!(
            ApiError::Ledger { action: "query", source: conn() }.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::NotFound { action: "query", source: conn() }.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn ledger_message_names_action() {
        let err = ApiError::Ledger {
            action: "update",
            source: GatewayError::Connection("down".into()),
        };
        assert_eq!(
            err.to_string(),
            "failed to update record: failed to connect to gateway: down"
        );
    }
}
