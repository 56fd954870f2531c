//! REST gateway for the Asset Registry Ledger.
//!
//! Translates HTTP requests on `/records` into ledger transactions and
//! ledger results back into HTTP responses. The server never reads or
//! writes world state itself; every handler opens a gateway session for
//! the configured identity, issues one named transaction, and releases the
//! session before responding.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use handler::AppState;
pub use server::ArlServer;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arl_contract::CreateMode;
    use arl_peer::{NetworkConfig, Peer};
    use arl_types::{Identity, Record};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use tower::util::ServiceExt;

    fn app_with(config: ServerConfig) -> Router {
        let peer = Peer::open(&config.network).unwrap();
        router::build_router(AppState::new(config, Arc::new(peer)))
    }

    fn app() -> Router {
        app_with(ServerConfig::default())
    }

    fn d1_json() -> &'static str {
        r#"{"dealerId":"D1","msisdn":"9990001111","mpin":"1234","balance":100,"status":"active","transAmount":0,"transType":"","remarks":"init"}"#
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> Response {
        app.clone().oneshot(req).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = send(&app(), request("GET", "/health", "")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // -----------------------------------------------------------------------
    // POST /records
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_echoes_record() {
        let response = send(&app(), request("POST", "/records", d1_json())).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let echoed: Record = serde_json::from_slice(&body_bytes(response).await).unwrap();
        let sent: Record = serde_json::from_str(d1_json()).unwrap();
        assert_eq!(echoed, sent);
    }

    #[tokio::test]
    async fn create_with_undecodable_body_is_bad_request() {
        let app = app();
        let response = send(&app, request("POST", "/records", "{not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, request("POST", "/records", r#"{"balance":"many"}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_with_empty_key_is_server_error() {
        let response = send(&app(), request("POST", "/records", r#"{"balance":1}"#)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(text.starts_with("failed to create record:"), "{text}");
    }

    #[tokio::test]
    async fn duplicate_create_rejected_when_configured() {
        let mut config = ServerConfig::default();
        config.network.channels[0].contracts[0].create_mode = CreateMode::RejectExisting;
        let app = app_with(config);

        let first = send(&app, request("POST", "/records", d1_json())).await;
        assert_eq!(first.status(), StatusCode::CREATED);
        let second = send(&app, request("POST", "/records", d1_json())).await;
        assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // -----------------------------------------------------------------------
    // GET /records/{key}
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn query_untracked_key_is_server_error() {
        let response = send(&app(), request("GET", "/records/ghost", "")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(text.contains("record ghost does not exist"), "{text}");
    }

    #[tokio::test]
    async fn query_untracked_key_is_404_when_configured() {
        let config = ServerConfig {
            not_found_as_404: true,
            ..ServerConfig::default()
        };
        let response = send(&app_with(config), request("GET", "/records/ghost", "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // -----------------------------------------------------------------------
    // PUT /records/{key}
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn full_lifecycle() {
        let app = app();
        send(&app, request("POST", "/records", d1_json())).await;

        let response = send(
            &app,
            request(
                "PUT",
                "/records/D1",
                r#"{"balance":150,"status":"inactive","msisdn":"ignored"}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, request("GET", "/records/D1", "")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let record: Record = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(record.balance, 150);
        assert_eq!(record.status, "inactive");
        assert_eq!(record.msisdn, "9990001111");
    }

    #[tokio::test]
    async fn update_with_undecodable_body_is_bad_request() {
        let response = send(&app(), request("PUT", "/records/D1", "[1, 2")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_untracked_key_is_server_error() {
        let response = send(
            &app(),
            request("PUT", "/records/ghost", r#"{"balance":1,"status":"x"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // -----------------------------------------------------------------------
    // Connection failures and aliases
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unenrolled_identity_is_server_error() {
        let config = ServerConfig {
            identity: Identity::new("Org1", "Intruder"),
            ..ServerConfig::default()
        };
        let response = send(&app_with(config), request("GET", "/records/D1", "")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(text.contains("failed to connect to gateway"), "{text}");
    }

    #[tokio::test]
    async fn unknown_channel_is_server_error() {
        let mut config = ServerConfig::default();
        config.channel = "elsewhere".into();
        let response = send(&app_with(config), request("POST", "/records", d1_json())).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn assets_paths_are_aliases() {
        let app = app();
        let response = send(&app, request("POST", "/assets", d1_json())).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let response = send(&app, request("GET", "/records/D1", "")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let response = send(&app, request("GET", "/assets/D1", "")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn file_backed_network_persists_across_servers() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            network: NetworkConfig {
                state: arl_peer::StateConfig::File {
                    dir: dir.path().to_path_buf(),
                    sync: Default::default(),
                },
                ..NetworkConfig::default()
            },
            ..ServerConfig::default()
        };

        {
            let app = app_with(config.clone());
            let response = send(&app, request("POST", "/records", d1_json())).await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = send(&app_with(config), request("GET", "/records/D1", "")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
