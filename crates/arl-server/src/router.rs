use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// HTTP endpoint paths.
pub mod endpoints {
    pub const HEALTH: &str = "/health";
    pub const RECORDS: &str = "/records";
    pub const RECORD: &str = "/records/:key";
    /// Paths used by clients of the original asset API.
    pub const ASSETS: &str = "/assets";
    pub const ASSET: &str = "/assets/:key";
}

/// Build the axum router with all record endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(endpoints::RECORDS, post(handler::create_record))
        .route(
            endpoints::RECORD,
            get(handler::query_record).put(handler::update_record),
        )
        .route(endpoints::ASSETS, post(handler::create_record))
        .route(
            endpoints::ASSET,
            get(handler::query_record).put(handler::update_record),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
