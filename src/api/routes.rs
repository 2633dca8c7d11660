//! API Routes
//!
//! Configures the Axum router with all snow finder endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, nearby_handler, refresh_handler, regions_handler, search_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin, the mini-program front end is served elsewhere
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/regions", get(regions_handler))
        .route("/regions/refresh", post(refresh_handler))
        .route("/nearby", get(nearby_handler))
        .route("/search", get(search_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
