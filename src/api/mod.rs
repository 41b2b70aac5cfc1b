//! REST API module using Axum
//!
//! Provides HTTP endpoints for the boundary-condition service:
//! - `/api/v1` with the `{data, meta}` / `{error, meta}` envelope
//! - root-level `/health` and the legacy `/ingest-wgc`, `/recent-wgc`,
//!   `/recommend-bc` endpoints

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::ApiState;

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Env var with a comma-separated list of allowed CORS origins.
pub const CORS_ORIGINS_ENV_VAR: &str = "WGC_CORS_ORIGINS";

/// Build the CORS layer.
///
/// Any origin is allowed unless `WGC_CORS_ORIGINS` names specific ones
/// (e.g., `http://localhost:8501` for a local dashboard).
fn build_cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var(CORS_ORIGINS_ENV_VAR) {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            base.allow_origin(allowed)
        }
        Err(_) => base.allow_origin(Any),
    }
}

/// Create the complete application router.
///
/// Oversized bodies get 413 and requests exceeding the configured timeout
/// get 408.
pub fn create_app(state: ApiState) -> Router {
    let cors = build_cors_layer();
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let max_body_bytes = state.config.server.max_body_bytes;

    Router::new()
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(routes::legacy_routes(state))
        // Middleware
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
