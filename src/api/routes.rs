//! API route definitions
//!
//! - /api/v1/ingest    - POST one sample or a batch
//! - /api/v1/recent    - trailing samples
//! - /api/v1/recommend - GET from history, POST from supplied samples
//! - /api/v1/status    - store counters and window limits
//! - /api/v1/config    - effective configuration

use axum::{routing::{get, post}, Router};

use super::handlers::{self, ApiState};

/// Enveloped `/api/v1` routes
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/ingest", post(handlers::ingest_samples))
        .route("/recent", get(handlers::get_recent))
        .route(
            "/recommend",
            get(handlers::get_recommendation).post(handlers::post_recommendation),
        )
        .route("/status", get(handlers::get_status))
        .route("/config", get(handlers::get_config))
        .with_state(state)
}

/// Root-level health and legacy endpoints
pub fn legacy_routes(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ingest-wgc", post(handlers::legacy_ingest))
        .route("/recent-wgc", get(handlers::legacy_recent))
        .route("/recommend-bc", post(handlers::legacy_recommend))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn create_test_state() -> ApiState {
        ApiState::new(ServiceConfig::default())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = legacy_routes(create_test_state());
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_recommend_rejects_put() {
        let app = api_routes(create_test_state());
        let resp = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/recommend")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
