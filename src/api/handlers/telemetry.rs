//! Ingest and recent-sample handlers

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use serde::Serialize;

use super::{parse_json_body, ApiState, LimitQuery};
use crate::api::envelope::{ApiErrorResponse, ApiResponse};
use crate::types::Sample;

/// Samples oldest first.
#[derive(Debug, Serialize)]
pub struct RecentResponse<'a> {
    pub samples: Vec<&'a Sample>,
    pub count: usize,
}

/// POST /api/v1/ingest
pub async fn ingest_samples(State(state): State<ApiState>, body: Bytes) -> Response {
    let value = match parse_json_body(&body) {
        Ok(v) => v,
        Err(msg) => return ApiErrorResponse::bad_request(msg),
    };

    match state.pipeline.ingest(value) {
        Ok(report) => ApiResponse::ok(report),
        Err(e) => ApiErrorResponse::from_error(&e),
    }
}

/// GET /api/v1/recent?limit=N
pub async fn get_recent(
    State(state): State<ApiState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Response {
    let Query(q) = match query {
        Ok(q) => q,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };
    let window = state.pipeline.recent(q.limit);
    let samples: Vec<&Sample> = window.iter().collect();
    ApiResponse::ok(RecentResponse {
        count: samples.len(),
        samples,
    })
}
