//! Boundary-condition recommendation handlers

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;

use super::{parse_json_body, ApiState, LimitQuery};
use crate::api::envelope::{ApiErrorResponse, ApiResponse};

/// GET /api/v1/recommend?limit=N
///
/// BC document over the trailing window of the history.
pub async fn get_recommendation(
    State(state): State<ApiState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Response {
    let Query(q) = match query {
        Ok(q) => q,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };

    match state.pipeline.recommend(q.limit) {
        Ok(bc) => ApiResponse::ok(bc),
        Err(e) => ApiErrorResponse::from_error(&e),
    }
}

/// POST /api/v1/recommend?limit=N
///
/// BC document over posted samples; the history is not modified.
pub async fn post_recommendation(
    State(state): State<ApiState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let Query(q) = match query {
        Ok(q) => q,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };
    let value = match parse_json_body(&body) {
        Ok(v) => v,
        Err(msg) => return ApiErrorResponse::bad_request(msg),
    };

    match state.pipeline.recommend_from_records(value, q.limit) {
        Ok(result) => ApiResponse::ok(result),
        Err(e) => ApiErrorResponse::from_error(&e),
    }
}
