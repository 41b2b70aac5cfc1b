//! Root-level endpoints kept for existing simulator and dashboard clients.
//!
//! These answer with the flat `{ "ok": bool, ... }` shape instead of the
//! `/api/v1` envelope. A `limit` that does not parse falls back to the default.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::debug;

use super::{parse_json_body, ApiState, LimitQuery};
use crate::api::envelope::ErrorCode;
use crate::types::Sample;

fn legacy_error(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(json!({ "ok": false, "error": msg.into() }))).into_response()
}

fn legacy_domain_error<'e, E>(err: &'e E) -> Response
where
    E: std::error::Error,
    ErrorCode: From<&'e E>,
{
    legacy_error(ErrorCode::from(err).status(), err.to_string())
}

fn limit_or_default(query: Result<Query<LimitQuery>, QueryRejection>) -> Option<usize> {
    match query {
        Ok(Query(q)) => q.limit,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Ignoring unparseable limit");
            None
        }
    }
}

/// POST /ingest-wgc
pub async fn legacy_ingest(State(state): State<ApiState>, body: Bytes) -> Response {
    let value = match parse_json_body(&body) {
        Ok(v) => v,
        Err(msg) => return legacy_error(StatusCode::BAD_REQUEST, msg),
    };

    match state.pipeline.ingest(value) {
        Ok(report) => Json(json!({
            "ok": true,
            "added": report.accepted_count,
            "size": report.history_len,
            "rejected": report.rejected,
        }))
        .into_response(),
        Err(e) => legacy_domain_error(&e),
    }
}

/// GET /recent-wgc?limit=N
pub async fn legacy_recent(
    State(state): State<ApiState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Response {
    let window = state.pipeline.recent(limit_or_default(query));
    let samples: Vec<&Sample> = window.iter().collect();
    Json(json!({
        "ok": true,
        "count": samples.len(),
        "samples": samples,
    }))
    .into_response()
}

/// POST /recommend-bc
pub async fn legacy_recommend(
    State(state): State<ApiState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let limit = limit_or_default(query);
    let value = match parse_json_body(&body) {
        Ok(v) => v,
        Err(msg) => return legacy_error(StatusCode::BAD_REQUEST, msg),
    };

    match state.pipeline.recommend_from_records(value, limit) {
        Ok(result) => Json(json!({
            "ok": true,
            "bc": result.boundary_conditions,
            "rejected": result.rejected,
        }))
        .into_response(),
        Err(e) => legacy_domain_error(&e),
    }
}
