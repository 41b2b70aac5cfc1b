//! Consistent response envelope for all `/api/v1` endpoints.
//!
//! Every response is wrapped in either [`ApiResponse`] (success) or
//! [`ApiErrorResponse`] (error), ensuring a uniform JSON shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

use crate::bc::InsufficientDataError;
use crate::ingest::IngestError;
use crate::pipeline::RecommendError;

/// Metadata included in every response.
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: String,
    pub version: &'static str,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: "1",
        }
    }
}

/// Successful response: `{ "data": T, "meta": { ... } }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Response {
        let body = Self {
            data,
            meta: ResponseMeta::default(),
        };
        (StatusCode::OK, axum::Json(body)).into_response()
    }
}

/// Machine-readable error codes and the status each one is served with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unparseable body, malformed payload or bad query string
    BadRequest,
    /// Recommendation requested with nothing to average
    InsufficientData,
}

impl ErrorCode {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::InsufficientData => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

impl From<&IngestError> for ErrorCode {
    fn from(_: &IngestError) -> Self {
        Self::BadRequest
    }
}

impl From<&InsufficientDataError> for ErrorCode {
    fn from(_: &InsufficientDataError) -> Self {
        Self::InsufficientData
    }
}

impl From<&RecommendError> for ErrorCode {
    fn from(err: &RecommendError) -> Self {
        match err {
            RecommendError::Malformed(e) => e.into(),
            RecommendError::InsufficientData(e) => e.into(),
        }
    }
}

/// Error detail inside [`ApiErrorResponse`].
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Error response: `{ "error": { "code": "...", "message": "..." }, "meta": { ... } }`
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
    pub meta: ResponseMeta,
}

impl ApiErrorResponse {
    pub fn new(code: ErrorCode, msg: impl Into<String>) -> Response {
        let body = Self {
            error: ErrorDetail {
                code: code.as_str().to_string(),
                message: msg.into(),
            },
            meta: ResponseMeta::default(),
        };
        (code.status(), axum::Json(body)).into_response()
    }

    /// Envelope for a pipeline error, coded by its variant.
    pub fn from_error<'e, E>(err: &'e E) -> Response
    where
        E: std::error::Error,
        ErrorCode: From<&'e E>,
    {
        Self::new(ErrorCode::from(err), err.to_string())
    }

    pub fn bad_request(msg: impl Into<String>) -> Response {
        Self::new(ErrorCode::BadRequest, msg)
    }
}
