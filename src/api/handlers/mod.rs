//! API route handlers
//!
//! - telemetry: ingest and recent samples
//! - recommend: BC documents from history or from posted samples
//! - status: store diagnostics, effective config, liveness
//! - legacy: root-level endpoints with the flat `{ok, ...}` shape

mod legacy;
mod recommend;
mod status;
mod telemetry;

pub use legacy::*;
pub use recommend::*;
pub use status::*;
pub use telemetry::*;

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::pipeline::PipelineContext;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    /// Owns the history store
    pub pipeline: Arc<PipelineContext>,
    /// Effective configuration, as loaded at startup
    pub config: Arc<ServiceConfig>,
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            pipeline: Arc::new(PipelineContext::new(&config)),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

// ============================================================================
// Shared extractors
// ============================================================================

/// `?limit=N`; absent means the configured default.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Parse a request body as JSON. The error text is returned to the client.
pub(crate) fn parse_json_body(body: &Bytes) -> Result<Value, String> {
    if body.is_empty() {
        return Err("request body is empty".to_string());
    }
    serde_json::from_slice(body).map_err(|e| format!("invalid JSON body: {e}"))
}
