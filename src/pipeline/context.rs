//! Pipeline Context - the store plus the stateless engines around it
//!
//! ```text
//! ingest:     body -> validator -> HistoryStore::append_batch
//! recent:     HistoryStore::snapshot(limit) -> Window
//! recommend:  snapshot(limit) -> SteadyStateEvaluator -> BcSynthesizer
//! ```
//!
//! Built once at startup and shared behind `Arc`. All methods take `&self`;
//! the only lock lives inside [`HistoryStore`] and is never held while
//! statistics or synthesis run.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::bc::{BcSynthesizer, InsufficientDataError};
use crate::config::ServiceConfig;
use crate::ingest::{evaluate_records, partition_outcomes, IngestError, IngestPayload, IngestReport, Rejection};
use crate::steady_state::SteadyStateEvaluator;
use crate::storage::{HistoryStats, HistoryStore, Window};
use crate::types::BoundaryCondition;

use super::WindowLimits;

/// Failures of a recommendation computed from posted records.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error(transparent)]
    Malformed(#[from] IngestError),
    #[error(transparent)]
    InsufficientData(#[from] InsufficientDataError),
}

/// Result of [`PipelineContext::recommend_from_records`].
#[derive(Debug, Clone, Serialize)]
pub struct StatelessRecommendation {
    pub boundary_conditions: BoundaryCondition,
    /// Posted records that failed validation and were skipped
    pub rejected: Vec<Rejection>,
}

/// Diagnostics snapshot for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStatus {
    pub history: HistoryStats,
    pub limits: WindowLimits,
}

/// Owns the history store for the lifetime of the process.
#[derive(Debug)]
pub struct PipelineContext {
    store: HistoryStore,
    evaluator: SteadyStateEvaluator,
    synthesizer: BcSynthesizer,
    limits: WindowLimits,
}

impl PipelineContext {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            store: HistoryStore::new(config.history.capacity_non_zero()),
            evaluator: SteadyStateEvaluator::new(config.steady_state.clone()),
            synthesizer: BcSynthesizer::new(config.assumptions.clone()),
            limits: WindowLimits::from_config(&config.history),
        }
    }

    pub const fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub const fn limits(&self) -> &WindowLimits {
        &self.limits
    }

    /// Validate a single record or a batch and append the valid ones in order.
    pub fn ingest(&self, body: Value) -> Result<IngestReport, IngestError> {
        let payload = IngestPayload::from_value(body)?;
        let outcomes = evaluate_records(payload.records(), Utc::now());
        let (accepted, rejected) = partition_outcomes(outcomes);
        log_rejections(&rejected);

        let accepted_count = accepted.len();
        let history_len = self.store.append_batch(accepted);
        debug!(accepted = accepted_count, rejected = rejected.len(), history_len, "Ingested payload");

        Ok(IngestReport {
            accepted_count,
            rejected,
            history_len,
        })
    }

    pub fn recent(&self, limit: Option<usize>) -> Window {
        self.store.snapshot(self.limits.recent(limit))
    }

    /// BC document for the trailing window of the history.
    pub fn recommend(&self, window_limit: Option<usize>) -> Result<BoundaryCondition, InsufficientDataError> {
        let window = self.store.snapshot(self.limits.recommend(window_limit));
        self.synthesize_window(&window)
    }

    /// BC document for the trailing window of posted records; the history
    /// is not touched. The window resolves exactly as for [`Self::recommend`].
    pub fn recommend_from_records(
        &self,
        body: Value,
        window_limit: Option<usize>,
    ) -> Result<StatelessRecommendation, RecommendError> {
        let payload = IngestPayload::from_value(body)?;
        let (accepted, rejected) = partition_outcomes(evaluate_records(payload.records(), Utc::now()));
        log_rejections(&rejected);

        let window = Window::from_samples(accepted).tail(self.limits.recommend(window_limit));
        let boundary_conditions = self.synthesize_window(&window)?;

        Ok(StatelessRecommendation {
            boundary_conditions,
            rejected,
        })
    }

    /// Statistics and synthesis over an already extracted window.
    pub fn synthesize_window(&self, window: &Window) -> Result<BoundaryCondition, InsufficientDataError> {
        let stats = self.evaluator.evaluate(window);
        let bc = self.synthesizer.synthesize(&stats)?;
        debug!(
            samples = stats.sample_count,
            steady_ok = stats.steady_ok,
            cv_velocity = stats.velocity.cv,
            cv_pressure = stats.pressure.cv,
            cv_temperature = stats.temperature.cv,
            "Synthesized boundary conditions"
        );
        Ok(bc)
    }

    pub fn status(&self) -> PipelineStatus {
        PipelineStatus {
            history: self.store.stats(),
            limits: self.limits,
        }
    }
}

fn log_rejections(rejected: &[Rejection]) {
    for r in rejected {
        warn!(index = r.index, field = r.field.as_deref().unwrap_or("-"), reason = %r.reason, "Rejected record");
    }
}
