//! Telemetry ingestion
//!
//! Accepts either a single record (JSON object) or a batch (JSON array).
//! Validation is per record: invalid records are reported by index and
//! never block their valid siblings from being stored.

pub mod validator;

pub use validator::{SampleValidator, ValidationError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::Sample;

/// Whole-request ingestion failures (individual bad records are not errors).
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("payload must be a JSON object or an array of objects, got {0}")]
    Malformed(&'static str),
}

/// Candidate records extracted from a request body.
#[derive(Debug, Clone)]
pub enum IngestPayload {
    Single(Value),
    Batch(Vec<Value>),
}

impl IngestPayload {
    pub fn from_value(value: Value) -> Result<Self, IngestError> {
        match value {
            Value::Object(_) => Ok(Self::Single(value)),
            Value::Array(items) => Ok(Self::Batch(items)),
            Value::Null => Err(IngestError::Malformed("null")),
            Value::Bool(_) => Err(IngestError::Malformed("a boolean")),
            Value::Number(_) => Err(IngestError::Malformed("a number")),
            Value::String(_) => Err(IngestError::Malformed("a string")),
        }
    }

    pub fn records(&self) -> &[Value] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Batch(items) => items,
        }
    }
}

/// Result of validating one record of a payload.
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Accepted(Sample),
    Rejected(ValidationError),
}

/// Validate every record, preserving payload order.
pub fn evaluate_records(records: &[Value], received_at: DateTime<Utc>) -> Vec<RecordOutcome> {
    records
        .iter()
        .map(|r| match SampleValidator::validate(r, received_at) {
            Ok(sample) => RecordOutcome::Accepted(sample),
            Err(e) => RecordOutcome::Rejected(e),
        })
        .collect()
}

/// A record that failed validation, by position in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub reason: String,
}

/// Per-request ingestion summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub accepted_count: usize,
    pub rejected: Vec<Rejection>,
    /// History length after the accepted samples were appended
    pub history_len: usize,
}

/// Split outcomes into the accepted samples (in order) and the rejections.
pub fn partition_outcomes(outcomes: Vec<RecordOutcome>) -> (Vec<Sample>, Vec<Rejection>) {
    let mut accepted = Vec::with_capacity(outcomes.len());
    let mut rejected = Vec::new();

    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            RecordOutcome::Accepted(sample) => accepted.push(sample),
            RecordOutcome::Rejected(err) => rejected.push(Rejection {
                index,
                field: err.field().map(|f| f.key().to_string()),
                reason: err.to_string(),
            }),
        }
    }

    (accepted, rejected)
}
