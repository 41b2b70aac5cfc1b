//! Sample Validator
//!
//! Normalizes one candidate record into a [`Sample`]:
//! - all six canonical fields must be present and numeric
//! - numeric strings (`"200300.5"`) are coerced to numbers
//! - NaN/Inf are rejected
//! - per-field range constraints (see [`Field::constraint`])
//!
//! Keys outside the canonical set pass through untouched.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{Field, Sample};

/// Key stamped by the service on every accepted sample.
pub const INGESTED_AT_KEY: &str = "ingested_at";

/// Why a single candidate record was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("record must be a JSON object")]
    NotAnObject,

    #[error("missing required field '{field}'")]
    MissingField { field: Field },

    #[error("field '{field}' is not numeric")]
    NotNumeric { field: Field },

    #[error("field '{field}' must be a finite number")]
    NonFinite { field: Field },

    #[error("field '{field}' = {value} is out of range: {constraint}")]
    OutOfRange {
        field: Field,
        value: f64,
        constraint: &'static str,
    },
}

impl ValidationError {
    /// The canonical field the error concerns, if any.
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::NotAnObject => None,
            Self::MissingField { field }
            | Self::NotNumeric { field }
            | Self::NonFinite { field }
            | Self::OutOfRange { field, .. } => Some(*field),
        }
    }
}

/// Stateless validator for candidate telemetry records.
pub struct SampleValidator;

impl SampleValidator {
    /// Validate `record`, stamping `received_at` as the ingestion time.
    pub fn validate(record: &Value, received_at: DateTime<Utc>) -> Result<Sample, ValidationError> {
        let obj = record.as_object().ok_or(ValidationError::NotAnObject)?;

        let mut values = [0.0_f64; 6];
        for (slot, field) in values.iter_mut().zip(Field::ALL) {
            *slot = Self::read_field(obj, field)?;
        }
        let [velocity_m_s, pressure_pa, temperature_k, density_kg_m3, rpm, liquid_volume_fraction] =
            values;

        let extras: BTreeMap<String, Value> = obj
            .iter()
            .filter(|(k, _)| !Field::is_canonical_key(k) && k.as_str() != INGESTED_AT_KEY)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Sample {
            velocity_m_s,
            pressure_pa,
            temperature_k,
            density_kg_m3,
            rpm,
            liquid_volume_fraction,
            ingested_at: received_at,
            extras,
        })
    }

    fn read_field(obj: &Map<String, Value>, field: Field) -> Result<f64, ValidationError> {
        let value = match obj.get(field.key()) {
            None | Some(Value::Null) => return Err(ValidationError::MissingField { field }),
            Some(Value::Number(n)) => n.as_f64().ok_or(ValidationError::NotNumeric { field })?,
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::NotNumeric { field })?,
            Some(_) => return Err(ValidationError::NotNumeric { field }),
        };

        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field });
        }

        let constraint = field.constraint();
        if !constraint.admits(value) {
            return Err(ValidationError::OutOfRange {
                field,
                value,
                constraint: constraint.describe(),
            });
        }

        Ok(value)
    }
}
