//! Canonical telemetry sample types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Range constraint applied to a canonical field during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldConstraint {
    /// value >= 0
    NonNegative,
    /// value > 0
    Positive,
    /// 0 <= value <= 1
    UnitInterval,
}

impl FieldConstraint {
    /// Whether `value` satisfies the constraint. Callers check finiteness first.
    pub fn admits(self, value: f64) -> bool {
        match self {
            Self::NonNegative => value >= 0.0,
            Self::Positive => value > 0.0,
            Self::UnitInterval => (0.0..=1.0).contains(&value),
        }
    }

    pub const fn describe(self) -> &'static str {
        match self {
            Self::NonNegative => "must be >= 0",
            Self::Positive => "must be > 0",
            Self::UnitInterval => "must lie in [0, 1]",
        }
    }
}

/// The six canonical telemetry channels every sample must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Velocity,
    Pressure,
    Temperature,
    Density,
    Rpm,
    LiquidVolumeFraction,
}

impl Field {
    /// Canonical order; validation reports the first failing field in this order.
    pub const ALL: [Self; 6] = [
        Self::Velocity,
        Self::Pressure,
        Self::Temperature,
        Self::Density,
        Self::Rpm,
        Self::LiquidVolumeFraction,
    ];

    /// Fields whose dispersion gates BC validity.
    pub const GATED: [Self; 3] = [Self::Velocity, Self::Pressure, Self::Temperature];

    /// Wire key of the field.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Velocity => "velocity_m_s",
            Self::Pressure => "pressure_Pa",
            Self::Temperature => "temperature_K",
            Self::Density => "density_kg_m3",
            Self::Rpm => "rpm",
            Self::LiquidVolumeFraction => "liquid_volume_fraction",
        }
    }

    pub const fn constraint(self) -> FieldConstraint {
        match self {
            Self::Velocity | Self::Rpm => FieldConstraint::NonNegative,
            Self::Pressure | Self::Temperature | Self::Density => FieldConstraint::Positive,
            Self::LiquidVolumeFraction => FieldConstraint::UnitInterval,
        }
    }

    pub fn is_canonical_key(key: &str) -> bool {
        Self::ALL.iter().any(|f| f.key() == key)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One validated telemetry observation.
///
/// Built only by the validator; once stored it is shared behind `Arc` and
/// never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Inlet velocity (m/s)
    pub velocity_m_s: f64,
    /// Inlet static pressure (Pa)
    #[serde(rename = "pressure_Pa")]
    pub pressure_pa: f64,
    /// Inlet temperature (K)
    #[serde(rename = "temperature_K")]
    pub temperature_k: f64,
    /// Gas density (kg/m³)
    pub density_kg_m3: f64,
    /// Shaft speed (rev/min)
    pub rpm: f64,
    /// Liquid volume fraction (0-1)
    pub liquid_volume_fraction: f64,
    /// When the service accepted the record (diagnostics only)
    pub ingested_at: DateTime<Utc>,
    /// Producer-supplied channels outside the canonical set, passed through verbatim
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Sample {
    pub const fn value(&self, field: Field) -> f64 {
        match field {
            Field::Velocity => self.velocity_m_s,
            Field::Pressure => self.pressure_pa,
            Field::Temperature => self.temperature_k,
            Field::Density => self.density_kg_m3,
            Field::Rpm => self.rpm,
            Field::LiquidVolumeFraction => self.liquid_volume_fraction,
        }
    }
}
