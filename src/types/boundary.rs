//! Boundary-condition document types
//!
//! Field order in these structs is the serialized key order, so two equal
//! documents always render to identical JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Version of the BC document layout. Bump on any structural change.
pub const BC_SCHEMA_VERSION: &str = "1.0";

/// Solver-oriented boundary-condition document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCondition {
    pub gas_model: GasModel,
    pub inlet: Inlet,
    pub outlet: Outlet,
    pub rotor: Rotor,
    pub meta: BcMeta,
    pub validity: Validity,
    pub notes: String,
}

impl BoundaryCondition {
    /// Indented JSON, as written to case files.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Assumed gas composition and equation of state. Never inferred from telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasModel {
    pub eos: String,
    /// Mole fractions by species
    pub composition_mol: BTreeMap<String, f64>,
    pub assumed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inlet {
    #[serde(rename = "type")]
    pub kind: String,
    pub velocity_m_s: f64,
    /// Mean measured temperature; no stagnation correction is applied.
    #[serde(rename = "total_temperature_K")]
    pub total_temperature_k: f64,
    pub turbulence: Turbulence,
    pub multiphase: Multiphase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turbulence {
    pub intensity: f64,
    pub length_scale_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multiphase {
    pub lvf: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    #[serde(rename = "type")]
    pub kind: String,
    pub static_pressure_bar: f64,
    /// Multiplier applied on top of the Pa -> bar conversion (1.0 = none).
    pub pressure_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rotor {
    pub speed_rpm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BcMeta {
    pub schema_version: String,
    pub solver: String,
    pub units: String,
    pub frame: String,
}

impl Default for BcMeta {
    fn default() -> Self {
        Self {
            schema_version: BC_SCHEMA_VERSION.to_string(),
            solver: "openfoam".to_string(),
            units: "SI".to_string(),
            frame: "MRF".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validity {
    pub steady_ok: bool,
    pub insufficient_data: bool,
    pub steady_window_samples: usize,
    pub cv: CvReport,
}

/// Coefficient of variation of each gated field over the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CvReport {
    pub velocity: f64,
    pub pressure: f64,
    pub temperature: f64,
}
