//! BC Synthesizer
//!
//! Turns window statistics into a [`BoundaryCondition`] document. The only
//! data-derived values are the window means and CVs; turbulence, geometry,
//! gas model and the outlet ratio come from [`AssumptionsConfig`].

use thiserror::Error;

use crate::config::defaults::PA_PER_BAR;
use crate::config::AssumptionsConfig;
use crate::steady_state::WindowStatistics;
use crate::types::{
    BcMeta, BoundaryCondition, GasModel, Inlet, Multiphase, Outlet, Rotor, Turbulence, Validity,
};

pub const INLET_KIND: &str = "velocity_inlet";
pub const OUTLET_KIND: &str = "pressure_outlet";

/// Caveats attached to every document.
pub const BC_NOTES: &str = "Inlet total temperature is the mean measured static temperature \
(no stagnation correction). Turbulence intensity, length scale and gas composition are \
assumed constants, not derived from telemetry. Outlet static pressure is the mean measured \
pressure scaled by pressure_ratio. Use as an initial condition only when validity.steady_ok \
is true.";

/// Recommendation requested with no samples to average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient data: no samples available to synthesize boundary conditions")]
pub struct InsufficientDataError;

/// Pure function of window statistics and the configured assumptions.
#[derive(Debug, Clone)]
pub struct BcSynthesizer {
    assumptions: AssumptionsConfig,
}

impl BcSynthesizer {
    pub const fn new(assumptions: AssumptionsConfig) -> Self {
        Self { assumptions }
    }

    pub const fn assumptions(&self) -> &AssumptionsConfig {
        &self.assumptions
    }

    pub fn synthesize(
        &self,
        stats: &WindowStatistics,
    ) -> Result<BoundaryCondition, InsufficientDataError> {
        if stats.is_empty() {
            return Err(InsufficientDataError);
        }

        let a = &self.assumptions;
        let static_pressure_bar = stats.pressure.mean / PA_PER_BAR * a.outlet_pressure_ratio;

        Ok(BoundaryCondition {
            gas_model: GasModel {
                eos: a.gas_eos.clone(),
                composition_mol: a.composition_mol.clone(),
                assumed: true,
            },
            inlet: Inlet {
                kind: INLET_KIND.to_string(),
                velocity_m_s: stats.velocity.mean,
                total_temperature_k: stats.temperature.mean,
                turbulence: Turbulence {
                    intensity: a.turbulence_intensity,
                    length_scale_m: a.turbulence_length_scale_m(),
                },
                multiphase: Multiphase { lvf: stats.lvf_mean },
            },
            outlet: Outlet {
                kind: OUTLET_KIND.to_string(),
                static_pressure_bar,
                pressure_ratio: a.outlet_pressure_ratio,
            },
            rotor: Rotor {
                speed_rpm: stats.rpm_mean,
            },
            meta: BcMeta::default(),
            validity: Validity {
                steady_ok: stats.steady_ok,
                insufficient_data: stats.insufficient_data,
                steady_window_samples: stats.sample_count,
                cv: stats.cv_report(),
            },
            notes: BC_NOTES.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SteadyStateConfig;
    use crate::steady_state::{FieldStatistics, SteadyStateEvaluator};
    use crate::storage::Window;
    use crate::types::Sample;
    use chrono::{DateTime, Utc};
    use std::collections::BTreeMap;

    fn sample(pressure: f64) -> Sample {
        Sample {
            velocity_m_s: 23.0,
            pressure_pa: pressure,
            temperature_k: 310.0,
            density_kg_m3: 1.9,
            rpm: 14_500.0,
            liquid_volume_fraction: 0.015,
            ingested_at: DateTime::<Utc>::UNIX_EPOCH,
            extras: BTreeMap::new(),
        }
    }

    fn stats_for(samples: Vec<Sample>) -> WindowStatistics {
        SteadyStateEvaluator::new(SteadyStateConfig::default()).evaluate(&Window::from_samples(samples))
    }

    #[test]
    fn test_empty_window_is_error() {
        let stats = stats_for(Vec::new());
        let result = BcSynthesizer::new(AssumptionsConfig::default()).synthesize(&stats);
        assert_eq!(result, Err(InsufficientDataError));
    }

    #[test]
    fn test_document_fields() {
        let bc = BcSynthesizer::new(AssumptionsConfig::default())
            .synthesize(&stats_for((0..12).map(|_| sample(200_300.0)).collect()))
            .unwrap();

        assert_eq!(bc.inlet.kind, "velocity_inlet");
        assert_eq!(bc.outlet.kind, "pressure_outlet");
        assert!((bc.inlet.velocity_m_s - 23.0).abs() < 1e-9);
        assert!((bc.inlet.total_temperature_k - 310.0).abs() < 1e-9);
        assert!((bc.inlet.turbulence.intensity - 0.07).abs() < 1e-12);
        assert!((bc.inlet.turbulence.length_scale_m - 0.05).abs() < 1e-12);
        assert!((bc.inlet.multiphase.lvf - 0.015).abs() < 1e-12);
        assert!((bc.outlet.static_pressure_bar - 2.003).abs() < 1e-9);
        assert_eq!(bc.outlet.pressure_ratio, 1.0);
        assert!((bc.rotor.speed_rpm - 14_500.0).abs() < 1e-9);
        assert!(bc.gas_model.assumed);
        assert_eq!(bc.gas_model.eos, "perfectGas");
        assert_eq!(bc.meta.schema_version, "1.0");
        assert_eq!(bc.meta.frame, "MRF");
        assert!(bc.validity.steady_ok);
        assert_eq!(bc.validity.steady_window_samples, 12);
    }

    #[test]
    fn test_unit_conversion_round_trip() {
        let stats = stats_for((0..3).map(|_| sample(187_654.321)).collect());
        let bc = BcSynthesizer::new(AssumptionsConfig::default()).synthesize(&stats).unwrap();
        let back = bc.outlet.static_pressure_bar * 100_000.0;
        assert!((back - stats.pressure.mean).abs() / stats.pressure.mean < 1e-9);
    }

    #[test]
    fn test_outlet_ratio_applied_and_echoed() {
        let assumptions = AssumptionsConfig {
            outlet_pressure_ratio: 1.25,
            ..AssumptionsConfig::default()
        };
        let bc = BcSynthesizer::new(assumptions)
            .synthesize(&stats_for(vec![sample(200_000.0), sample(200_000.0)]))
            .unwrap();
        assert!((bc.outlet.static_pressure_bar - 2.5).abs() < 1e-9);
        assert_eq!(bc.outlet.pressure_ratio, 1.25);
    }

    #[test]
    fn test_single_sample_yields_unsteady_document() {
        let bc = BcSynthesizer::new(AssumptionsConfig::default())
            .synthesize(&stats_for(vec![sample(200_000.0)]))
            .unwrap();
        assert!(!bc.validity.steady_ok);
        assert!(bc.validity.insufficient_data);
        assert_eq!(bc.validity.cv.pressure, 0.0);
    }

    #[test]
    fn test_identical_statistics_render_identical_json() {
        let stats = WindowStatistics {
            sample_count: 2,
            velocity: FieldStatistics { mean: 20.0, cv: 0.01 },
            pressure: FieldStatistics { mean: 150_000.0, cv: 0.002 },
            temperature: FieldStatistics { mean: 295.0, cv: 0.001 },
            density_mean: 1.5,
            rpm_mean: 12_000.0,
            lvf_mean: 0.0,
            insufficient_data: false,
            steady_ok: false,
        };
        let synth = BcSynthesizer::new(AssumptionsConfig::default());
        let a = serde_json::to_string(&synth.synthesize(&stats).unwrap()).unwrap();
        let b = serde_json::to_string(&synth.synthesize(&stats).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_top_level_key_order() {
        let bc = BcSynthesizer::new(AssumptionsConfig::default())
            .synthesize(&stats_for(vec![sample(1.0e5)]))
            .unwrap();
        let json = serde_json::to_string(&bc).unwrap();
        let positions: Vec<usize> = ["\"gas_model\"", "\"inlet\"", "\"outlet\"", "\"rotor\"", "\"meta\"", "\"validity\"", "\"notes\""]
            .iter()
            .map(|k| json.find(k).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
