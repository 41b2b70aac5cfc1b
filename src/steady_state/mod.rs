//! Steady-State Statistics Engine
//!
//! Reduces a [`Window`] to the per-field means and coefficients of variation
//! the BC synthesizer needs, and applies the steady-state gate.
//!
//! Only velocity, pressure and temperature are gated. Density, rpm and LVF
//! are averaged but never affect `steady_ok`.

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::config::SteadyStateConfig;
use crate::storage::Window;
use crate::types::{CvReport, Field};

/// Mean and coefficient of variation of one field over a window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FieldStatistics {
    pub mean: f64,
    /// Sample standard deviation (N-1) / |mean|
    pub cv: f64,
}

impl FieldStatistics {
    /// Statistics of `values`. Degenerate inputs (fewer than two values, a
    /// zero mean, non-finite intermediates) give a CV of 0.
    pub fn from_values(values: &[f64]) -> Self {
        let mean = finite_mean(values);
        if values.len() < 2 || mean == 0.0 {
            return Self { mean, cv: 0.0 };
        }

        let cv = values.std_dev() / mean.abs();
        Self {
            mean,
            cv: if cv.is_finite() { cv } else { 0.0 },
        }
    }
}

fn finite_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.mean();
    if mean.is_finite() {
        mean
    } else {
        0.0
    }
}

/// Everything the synthesizer reads from a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowStatistics {
    pub sample_count: usize,
    pub velocity: FieldStatistics,
    pub pressure: FieldStatistics,
    pub temperature: FieldStatistics,
    pub density_mean: f64,
    pub rpm_mean: f64,
    pub lvf_mean: f64,
    /// Fewer than two samples: dispersion is undefined.
    pub insufficient_data: bool,
    pub steady_ok: bool,
}

impl WindowStatistics {
    pub const fn cv_report(&self) -> CvReport {
        CvReport {
            velocity: self.velocity.cv,
            pressure: self.pressure.cv,
            temperature: self.temperature.cv,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}

/// Applies the configured CV gate to windows.
#[derive(Debug, Clone)]
pub struct SteadyStateEvaluator {
    config: SteadyStateConfig,
}

impl SteadyStateEvaluator {
    pub const fn new(config: SteadyStateConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &SteadyStateConfig {
        &self.config
    }

    pub fn evaluate(&self, window: &Window) -> WindowStatistics {
        let sample_count = window.len();
        let stats = |field: Field| FieldStatistics::from_values(&window.values(field));

        let velocity = stats(Field::Velocity);
        let pressure = stats(Field::Pressure);
        let temperature = stats(Field::Temperature);

        let insufficient_data = sample_count < 2;
        let steady_ok = !insufficient_data
            && sample_count >= self.config.min_window_samples
            && velocity.cv < self.config.velocity_cv_max
            && pressure.cv < self.config.pressure_cv_max
            && temperature.cv < self.config.temperature_cv_max;

        WindowStatistics {
            sample_count,
            velocity,
            pressure,
            temperature,
            density_mean: finite_mean(&window.values(Field::Density)),
            rpm_mean: finite_mean(&window.values(Field::Rpm)),
            lvf_mean: finite_mean(&window.values(Field::LiquidVolumeFraction)),
            insufficient_data,
            steady_ok,
        }
    }
}
