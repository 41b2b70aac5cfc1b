//! System-wide default constants.
//!
//! Every value here is the built-in default for a `wgc_bc.toml` key; the
//! config structs refer to these instead of repeating literals.

// ============================================================================
// Server
// ============================================================================

/// HTTP bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:5050";

/// Per-request timeout applied at the HTTP boundary (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Largest accepted request body (bytes). 2 MiB fits ~10k samples per batch.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

// ============================================================================
// History
// ============================================================================

/// Samples retained in memory.
///
/// 2 000 samples at the simulator's 2 Hz = ~16 minutes of history.
pub const HISTORY_CAPACITY: usize = 2_000;

/// Samples returned by `recent` when no limit is given.
pub const RECENT_DEFAULT_LIMIT: usize = 200;

/// Trailing window used by `recommend` when no limit is given.
pub const RECOMMEND_DEFAULT_WINDOW: usize = 60;

// ============================================================================
// Steady-state gate
// ============================================================================

/// Fewer samples than this can never be judged steady.
pub const MIN_WINDOW_SAMPLES: usize = 10;

/// CV ceilings, roughly 5% / 1% / 1% of the mean.
pub const VELOCITY_CV_MAX: f64 = 0.05;
pub const PRESSURE_CV_MAX: f64 = 0.01;
pub const TEMPERATURE_CV_MAX: f64 = 0.01;

// ============================================================================
// Assumed boundary-condition constants
// ============================================================================

/// Equation-of-state tag written to `gas_model.eos`.
pub const GAS_EOS: &str = "perfectGas";

/// Lean natural gas, mole fractions.
pub const GAS_COMPOSITION_MOL: [(&str, f64); 4] =
    [("CH4", 0.90), ("C2H6", 0.05), ("CO2", 0.03), ("N2", 0.02)];

/// Conservative compressor-inlet turbulence intensity (7%).
pub const TURBULENCE_INTENSITY: f64 = 0.07;

/// Assumed inlet hydraulic diameter (m).
pub const HYDRAULIC_DIAMETER_M: f64 = 0.5;

/// Turbulence length scale as a fraction of the hydraulic diameter.
pub const LENGTH_SCALE_FRACTION: f64 = 0.1;

/// Multiplier on the measured mean pressure for `outlet.static_pressure_bar`.
/// 1.0 means a plain Pa -> bar conversion.
pub const OUTLET_PRESSURE_RATIO: f64 = 1.0;

/// Allowed deviation of the composition mole-fraction sum from 1.0.
pub const COMPOSITION_SUM_TOLERANCE: f64 = 0.01;

// ============================================================================
// Units
// ============================================================================

pub const PA_PER_BAR: f64 = 100_000.0;
