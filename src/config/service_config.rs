//! Service Configuration - window limits, steady-state gate and BC assumptions
//!
//! Each struct implements `Default` from `config::defaults`, so an empty or
//! missing TOML file yields the documented built-in behaviour.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::defaults;

/// Env var naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "WGC_CONFIG";

/// Config file picked up from the working directory when nothing is named.
pub const LOCAL_CONFIG_FILE: &str = "wgc_bc.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with [`ServiceConfig::load`], which searches:
/// 1. an explicit path (`--config`)
/// 2. `$WGC_CONFIG`
/// 3. `./wgc_bc.toml`
/// 4. built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub steady_state: SteadyStateConfig,

    #[serde(default)]
    pub assumptions: AssumptionsConfig,
}

impl ServiceConfig {
    /// Resolve and load the configuration.
    ///
    /// A file that was asked for explicitly (argument or env var) must load
    /// and validate; the implicit local file only warns and falls back.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), "Loaded config from --config");
            return Ok(config);
        }

        if let Ok(raw) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(raw);
            let config = Self::load_from_file(&path)?;
            info!(path = %path.display(), "Loaded config from {}", CONFIG_ENV_VAR);
            return Ok(config);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", LOCAL_CONFIG_FILE);
                    return Ok(config);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load and validate a specific TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text. Unknown keys only produce warnings.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Check every value for internal consistency, collecting all problems.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = super::validation::validate_ranges(self);

        let h = &self.history;
        if h.recent_default > h.capacity {
            warn!(
                recent_default = h.recent_default,
                capacity = h.capacity,
                "history.recent_default exceeds capacity and will be clamped"
            );
        }
        if h.recommend_default > h.capacity {
            warn!(
                recommend_default = h.recommend_default,
                capacity = h.capacity,
                "history.recommend_default exceeds capacity and will be clamped"
            );
        }

        errors.dedup();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            Self::Parse(path, e) => write!(f, "Config parse error ({}): {}", path.display(), e),
            Self::Serialize(e) => write!(f, "Config serialization error: {e}"),
            Self::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Server Config
// ============================================================================

/// HTTP boundary settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address. Overridden by `WGC_SERVER_ADDR` or `--addr`.
    #[serde(default = "default_server_addr")]
    pub addr: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}
const fn default_request_timeout_secs() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}
const fn default_max_body_bytes() -> usize {
    defaults::MAX_BODY_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
            request_timeout_secs: default_request_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

// ============================================================================
// History Config
// ============================================================================

/// Store capacity and default window sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum retained samples (C)
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Default `recent` limit
    #[serde(default = "default_recent_limit")]
    pub recent_default: usize,

    /// Default `recommend` window
    #[serde(default = "default_recommend_window")]
    pub recommend_default: usize,
}

const fn default_capacity() -> usize {
    defaults::HISTORY_CAPACITY
}
const fn default_recent_limit() -> usize {
    defaults::RECENT_DEFAULT_LIMIT
}
const fn default_recommend_window() -> usize {
    defaults::RECOMMEND_DEFAULT_WINDOW
}

impl HistoryConfig {
    /// Capacity as the store wants it. Validation guarantees it is non-zero;
    /// a zero that slipped through is treated as 1.
    pub fn capacity_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.capacity).unwrap_or(NonZeroUsize::MIN)
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            recent_default: default_recent_limit(),
            recommend_default: default_recommend_window(),
        }
    }
}

// ============================================================================
// Steady-State Config
// ============================================================================

/// Gate applied to window statistics before a BC is marked valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteadyStateConfig {
    #[serde(default = "default_min_window_samples")]
    pub min_window_samples: usize,

    #[serde(default = "default_velocity_cv_max")]
    pub velocity_cv_max: f64,

    #[serde(default = "default_pressure_cv_max")]
    pub pressure_cv_max: f64,

    #[serde(default = "default_temperature_cv_max")]
    pub temperature_cv_max: f64,
}

const fn default_min_window_samples() -> usize {
    defaults::MIN_WINDOW_SAMPLES
}
const fn default_velocity_cv_max() -> f64 {
    defaults::VELOCITY_CV_MAX
}
const fn default_pressure_cv_max() -> f64 {
    defaults::PRESSURE_CV_MAX
}
const fn default_temperature_cv_max() -> f64 {
    defaults::TEMPERATURE_CV_MAX
}

impl Default for SteadyStateConfig {
    fn default() -> Self {
        Self {
            min_window_samples: default_min_window_samples(),
            velocity_cv_max: default_velocity_cv_max(),
            pressure_cv_max: default_pressure_cv_max(),
            temperature_cv_max: default_temperature_cv_max(),
        }
    }
}

// ============================================================================
// Assumptions Config
// ============================================================================

/// Fixed heuristics written into every BC document. None of these are
/// derived from telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionsConfig {
    /// Equation-of-state tag
    #[serde(default = "default_gas_eos")]
    pub gas_eos: String,

    /// Inlet turbulence intensity (fraction)
    #[serde(default = "default_turbulence_intensity")]
    pub turbulence_intensity: f64,

    /// Inlet hydraulic diameter (m)
    #[serde(default = "default_hydraulic_diameter")]
    pub hydraulic_diameter_m: f64,

    /// Length scale = fraction × hydraulic diameter
    #[serde(default = "default_length_scale_fraction")]
    pub length_scale_fraction: f64,

    /// Multiplier on the Pa -> bar outlet conversion (1.0 = none)
    #[serde(default = "default_outlet_pressure_ratio")]
    pub outlet_pressure_ratio: f64,

    /// Mole fractions by species; must sum to 1
    #[serde(default = "default_composition")]
    pub composition_mol: BTreeMap<String, f64>,
}

fn default_gas_eos() -> String {
    defaults::GAS_EOS.to_string()
}
fn default_composition() -> BTreeMap<String, f64> {
    defaults::GAS_COMPOSITION_MOL
        .iter()
        .map(|(species, x)| ((*species).to_string(), *x))
        .collect()
}
const fn default_turbulence_intensity() -> f64 {
    defaults::TURBULENCE_INTENSITY
}
const fn default_hydraulic_diameter() -> f64 {
    defaults::HYDRAULIC_DIAMETER_M
}
const fn default_length_scale_fraction() -> f64 {
    defaults::LENGTH_SCALE_FRACTION
}
const fn default_outlet_pressure_ratio() -> f64 {
    defaults::OUTLET_PRESSURE_RATIO
}

impl AssumptionsConfig {
    /// Turbulence length scale (m).
    pub fn turbulence_length_scale_m(&self) -> f64 {
        self.length_scale_fraction * self.hydraulic_diameter_m
    }
}

impl Default for AssumptionsConfig {
    fn default() -> Self {
        Self {
            gas_eos: default_gas_eos(),
            turbulence_intensity: default_turbulence_intensity(),
            hydraulic_diameter_m: default_hydraulic_diameter(),
            length_scale_fraction: default_length_scale_fraction(),
            outlet_pressure_ratio: default_outlet_pressure_ratio(),
            composition_mol: default_composition(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
