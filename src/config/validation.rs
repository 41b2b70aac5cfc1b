//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::defaults::COMPOSITION_SUM_TOLERANCE;
use super::ServiceConfig;

/// Table whose keys are species names chosen by the operator.
const FREE_FORM_TABLES: [&str; 1] = ["assumptions.composition_mol"];

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path of [`ServiceConfig`].
///
/// Maintained by hand alongside `service_config.rs`.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [server]
        "server",
        "server.addr",
        "server.request_timeout_secs",
        "server.max_body_bytes",
        // [history]
        "history",
        "history.capacity",
        "history.recent_default",
        "history.recommend_default",
        // [steady_state]
        "steady_state",
        "steady_state.min_window_samples",
        "steady_state.velocity_cv_max",
        "steady_state.pressure_cv_max",
        "steady_state.temperature_cv_max",
        // [assumptions]
        "assumptions",
        "assumptions.gas_eos",
        "assumptions.turbulence_intensity",
        "assumptions.hydraulic_diameter_m",
        "assumptions.length_scale_fraction",
        "assumptions.outlet_pressure_ratio",
        "assumptions.composition_mol",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`. Children of free-form tables are not listed.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() && !FREE_FORM_TABLES.contains(&path.as_str()) {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by(|(ka, da), (kb, db)| da.cmp(db).then_with(|| ka.cmp(kb)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Never fails: parse errors are reported by the serde pass that follows.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

fn check_positive_finite(value: f64, name: &str, errors: &mut Vec<String>) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(format!("{name} must be a finite number > 0 (got {value})"));
    }
}

/// Values that must prevent startup.
pub fn validate_ranges(config: &ServiceConfig) -> Vec<String> {
    let mut errors = Vec::new();

    let server = &config.server;
    if server.addr.trim().is_empty() {
        errors.push("server.addr must not be empty".to_string());
    }
    if server.request_timeout_secs == 0 {
        errors.push("server.request_timeout_secs must be > 0".to_string());
    }
    if server.max_body_bytes == 0 {
        errors.push("server.max_body_bytes must be > 0".to_string());
    }

    let h = &config.history;
    if h.capacity == 0 {
        errors.push("history.capacity must be >= 1".to_string());
    }
    if h.recent_default == 0 {
        errors.push("history.recent_default must be >= 1".to_string());
    }
    if h.recommend_default == 0 {
        errors.push("history.recommend_default must be >= 1".to_string());
    }

    let s = &config.steady_state;
    if s.min_window_samples < 2 {
        errors.push(format!(
            "steady_state.min_window_samples must be >= 2 (got {})",
            s.min_window_samples
        ));
    }
    check_positive_finite(s.velocity_cv_max, "steady_state.velocity_cv_max", &mut errors);
    check_positive_finite(s.pressure_cv_max, "steady_state.pressure_cv_max", &mut errors);
    check_positive_finite(s.temperature_cv_max, "steady_state.temperature_cv_max", &mut errors);

    let a = &config.assumptions;
    if a.gas_eos.trim().is_empty() {
        errors.push("assumptions.gas_eos must not be empty".to_string());
    }
    if !(a.turbulence_intensity.is_finite()
        && a.turbulence_intensity > 0.0
        && a.turbulence_intensity <= 1.0)
    {
        errors.push(format!(
            "assumptions.turbulence_intensity must lie in (0, 1] (got {})",
            a.turbulence_intensity
        ));
    }
    check_positive_finite(a.hydraulic_diameter_m, "assumptions.hydraulic_diameter_m", &mut errors);
    check_positive_finite(a.length_scale_fraction, "assumptions.length_scale_fraction", &mut errors);
    check_positive_finite(a.outlet_pressure_ratio, "assumptions.outlet_pressure_ratio", &mut errors);

    if a.composition_mol.is_empty() {
        errors.push("assumptions.composition_mol must list at least one species".to_string());
    } else {
        for (species, x) in &a.composition_mol {
            if !x.is_finite() || *x < 0.0 {
                errors.push(format!(
                    "assumptions.composition_mol.{species} must be a finite fraction >= 0 (got {x})"
                ));
            }
        }
        let sum: f64 = a.composition_mol.values().sum();
        if (sum - 1.0).abs() > COMPOSITION_SUM_TOLERANCE {
            errors.push(format!(
                "assumptions.composition_mol must sum to 1.0 (got {sum:.4})"
            ));
        }
    }

    errors
}
