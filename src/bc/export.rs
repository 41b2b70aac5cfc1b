//! Case-file export: the BC document as indented JSON on disk.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ingest::Rejection;
use crate::pipeline::PipelineContext;
use crate::types::BoundaryCondition;

/// Default file name used by solver case setups.
pub const CASE_FILE_NAME: &str = "bc_case.json";

/// Write `bc` as pretty JSON, replacing any existing file.
pub fn write_case_file(bc: &BoundaryCondition, path: &Path) -> Result<()> {
    let mut json = bc.to_pretty_json().context("Failed to serialize BC document")?;
    json.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(
        path = %path.display(),
        steady_ok = bc.validity.steady_ok,
        window = bc.validity.steady_window_samples,
        "Wrote BC case file"
    );
    Ok(())
}

/// Outcome of [`export_case_file`].
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub steady_ok: bool,
    pub window_samples: usize,
    /// Input records that failed validation
    pub skipped: Vec<Rejection>,
}

/// Offline export: read samples from `input` (one object or an array),
/// synthesize over the trailing window and write the case file to `output`.
pub fn export_case_file(
    pipeline: &PipelineContext,
    input: &Path,
    output: &Path,
    window: Option<usize>,
) -> Result<ExportSummary> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", input.display()))?;

    let result = pipeline
        .recommend_from_records(body, window)
        .with_context(|| format!("Cannot synthesize boundary conditions from {}", input.display()))?;

    if !result.rejected.is_empty() {
        warn!(skipped = result.rejected.len(), "Some input records were invalid and skipped");
    }
    let bc = &result.boundary_conditions;
    if !bc.validity.steady_ok {
        warn!(
            cv_velocity = bc.validity.cv.velocity,
            cv_pressure = bc.validity.cv.pressure,
            cv_temperature = bc.validity.cv.temperature,
            "Window is not steady; case file written with steady_ok = false"
        );
    }

    write_case_file(bc, output)?;
    Ok(ExportSummary {
        steady_ok: bc.validity.steady_ok,
        window_samples: bc.validity.steady_window_samples,
        skipped: result.rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bc::BcSynthesizer;
    use crate::config::{AssumptionsConfig, SteadyStateConfig};
    use crate::steady_state::SteadyStateEvaluator;
    use crate::storage::Window;
    use crate::types::Sample;
    use chrono::Utc;
    use std::collections::BTreeMap;

    #[test]
    fn test_written_file_parses_back() {
        let samples = (0..4)
            .map(|_| Sample {
                velocity_m_s: 21.5,
                pressure_pa: 180_000.0,
                temperature_k: 305.0,
                density_kg_m3: 1.7,
                rpm: 13_000.0,
                liquid_volume_fraction: 0.03,
                ingested_at: Utc::now(),
                extras: BTreeMap::new(),
            })
            .collect();
        let stats = SteadyStateEvaluator::new(SteadyStateConfig::default())
            .evaluate(&Window::from_samples(samples));
        let bc = BcSynthesizer::new(AssumptionsConfig::default()).synthesize(&stats).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case").join(CASE_FILE_NAME);
        write_case_file(&bc, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"inlet\": {"));
        let parsed: BoundaryCondition = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.meta, bc.meta);
        assert_eq!(parsed.validity.steady_window_samples, 4);
        assert!((parsed.outlet.static_pressure_bar - 1.8).abs() < 1e-12);
        assert!((parsed.inlet.velocity_m_s - 21.5).abs() < 1e-12);
    }

    #[test]
    fn test_export_skips_invalid_records() {
        let record = |p: f64| {
            serde_json::json!({
                "velocity_m_s": 23.0,
                "pressure_Pa": p,
                "temperature_K": 300.0,
                "density_kg_m3": 1.9,
                "rpm": 15000,
                "liquid_volume_fraction": 0.01,
            })
        };
        let mut records: Vec<serde_json::Value> = (0..12).map(|_| record(200_300.0)).collect();
        records.insert(3, serde_json::json!({"velocity_m_s": 23.0}));
        records.push(record(-1.0));

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("samples.json");
        let output = dir.path().join(CASE_FILE_NAME);
        std::fs::write(&input, serde_json::Value::Array(records).to_string()).unwrap();

        let pipeline = PipelineContext::new(&crate::config::ServiceConfig::default());
        let summary = export_case_file(&pipeline, &input, &output, None).unwrap();

        assert_eq!(summary.window_samples, 12);
        assert!(summary.steady_ok);
        let skipped: Vec<usize> = summary.skipped.iter().map(|r| r.index).collect();
        assert_eq!(skipped, vec![3, 13]);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["validity"]["steady_window_samples"], 12);
        assert_eq!(written["outlet"]["type"], "pressure_outlet");
        assert!(pipeline.store().is_empty());
    }

    #[test]
    fn test_export_rejects_non_json_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("samples.json");
        std::fs::write(&input, "velocity,pressure\n23,200300\n").unwrap();

        let pipeline = PipelineContext::new(&crate::config::ServiceConfig::default());
        let err = export_case_file(&pipeline, &input, &dir.path().join("out.json"), None).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
        assert!(!dir.path().join("out.json").exists());
    }
}
