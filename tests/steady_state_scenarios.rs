//! Steady-State Scenario Tests
//!
//! End-to-end runs through `PipelineContext`: seeded noisy telemetry is
//! ingested, then recommended on. Also covers determinism and concurrent
//! access to the history store.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use wgc_bc::config::ServiceConfig;
use wgc_bc::pipeline::PipelineContext;
use wgc_bc::storage::HistoryStore;
use wgc_bc::types::Sample;
use wgc_bc::InsufficientDataError;

/// Telemetry around an operating point, with uniform noise of the given
/// half-widths on velocity, pressure and temperature.
fn noisy_batch(seed: u64, n: usize, v_noise: f64, p_noise: f64, t_noise: f64) -> Value {
    let mut rng = StdRng::seed_from_u64(seed);
    let records = (0..n)
        .map(|_| {
            json!({
                "velocity_m_s": 23.0 + rng.gen_range(-v_noise..=v_noise),
                "pressure_Pa": 200_300.0 + rng.gen_range(-p_noise..=p_noise),
                "temperature_K": 308.0 + rng.gen_range(-t_noise..=t_noise),
                "density_kg_m3": 1.95,
                "rpm": 14_800.0 + rng.gen_range(-50.0..=50.0),
                "liquid_volume_fraction": 0.012,
            })
        })
        .collect();
    Value::Array(records)
}

fn context() -> PipelineContext {
    PipelineContext::new(&ServiceConfig::default())
}

#[test]
fn steady_scenario_yields_valid_bc() {
    let ctx = context();
    let report = ctx.ingest(noisy_batch(7, 120, 0.2, 150.0, 0.4)).unwrap();
    assert_eq!(report.accepted_count, 120);

    let bc = ctx.recommend(Some(60)).unwrap();
    assert!(bc.validity.steady_ok, "cv = {:?}", bc.validity.cv);
    assert!(!bc.validity.insufficient_data);
    assert_eq!(bc.validity.steady_window_samples, 60);
    assert!((bc.outlet.static_pressure_bar - 2.003).abs() < 0.002);
    assert!((bc.inlet.velocity_m_s - 23.0).abs() < 0.1);
    assert!((bc.inlet.total_temperature_k - 308.0).abs() < 0.2);
    assert!(bc.validity.cv.pressure < 0.01);
}

#[test]
fn reference_operating_point_at_constant_temperature() {
    let mut rng = StdRng::seed_from_u64(2003);
    let records: Vec<Value> = (0..60)
        .map(|_| {
            json!({
                "velocity_m_s": 23.0 + rng.gen_range(-0.1..=0.1),
                "pressure_Pa": 200_300.0 + rng.gen_range(-50.0..=50.0),
                "temperature_K": 300.0,
                "density_kg_m3": 1.95,
                "rpm": 14_800.0,
                "liquid_volume_fraction": 0.012,
            })
        })
        .collect();

    let ctx = context();
    assert_eq!(ctx.ingest(Value::Array(records)).unwrap().accepted_count, 60);

    let bc = ctx.recommend(None).unwrap();
    assert!(bc.validity.steady_ok, "cv = {:?}", bc.validity.cv);
    assert_eq!(bc.validity.steady_window_samples, 60);
    assert!((bc.outlet.static_pressure_bar - 2.003).abs() < 0.001);
    assert!((bc.inlet.velocity_m_s - 23.0).abs() < 0.05);
    assert!((bc.inlet.total_temperature_k - 300.0).abs() < 1e-9);
    assert!(bc.validity.cv.temperature < 1e-12);
    assert!(bc.validity.cv.pressure < 1e-3);
}

#[test]
fn dispersed_pressure_fails_steady_gate() {
    let ctx = context();
    ctx.ingest(noisy_batch(11, 60, 0.2, 50_000.0, 0.4)).unwrap();

    let bc = ctx.recommend(None).unwrap();
    assert!(bc.validity.cv.pressure > 0.01);
    assert!(!bc.validity.steady_ok);
    // Still a complete document
    assert_eq!(bc.meta.schema_version, "1.0");
    assert_eq!(bc.validity.steady_window_samples, 60);
}

#[test]
fn recovery_after_transient() {
    let ctx = context();
    ctx.ingest(noisy_batch(3, 40, 5.0, 40_000.0, 20.0)).unwrap();
    ctx.ingest(noisy_batch(4, 60, 0.1, 100.0, 0.2)).unwrap();

    assert!(!ctx.recommend(Some(100)).unwrap().validity.steady_ok);
    assert!(ctx.recommend(Some(60)).unwrap().validity.steady_ok);
}

#[test]
fn empty_and_single_sample_windows() {
    let ctx = context();
    assert_eq!(ctx.recommend(None), Err(InsufficientDataError));

    ctx.ingest(noisy_batch(5, 1, 0.0, 0.0, 0.0)).unwrap();
    let bc = ctx.recommend(None).unwrap();
    assert!(!bc.validity.steady_ok);
    assert!(bc.validity.insufficient_data);
    assert_eq!(bc.validity.cv.velocity, 0.0);
}

#[test]
fn identical_windows_give_byte_identical_documents() {
    let a = context();
    let b = context();
    a.ingest(noisy_batch(42, 80, 0.3, 300.0, 0.5)).unwrap();
    b.ingest(noisy_batch(42, 80, 0.3, 300.0, 0.5)).unwrap();

    let doc_a = serde_json::to_string(&a.recommend(None).unwrap()).unwrap();
    let doc_b = serde_json::to_string(&b.recommend(None).unwrap()).unwrap();
    assert_eq!(doc_a, doc_b);
    assert_eq!(doc_a, serde_json::to_string(&a.recommend(None).unwrap()).unwrap());
}

#[test]
fn outlet_ratio_is_configurable() {
    let mut config = ServiceConfig::default();
    config.assumptions.outlet_pressure_ratio = 1.25;
    let ctx = PipelineContext::new(&config);
    ctx.ingest(noisy_batch(9, 20, 0.0, 0.0, 0.0)).unwrap();

    let bc = ctx.recommend(None).unwrap();
    assert!((bc.outlet.static_pressure_bar - 2.003 * 1.25).abs() < 1e-9);
    assert_eq!(bc.outlet.pressure_ratio, 1.25);
}

#[test]
fn numeric_strings_are_normalized() {
    let ctx = context();
    let report = ctx
        .ingest(json!({
            "velocity_m_s": "23.0",
            "pressure_Pa": " 200300.5 ",
            "temperature_K": "308",
            "density_kg_m3": 1.95,
            "rpm": "14800",
            "liquid_volume_fraction": "0.01",
        }))
        .unwrap();
    assert_eq!(report.accepted_count, 1);

    let window = ctx.recent(None);
    let sample = window.iter().next().unwrap();
    assert!((sample.pressure_pa - 200_300.5).abs() < 1e-9);
    assert!((sample.rpm - 14_800.0).abs() < 1e-9);
}

#[test]
fn capacity_holds_under_long_ingest() {
    let mut config = ServiceConfig::default();
    config.history.capacity = 50;
    let ctx = PipelineContext::new(&config);

    for seed in 0..10 {
        ctx.ingest(noisy_batch(seed, 17, 0.1, 100.0, 0.1)).unwrap();
        assert!(ctx.store().len() <= 50);
    }
    let stats = ctx.store().stats();
    assert_eq!(stats.len, 50);
    assert_eq!(stats.total_appended, 170);
    assert_eq!(stats.total_evicted, 120);
    assert_eq!(ctx.recent(Some(1_000)).len(), 50);
}

// ============================================================================
// Concurrency
// ============================================================================

/// Writer id in `rpm`, per-writer sequence number in `velocity_m_s`.
fn tagged(writer: usize, seq: usize) -> Sample {
    Sample {
        velocity_m_s: seq as f64,
        pressure_pa: 2.0e5,
        temperature_k: 300.0,
        density_kg_m3: 1.9,
        rpm: writer as f64,
        liquid_volume_fraction: 0.0,
        ingested_at: Utc::now(),
        extras: BTreeMap::new(),
    }
}

#[test]
fn concurrent_appenders_and_readers_see_ordered_windows() {
    const WRITERS: usize = 4;
    const PER_WRITER: usize = 2_000;
    const CAPACITY: usize = 500;

    let store = Arc::new(HistoryStore::new(NonZeroUsize::new(CAPACITY).unwrap()));

    let writers: Vec<_> = (0..WRITERS)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for seq in 0..PER_WRITER {
                    store.append(tagged(w, seq));
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..2)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..500 {
                    let window = store.snapshot(CAPACITY);
                    assert!(window.len() <= CAPACITY);
                    let mut last_seq = [-1.0_f64; WRITERS];
                    for sample in window.iter() {
                        let w = sample.rpm as usize;
                        assert!(sample.velocity_m_s > last_seq[w], "writer {w} reordered");
                        last_seq[w] = sample.velocity_m_s;
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let stats = store.stats();
    assert_eq!(stats.len, CAPACITY);
    assert_eq!(stats.total_appended, (WRITERS * PER_WRITER) as u64);
    assert_eq!(stats.total_evicted, (WRITERS * PER_WRITER - CAPACITY) as u64);
}
