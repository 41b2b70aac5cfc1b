//! WGC-BC: Wet-Gas Compressor Boundary Conditions
//!
//! Telemetry-to-CFD service for a wet-gas compressor digital twin.
//!
//! ## Architecture
//!
//! - **Ingest**: validates telemetry samples, one at a time or in batches
//! - **History**: bounded, insertion-ordered in-memory sample store
//! - **Steady State**: windowed means and coefficients of variation
//! - **BC Synthesizer**: OpenFOAM-oriented boundary-condition documents
//! - **API**: axum HTTP surface over the above

pub mod api;
pub mod bc;
pub mod config;
pub mod ingest;
pub mod pipeline;
pub mod steady_state;
pub mod storage;
pub mod types;

// Re-export service configuration
pub use config::ServiceConfig;

// Re-export commonly used types
pub use types::{BoundaryCondition, Field, Sample};

// Re-export the core engines
pub use bc::{BcSynthesizer, InsufficientDataError};
pub use pipeline::{PipelineContext, WindowLimits};
pub use steady_state::{FieldStatistics, SteadyStateEvaluator, WindowStatistics};
pub use storage::{HistoryStore, Window};
