//! Service Configuration Module
//!
//! TOML-backed configuration for the history store, the steady-state gate
//! and the assumed boundary-condition constants.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` CLI flag
//! 2. `WGC_CONFIG` environment variable (path to TOML file)
//! 3. `wgc_bc.toml` in the current working directory
//! 4. Built-in defaults (`config::defaults`)
//!
//! The loaded [`ServiceConfig`] is owned by the caller and handed to
//! [`crate::pipeline::PipelineContext::new`]; there is no global instance.

pub mod defaults;
mod service_config;
pub mod validation;

pub use service_config::*;
