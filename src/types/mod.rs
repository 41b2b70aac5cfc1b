//! Shared data structures for the boundary-condition pipeline:
//! - `Sample`: one validated telemetry observation
//! - `BoundaryCondition`: the synthesized solver document

mod boundary;
mod sample;

pub use boundary::*;
pub use sample::*;
