//! Request Pipeline Module
//!
//! ```text
//! HTTP / CLI
//!     |
//!     v
//! PipelineContext ---- ingest ----> SampleValidator -> HistoryStore
//!     |
//!     +--- recommend --> WindowLimits -> snapshot -> SteadyStateEvaluator -> BcSynthesizer
//! ```

mod context;
mod limits;

pub use context::{PipelineContext, PipelineStatus, RecommendError, StatelessRecommendation};
pub use limits::WindowLimits;
