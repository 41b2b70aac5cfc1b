//! Boundary-condition synthesis and case-file export

pub mod export;
pub mod synthesizer;

pub use export::{export_case_file, write_case_file, ExportSummary, CASE_FILE_NAME};
pub use synthesizer::{BcSynthesizer, InsufficientDataError, BC_NOTES};
