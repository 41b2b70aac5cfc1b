//! In-memory sample storage
//!
//! Nothing here is persisted: history starts empty at process start and is
//! dropped on exit.

pub mod history;

pub use history::{HistoryStats, HistoryStore, Window};
