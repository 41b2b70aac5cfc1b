//! Window size resolution for `recent` and `recommend`.

use serde::Serialize;

use crate::config::HistoryConfig;

/// Resolves requested window sizes against the store capacity.
///
/// Every resolved size lies in `[1, capacity]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowLimits {
    pub capacity: usize,
    pub recent_default: usize,
    pub recommend_default: usize,
}

impl WindowLimits {
    pub fn from_config(history: &HistoryConfig) -> Self {
        let capacity = history.capacity_non_zero().get();
        Self {
            capacity,
            recent_default: history.recent_default.clamp(1, capacity),
            recommend_default: history.recommend_default.clamp(1, capacity),
        }
    }

    fn resolve(&self, requested: Option<usize>, default: usize) -> usize {
        requested.unwrap_or(default).clamp(1, self.capacity)
    }

    pub fn recent(&self, requested: Option<usize>) -> usize {
        self.resolve(requested, self.recent_default)
    }

    pub fn recommend(&self, requested: Option<usize>) -> usize {
        self.resolve(requested, self.recommend_default)
    }
}
