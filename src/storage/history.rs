//! Bounded Sample History
//!
//! Fixed-capacity, insertion-ordered FIFO of validated samples shared by
//! the ingest and recommend paths.
//!
//! A single mutex guards the buffer. It is held only for the push of one
//! sample (or one batch) and for the copy taken by [`HistoryStore::snapshot`];
//! statistics and synthesis always run on the detached [`Window`].

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::debug;

use crate::types::{Field, Sample};

/// Counters describing the store (diagnostics only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub len: usize,
    pub capacity: usize,
    pub total_appended: u64,
    pub total_evicted: u64,
}

#[derive(Debug)]
struct Inner {
    buffer: VecDeque<Arc<Sample>>,
    total_appended: u64,
    total_evicted: u64,
}

/// Process-lifetime bounded history. `len() <= capacity()` always holds.
#[derive(Debug)]
pub struct HistoryStore {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl HistoryStore {
    pub fn new(capacity: NonZeroUsize) -> Self {
        let capacity = capacity.get();
        Self {
            capacity,
            inner: Mutex::new(Inner {
                buffer: VecDeque::with_capacity(capacity),
                total_appended: 0,
                total_evicted: 0,
            }),
        }
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The buffer is structurally valid after any panic (each push or pop
    /// completes or does not happen), so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn push_locked(inner: &mut Inner, capacity: usize, sample: Arc<Sample>) -> bool {
        let evicted = if inner.buffer.len() >= capacity {
            inner.buffer.pop_front();
            inner.total_evicted += 1;
            true
        } else {
            false
        };
        inner.buffer.push_back(sample);
        inner.total_appended += 1;
        evicted
    }

    /// Append one sample at the tail, evicting the oldest if full.
    pub fn append(&self, sample: Sample) {
        let sample = Arc::new(sample);
        let (evicted, len) = {
            let mut inner = self.lock();
            let evicted = Self::push_locked(&mut inner, self.capacity, sample);
            (evicted, inner.buffer.len())
        };
        if evicted {
            debug!(capacity = self.capacity, len, "History full, evicted oldest sample");
        }
    }

    /// Append samples in order under one lock acquisition. Returns the
    /// resulting history length.
    pub fn append_batch(&self, samples: Vec<Sample>) -> usize {
        if samples.is_empty() {
            return self.len();
        }

        let shared: Vec<Arc<Sample>> = samples.into_iter().map(Arc::new).collect();
        let (evicted, len) = {
            let mut inner = self.lock();
            let mut evicted = 0usize;
            for sample in shared {
                if Self::push_locked(&mut inner, self.capacity, sample) {
                    evicted += 1;
                }
            }
            (evicted, inner.buffer.len())
        };
        if evicted > 0 {
            debug!(capacity = self.capacity, evicted, len, "History full, evicted oldest samples");
        }
        len
    }

    /// Detached copy of the last `min(limit, len)` samples, oldest first.
    pub fn snapshot(&self, limit: usize) -> Window {
        let samples: Vec<Arc<Sample>> = {
            let inner = self.lock();
            let take = limit.min(inner.buffer.len());
            let skip = inner.buffer.len() - take;
            inner.buffer.iter().skip(skip).cloned().collect()
        };
        Window { samples }
    }

    pub fn len(&self) -> usize {
        self.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().buffer.is_empty()
    }

    pub fn stats(&self) -> HistoryStats {
        let inner = self.lock();
        HistoryStats {
            len: inner.buffer.len(),
            capacity: self.capacity,
            total_appended: inner.total_appended,
            total_evicted: inner.total_evicted,
        }
    }
}

/// Immutable trailing snapshot of the history, oldest first.
///
/// Holds shared handles to the stored samples; later appends or evictions
/// never change a window that was already taken.
#[derive(Debug, Clone, Default)]
pub struct Window {
    samples: Vec<Arc<Sample>>,
}

impl Window {
    /// Window over samples that never entered the store.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self {
            samples: samples.into_iter().map(Arc::new).collect(),
        }
    }

    /// Keep only the last `limit` samples.
    #[must_use]
    pub fn tail(mut self, limit: usize) -> Self {
        let excess = self.samples.len().saturating_sub(limit);
        self.samples.drain(..excess);
        self
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter().map(AsRef::as_ref)
    }

    /// Values of one canonical field, in window order.
    pub fn values(&self, field: Field) -> Vec<f64> {
        self.iter().map(|s| s.value(field)).collect()
    }
}
