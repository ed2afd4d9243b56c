use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running tally of bars and ticks produced by one dispatch run.
///
/// Clones share the same tally, so a handle taken before consumption starts
/// can be read from another task while the slice stream is being polled.
/// Each run creates its own counter; runs never share one.
#[derive(Debug, Clone, Default)]
pub struct PointCounter {
    inner: Arc<AtomicU64>,
}

impl PointCounter {
    /// A fresh counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the tally to zero.
    pub fn reset(&self) {
        self.inner.store(0, Ordering::Relaxed);
    }

    /// Add `n` data points.
    pub fn increment(&self, n: u64) {
        self.inner.fetch_add(n, Ordering::Relaxed);
    }

    /// Current tally.
    #[must_use]
    pub fn read(&self) -> u64 {
        self.inner.load(Ordering::Relaxed)
    }
}
