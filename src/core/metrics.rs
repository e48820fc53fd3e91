//! Dispatcher metrics for observability
//!
//! Counters for monitoring dispatcher health: how much work was accepted,
//! how much the worker finished, and what failed along the way.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for dispatcher observability
///
/// # Example
///
/// ```
/// use deferlog::DispatcherMetrics;
///
/// let metrics = DispatcherMetrics::new();
/// metrics.record_submitted();
/// metrics.record_emitted();
/// assert_eq!(metrics.submitted_count(), 1);
/// assert_eq!(metrics.in_flight(), 0);
/// ```
#[derive(Debug)]
pub struct DispatcherMetrics {
    /// Tasks accepted into the queue
    submitted: AtomicU64,

    /// Records the sink accepted
    emitted: AtomicU64,

    /// Deferred suppliers that panicked during evaluation
    eval_failures: AtomicU64,

    /// Records the sink rejected or panicked on
    sink_failures: AtomicU64,

    /// Submissions refused because shutdown had already begun
    rejected: AtomicU64,
}

impl DispatcherMetrics {
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            emitted: AtomicU64::new(0),
            eval_failures: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn submitted_count(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn eval_failure_count(&self) -> u64 {
        self.eval_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failure_count(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected_count(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_submitted(&self) -> u64 {
        self.submitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_eval_failure(&self) -> u64 {
        self.eval_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    /// Tasks accepted but not yet fully processed by the worker.
    ///
    /// Zero after a completed drain.
    pub fn in_flight(&self) -> u64 {
        self.submitted_count()
            .saturating_sub(self.emitted_count() + self.sink_failure_count())
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.submitted.store(0, Ordering::Relaxed);
        self.emitted.store(0, Ordering::Relaxed);
        self.eval_failures.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatcherMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatcherMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            submitted: AtomicU64::new(self.submitted_count()),
            emitted: AtomicU64::new(self.emitted_count()),
            eval_failures: AtomicU64::new(self.eval_failure_count()),
            sink_failures: AtomicU64::new(self.sink_failure_count()),
            rejected: AtomicU64::new(self.rejected_count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = DispatcherMetrics::new();
        assert_eq!(metrics.submitted_count(), 0);
        assert_eq!(metrics.emitted_count(), 0);
        assert_eq!(metrics.eval_failure_count(), 0);
        assert_eq!(metrics.sink_failure_count(), 0);
        assert_eq!(metrics.rejected_count(), 0);
    }

    #[test]
    fn test_in_flight() {
        let metrics = DispatcherMetrics::new();
        metrics.record_submitted();
        metrics.record_submitted();
        metrics.record_submitted();
        assert_eq!(metrics.in_flight(), 3);

        metrics.record_emitted();
        metrics.record_sink_failure();
        assert_eq!(metrics.in_flight(), 1);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = DispatcherMetrics::new();
        metrics.record_submitted();
        metrics.record_rejected();
        metrics.reset();
        assert_eq!(metrics.submitted_count(), 0);
        assert_eq!(metrics.rejected_count(), 0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = DispatcherMetrics::new();
        metrics.record_submitted();
        metrics.record_emitted();

        let snapshot = metrics.clone();
        metrics.record_submitted();

        assert_eq!(snapshot.submitted_count(), 1);
        assert_eq!(metrics.submitted_count(), 2);
    }
}
