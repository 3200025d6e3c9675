//! Delivery counters for the fan-out dispatcher

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts of log calls and per-sink write outcomes
///
/// # Example
///
/// ```
/// use rust_multisink_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_call();
/// metrics.record_delivered();
/// metrics.record_failed();
///
/// assert_eq!(metrics.calls(), 1);
/// assert_eq!(metrics.failure_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Dispatcher calls, one per log operation
    calls: AtomicU64,

    /// Sink writes that completed
    delivered: AtomicU64,

    /// Sink writes that returned an error or panicked
    failed: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            calls: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_call(&self) -> u64 {
        self.calls.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed sink writes as a percentage of all sink writes (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed() as f64;
        let total = self.delivered() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            calls: AtomicU64::new(self.calls()),
            delivered: AtomicU64::new(self.delivered()),
            failed: AtomicU64::new(self.failed()),
        }
    }
}
