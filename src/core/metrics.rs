//! Logger metrics for observability
//!
//! Counters for monitoring logger health: records written, buffered,
//! filtered out, lost to sink failures, flush cycles and capture reports.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use service_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_dropped();
///
/// assert_eq!(metrics.total_written(), 1);
/// assert_eq!(metrics.dropped_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records successfully handed to a sink
    total_written: AtomicU64,

    /// Records appended to the buffer
    total_buffered: AtomicU64,

    /// Records rejected by the minimum severity filter
    filtered_count: AtomicU64,

    /// Records lost because a sink write failed
    dropped_count: AtomicU64,

    /// Flushes that found something to write
    flush_cycles: AtomicU64,

    /// Exceptions and messages sent to the capture client
    captures_forwarded: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_written: AtomicU64::new(0),
            total_buffered: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            flush_cycles: AtomicU64::new(0),
            captures_forwarded: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_written(&self) -> u64 {
        self.total_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_buffered(&self) -> u64 {
        self.total_buffered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_cycles(&self) -> u64 {
        self.flush_cycles.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn captures_forwarded(&self) -> u64 {
        self.captures_forwarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.total_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_buffered(&self) -> u64 {
        self.total_buffered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record several lost records at once (rest of a failed flush cycle)
    #[inline]
    pub fn record_dropped_many(&self, count: u64) -> u64 {
        self.dropped_count.fetch_add(count, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush_cycle(&self) -> u64 {
        self.flush_cycles.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_capture(&self) -> u64 {
        self.captures_forwarded.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written or dropped.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.total_written() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_written.store(0, Ordering::Relaxed);
        self.total_buffered.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
        self.dropped_count.store(0, Ordering::Relaxed);
        self.flush_cycles.store(0, Ordering::Relaxed);
        self.captures_forwarded.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_written: AtomicU64::new(self.total_written()),
            total_buffered: AtomicU64::new(self.total_buffered()),
            filtered_count: AtomicU64::new(self.filtered_count()),
            dropped_count: AtomicU64::new(self.dropped_count()),
            flush_cycles: AtomicU64::new(self.flush_cycles()),
            captures_forwarded: AtomicU64::new(self.captures_forwarded()),
        }
    }
}
