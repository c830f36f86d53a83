//! Channel metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a single channel
#[derive(Debug, Default)]
pub struct ChannelMetrics {
    /// Total successful deliveries
    delivered_count: AtomicU64,
    /// Total delivery failures (errors and panics)
    failure_count: AtomicU64,
    /// Duration of the most recent delivery attempt
    last_latency_us: AtomicU64,
}

impl ChannelMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total delivered count
    pub fn delivered_count(&self) -> u64 {
        self.delivered_count.load(Ordering::Relaxed)
    }

    /// Increment delivered count
    pub fn inc_delivered_count(&self) {
        self.delivered_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get last delivery latency in microseconds
    pub fn last_latency_us(&self) -> u64 {
        self.last_latency_us.load(Ordering::Relaxed)
    }

    /// Set last delivery latency in microseconds
    pub fn set_last_latency_us(&self, micros: u64) {
        self.last_latency_us.store(micros, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            delivered_count: self.delivered_count(),
            failure_count: self.failure_count(),
            last_latency_us: self.last_latency_us(),
        }
    }
}

/// Snapshot of channel metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub delivered_count: u64,
    pub failure_count: u64,
    pub last_latency_us: u64,
}

impl MetricsSnapshot {
    /// Total delivery attempts
    pub fn attempts(&self) -> u64 {
        self.delivered_count + self.failure_count
    }
}
