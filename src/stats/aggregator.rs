//! Cross-thread result aggregation
//!
//! One [`Aggregator`] is shared by every worker of a run through an `Arc`.
//! It holds two independently synchronized resources:
//!
//! - byte/request/failure counters, updated per request with relaxed atomics
//! - the merged latency samples, appended once per worker under a mutex
//!
//! Nothing reads the aggregator until every worker has been joined, so the
//! relaxed counters are only required to be correct at that point.
//!
//! # Example
//!
//! ```
//! use simplebench::stats::aggregator::Aggregator;
//!
//! let aggregator = Aggregator::new();
//! aggregator.record_request(4096);
//! aggregator.record_request(4096);
//! aggregator.merge_latencies(vec![0.5, 1.5]);
//!
//! let snapshot = aggregator.snapshot();
//! assert_eq!(snapshot.total_requests, 2);
//! assert_eq!(snapshot.total_bytes, 8192);
//! assert_eq!(snapshot.latency_sum_ms, 2.0);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Cache-line aligned atomic counter to prevent false sharing
///
/// Every worker bumps these counters on every request; keeping each one on
/// its own 64-byte line stops the counters from invalidating each other.
#[repr(align(64))]
#[derive(Debug, Default)]
pub struct AlignedCounter {
    value: AtomicU64,
}

impl AlignedCounter {
    /// Create a new counter with initial value 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter by the specified amount
    #[inline]
    pub fn add(&self, val: u64) {
        self.value.fetch_add(val, Ordering::Relaxed);
    }

    /// Get the current value of the counter
    #[inline]
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Run-wide totals shared by all workers
#[derive(Debug, Default)]
pub struct Aggregator {
    total_bytes: AlignedCounter,
    total_requests: AlignedCounter,
    failed_requests: AlignedCounter,
    latencies_ms: Mutex<Vec<f64>>,
}

/// Totals read back after the join barrier
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSnapshot {
    pub total_bytes: u64,
    pub total_requests: u64,
    pub failed_requests: u64,
    pub latency_samples: u64,
    pub latency_sum_ms: f64,
}

impl AggregateSnapshot {
    /// Mean latency over all completed requests, 0 when none completed
    pub fn avg_latency_ms(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.latency_sum_ms / self.total_requests as f64
        }
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one completed request of `bytes` bytes
    #[inline]
    pub fn record_request(&self, bytes: u64) {
        self.total_bytes.add(bytes);
        self.total_requests.add(1);
    }

    /// Count one failed request
    #[inline]
    pub fn record_failure(&self) {
        self.failed_requests.add(1);
    }

    /// Append one worker's latency samples
    pub fn merge_latencies(&self, mut batch: Vec<f64>) {
        let mut latencies = self.latencies_ms.lock().unwrap_or_else(|e| e.into_inner());
        latencies.append(&mut batch);
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes.get()
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.get()
    }

    pub fn failed_requests(&self) -> u64 {
        self.failed_requests.get()
    }

    /// Read all totals
    pub fn snapshot(&self) -> AggregateSnapshot {
        let latencies = self.latencies_ms.lock().unwrap_or_else(|e| e.into_inner());
        AggregateSnapshot {
            total_bytes: self.total_bytes.get(),
            total_requests: self.total_requests.get(),
            failed_requests: self.failed_requests.get(),
            latency_samples: latencies.len() as u64,
            latency_sum_ms: latencies.iter().sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_aligned_counter_layout() {
        assert_eq!(std::mem::align_of::<AlignedCounter>(), 64);
        assert_eq!(std::mem::size_of::<AlignedCounter>(), 64);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Aggregator::new().snapshot();
        assert_eq!(snapshot.total_requests, 0);
        assert_eq!(snapshot.latency_samples, 0);
        assert_eq!(snapshot.avg_latency_ms(), 0.0);
    }

    #[test]
    fn test_failures_counted_separately() {
        let aggregator = Aggregator::new();
        aggregator.record_request(1024);
        aggregator.record_failure();
        aggregator.record_failure();

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.total_requests, 1);
        assert_eq!(snapshot.total_bytes, 1024);
        assert_eq!(snapshot.failed_requests, 2);
    }

    #[test]
    fn test_avg_latency() {
        let aggregator = Aggregator::new();
        for _ in 0..4 {
            aggregator.record_request(512);
        }
        aggregator.merge_latencies(vec![1.0, 2.0]);
        aggregator.merge_latencies(vec![3.0, 6.0]);

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.latency_samples, 4);
        assert!((snapshot.avg_latency_ms() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_concurrent_updates() {
        const THREADS: u64 = 8;
        const PER_THREAD: u64 = 10_000;

        let aggregator = Arc::new(Aggregator::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let aggregator = Arc::clone(&aggregator);
                thread::spawn(move || {
                    let mut local = Vec::new();
                    for _ in 0..PER_THREAD {
                        aggregator.record_request(4096);
                        local.push(1.0);
                    }
                    aggregator.merge_latencies(local);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.total_requests, THREADS * PER_THREAD);
        assert_eq!(snapshot.total_bytes, THREADS * PER_THREAD * 4096);
        assert_eq!(snapshot.latency_samples, snapshot.total_requests);
        assert_eq!(snapshot.latency_sum_ms, (THREADS * PER_THREAD) as f64);
    }
}
