//! Statistics collection
//!
//! Each worker keeps a [`WorkerStats`] it owns outright: an ordered list of
//! latency samples plus local request counts. At worker exit the samples are
//! handed to the shared [`aggregator::Aggregator`] in one batch. Once every
//! worker has been joined the totals become a [`RunSummary`].

pub mod aggregator;

use crate::config::{AccessPattern, RequestType, RunConfig};
use crate::util::time::{calculate_bandwidth_mbps, calculate_iops, MIB};
use aggregator::AggregateSnapshot;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Per-worker statistics
#[derive(Debug, Default)]
pub struct WorkerStats {
    latencies_ms: Vec<f64>,
    failed: u64,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed request
    #[inline]
    pub fn record_success(&mut self, latency_ms: f64) {
        self.latencies_ms.push(latency_ms);
    }

    /// Record a failed request
    #[inline]
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Completed requests
    pub fn requests(&self) -> u64 {
        self.latencies_ms.len() as u64
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// Latency samples in issue order
    pub fn latencies(&self) -> &[f64] {
        &self.latencies_ms
    }

    /// Move the samples out, leaving the list empty
    pub fn take_latencies(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.latencies_ms)
    }
}

/// Diagnostic for a worker that aborted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerFailure {
    /// 1-based worker number, as printed in traces
    pub worker: usize,
    pub kind: String,
    pub message: String,
}

/// Final report of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub target: PathBuf,
    pub request_type: RequestType,
    pub pattern: AccessPattern,
    pub request_size_bytes: u64,
    pub duration_secs: u64,
    /// Measured wall-clock time from first spawn to last join
    pub elapsed_secs: f64,
    pub workers_launched: usize,
    pub workers_completed: usize,
    pub failures: Vec<WorkerFailure>,
    pub total_bytes: u64,
    pub total_mb: f64,
    pub total_requests: u64,
    pub failed_requests: u64,
    pub avg_latency_ms: f64,
    pub throughput_iops: f64,
    pub bandwidth_mbps: f64,
}

impl RunSummary {
    /// Compute the summary from the joined run
    ///
    /// Rates are taken over the configured duration rather than the measured
    /// one, so a worker's overrun past its deadline does not dilute them.
    pub fn compute(
        config: &RunConfig,
        totals: &AggregateSnapshot,
        workers_completed: usize,
        failures: Vec<WorkerFailure>,
        elapsed: Duration,
    ) -> Self {
        let duration = config.duration();
        Self {
            target: config.target.clone(),
            request_type: config.request_type,
            pattern: config.pattern,
            request_size_bytes: config.request_size_bytes(),
            duration_secs: config.duration_secs,
            elapsed_secs: elapsed.as_secs_f64(),
            workers_launched: config.threads,
            workers_completed,
            failures,
            total_bytes: totals.total_bytes,
            total_mb: totals.total_bytes as f64 / MIB as f64,
            total_requests: totals.total_requests,
            failed_requests: totals.failed_requests,
            avg_latency_ms: totals.avg_latency_ms(),
            throughput_iops: calculate_iops(totals.total_requests, duration),
            bandwidth_mbps: calculate_bandwidth_mbps(totals.total_bytes, duration),
        }
    }

    /// Whether every launched worker ran to its deadline
    pub fn all_workers_completed(&self) -> bool {
        self.workers_completed == self.workers_launched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_stats_counts() {
        let mut stats = WorkerStats::new();
        stats.record_success(0.25);
        stats.record_success(0.75);
        stats.record_failure();

        assert_eq!(stats.requests(), 2);
        assert_eq!(stats.failed(), 1);
        assert_eq!(stats.latencies(), &[0.25, 0.75]);

        let taken = stats.take_latencies();
        assert_eq!(taken.len(), 2);
        assert_eq!(stats.requests(), 0);
    }

    #[test]
    fn test_summary_figures() {
        let mut config = RunConfig::new("/tmp/t", 2, 4);
        config.threads = 2;
        let totals = AggregateSnapshot {
            total_bytes: 1000 * 4096,
            total_requests: 1000,
            failed_requests: 3,
            latency_samples: 1000,
            latency_sum_ms: 500.0,
        };

        let summary = RunSummary::compute(&config, &totals, 2, vec![], Duration::from_millis(2010));

        assert_eq!(summary.total_requests, 1000);
        assert_eq!(summary.total_bytes / summary.request_size_bytes, summary.total_requests);
        assert!((summary.avg_latency_ms - 0.5).abs() < 1e-12);
        assert!((summary.throughput_iops - 500.0).abs() < 1e-9);
        let expected_bw = (1000.0 * 4096.0 / (1024.0 * 1024.0)) / 2.0;
        assert!((summary.bandwidth_mbps - expected_bw).abs() < 1e-9);
        assert_eq!(summary.failed_requests, 3);
        assert!(summary.all_workers_completed());
    }

    #[test]
    fn test_summary_with_failed_worker() {
        let mut config = RunConfig::new("/tmp/t", 1, 4);
        config.threads = 3;
        let totals = AggregateSnapshot {
            total_bytes: 0,
            total_requests: 0,
            failed_requests: 0,
            latency_samples: 0,
            latency_sum_ms: 0.0,
        };
        let failures = vec![WorkerFailure {
            worker: 2,
            kind: "OpenError".into(),
            message: "no such file".into(),
        }];

        let summary = RunSummary::compute(&config, &totals, 2, failures, Duration::from_secs(1));
        assert!(!summary.all_workers_completed());
        assert_eq!(summary.avg_latency_ms, 0.0);
        assert_eq!(summary.throughput_iops, 0.0);
    }
}
