//! Worker thread implementation
//!
//! A worker is the unit of execution: one thread, one open target, one IO
//! buffer. It issues requests back to back until its own deadline passes,
//! then hands its latency samples to the shared aggregator.
//!
//! # Lifecycle
//!
//! 1. Open the target (O_DIRECT if requested)
//! 2. Allocate and zero the IO buffer (sector aligned for O_DIRECT)
//! 3. Loop: next offset, one timed read or write, record, trace,
//!    stop once `elapsed >= duration`
//! 4. Merge latency samples into the aggregator
//!
//! The loop is bounded by wall-clock time only, never by a request count, so
//! a worker may overrun its deadline by at most one request.
//!
//! A failure to open the target or allocate the buffer aborts this worker
//! only; the error is returned to whoever joins the thread.
//!
//! # Example
//!
//! ```no_run
//! use simplebench::config::RunConfig;
//! use simplebench::stats::aggregator::Aggregator;
//! use simplebench::worker::Worker;
//! use std::sync::Arc;
//!
//! let config = Arc::new(RunConfig::new("/tmp/bench.dat", 5, 4));
//! let aggregator = Arc::new(Aggregator::new());
//!
//! let outcome = Worker::new(0, config, Arc::clone(&aggregator)).run()?;
//! println!("worker {} completed {} requests", outcome.id + 1, outcome.requests);
//! # Ok::<(), simplebench::BenchError>(())
//! ```

use crate::config::RunConfig;
use crate::distribution::OffsetGenerator;
use crate::engine::sync::SyncEngine;
use crate::engine::{check_transfer, IOEngine, IOOperation};
use crate::error::BenchError;
use crate::output::trace::{TraceRecord, TraceSink};
use crate::stats::aggregator::Aggregator;
use crate::stats::WorkerStats;
use crate::target::FileTarget;
use crate::util::buffer::AlignedBuffer;
use crate::util::time::duration_ms;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Result of a worker that ran to its deadline
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerOutcome {
    /// 0-based worker id
    pub id: usize,
    /// Completed requests
    pub requests: u64,
    /// Requests that failed or transferred short
    pub failed_requests: u64,
    /// Time from the first request to loop exit
    pub elapsed: Duration,
}

/// Worker thread that executes IO requests
pub struct Worker {
    id: usize,
    config: Arc<RunConfig>,
    aggregator: Arc<Aggregator>,
    trace: Option<Arc<TraceSink>>,
    engine: Box<dyn IOEngine>,
    /// Time origin for trace timestamps
    epoch: Instant,
}

impl Worker {
    /// Create a worker with the synchronous engine
    ///
    /// `id` is 0-based; traces and logs print it 1-based.
    pub fn new(id: usize, config: Arc<RunConfig>, aggregator: Arc<Aggregator>) -> Self {
        Self {
            id,
            config,
            aggregator,
            trace: None,
            engine: Box::new(SyncEngine::new()),
            epoch: Instant::now(),
        }
    }

    /// Emit a trace record for every completed request
    pub fn with_trace(mut self, trace: Arc<TraceSink>) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Replace the IO engine
    pub fn with_engine(mut self, engine: Box<dyn IOEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Measure trace timestamps from `epoch` (the run start)
    pub fn with_epoch(mut self, epoch: Instant) -> Self {
        self.epoch = epoch;
        self
    }

    /// Run to completion
    pub fn run(self) -> Result<WorkerOutcome, BenchError> {
        let Worker {
            id,
            config,
            aggregator,
            mut trace,
            mut engine,
            epoch,
        } = self;
        let thread_no = id + 1;

        info!(worker = thread_no, target = %config.target.display(), "worker starting");

        let target = FileTarget::open(&config.target, config.direct).map_err(|e| {
            error!(worker = thread_no, "{}", e);
            e
        })?;
        debug!(
            worker = thread_no,
            path = %target.path().display(),
            kind = %target.kind(),
            size = target.size(),
            direct = target.is_direct(),
            "target opened"
        );

        let request_size = config.request_size_bytes();
        let length = request_size as usize;
        let mut buffer = AlignedBuffer::try_new(length, config.buffer_alignment()).map_err(|e| {
            error!(worker = thread_no, "{}", e);
            e
        })?;
        buffer.zero();

        let seed = config.seed.map(|s| s.wrapping_add(id as u64));
        let mut offsets =
            OffsetGenerator::new(config.pattern, request_size, config.range_bytes(), seed)?;

        let mut stats = WorkerStats::new();
        let fd = target.fd();
        let duration = config.duration();
        let mut request_index: u64 = 0;

        let start_time = Instant::now();
        loop {
            let offset = offsets.next_offset(request_index);

            let request_start = Instant::now();
            let result = engine.execute(IOOperation {
                op_type: config.request_type,
                target_fd: fd,
                offset,
                buffer: &mut buffer,
            });
            let request_end = Instant::now();
            let latency_ms = duration_ms(request_end - request_start);

            match check_transfer(config.request_type, offset, length, result) {
                Ok(()) => {
                    stats.record_success(latency_ms);
                    aggregator.record_request(request_size);

                    let trace_result = trace.as_deref().map(|sink| {
                        sink.record(&TraceRecord::new(
                            request_start.saturating_duration_since(epoch).as_secs_f64(),
                            thread_no,
                            config.request_type,
                            offset,
                            request_size,
                            latency_ms,
                        ))
                    });
                    if let Some(Err(e)) = trace_result {
                        error!(worker = thread_no, "{}; tracing disabled for this worker", e);
                        trace = None;
                    }
                }
                Err(e) => {
                    if stats.failed() == 0 {
                        warn!(worker = thread_no, "{}", e);
                    }
                    stats.record_failure();
                    aggregator.record_failure();
                }
            }

            request_index += 1;

            if start_time.elapsed() >= duration {
                break;
            }
        }
        let elapsed = start_time.elapsed();

        let outcome = WorkerOutcome {
            id,
            requests: stats.requests(),
            failed_requests: stats.failed(),
            elapsed,
        };

        if outcome.failed_requests > 0 {
            warn!(
                worker = thread_no,
                failed = outcome.failed_requests,
                "requests failed or transferred short"
            );
        }

        aggregator.merge_latencies(stats.take_latencies());

        info!(
            worker = thread_no,
            requests = outcome.requests,
            engine = engine.name(),
            "worker completed"
        );

        Ok(outcome)
    }
}
