//! Coordinator module
//!
//! Orchestrates workers and aggregates results. A run is:
//!
//! 1. validate the configuration (any error here is fatal, nothing has run)
//! 2. create the shared aggregator and, if requested, the trace sink
//! 3. spawn one OS thread per worker, all at once
//! 4. join every worker; this is the only run-wide synchronization point
//! 5. build the summary from the aggregator
//!
//! Workers that fail to open the target or allocate their buffer abort on
//! their own; the run continues with the rest and the summary lists them.

use crate::config::validator::validate_config;
use crate::config::{AccessPattern, RunConfig};
use crate::error::BenchError;
use crate::output::trace::TraceSink;
use crate::stats::aggregator::Aggregator;
use crate::stats::{RunSummary, WorkerFailure};
use crate::target;
use crate::worker::{Worker, WorkerOutcome};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Exit code of a run where every worker completed
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code when the run could not start
pub const EXIT_CONFIG: u8 = 1;
/// Exit code when at least one worker aborted
pub const EXIT_WORKER_FAILED: u8 = 2;

/// Everything a finished run produced
#[derive(Debug)]
pub struct RunReport {
    pub summary: RunSummary,
    /// One entry per launched worker, in worker order
    pub outcomes: Vec<Result<WorkerOutcome, BenchError>>,
    /// Trace lines written, when tracing was enabled
    pub trace_records: Option<u64>,
}

impl RunReport {
    pub fn all_workers_completed(&self) -> bool {
        self.summary.all_workers_completed()
    }
}

/// Run the benchmark described by `config`
///
/// Returns an error only for problems detected before any worker starts:
/// an invalid configuration or an uncreatable trace file.
pub fn run_benchmark(config: RunConfig) -> Result<RunReport, BenchError> {
    validate_config(&config)?;
    check_target(&config);

    let config = Arc::new(config);
    let aggregator = Arc::new(Aggregator::new());
    let trace = match config.trace_path {
        Some(ref path) => Some(Arc::new(TraceSink::create(path)?)),
        None => None,
    };

    info!(threads = config.threads, target = %config.target.display(), "starting workers");

    let epoch = Instant::now();
    let handles: Vec<_> = (0..config.threads)
        .map(|id| {
            let mut worker = Worker::new(id, Arc::clone(&config), Arc::clone(&aggregator))
                .with_epoch(epoch);
            if let Some(ref sink) = trace {
                worker = worker.with_trace(Arc::clone(sink));
            }

            thread::Builder::new()
                .name(format!("worker-{}", id + 1))
                .spawn(move || worker.run())
                .map_err(|e| BenchError::Worker {
                    worker: id + 1,
                    reason: format!("could not be spawned: {}", e),
                })
        })
        .collect();

    let outcomes: Vec<_> = handles
        .into_iter()
        .enumerate()
        .map(|(id, handle)| join_worker(id + 1, handle))
        .collect();
    let elapsed = epoch.elapsed();

    let trace_records = trace.as_ref().map(|sink| {
        if let Err(e) = sink.flush() {
            error!("{}", e);
        }
        sink.records()
    });

    let mut completed = 0;
    let mut failures = Vec::new();
    for (id, outcome) in outcomes.iter().enumerate() {
        match outcome {
            Ok(_) => completed += 1,
            Err(e) => failures.push(WorkerFailure {
                worker: id + 1,
                kind: e.kind().to_string(),
                message: e.to_string(),
            }),
        }
    }

    if !failures.is_empty() {
        warn!(
            completed,
            launched = config.threads,
            "some workers aborted; totals cover completed workers only"
        );
    }

    let summary = RunSummary::compute(&config, &aggregator.snapshot(), completed, failures, elapsed);
    debug!(?summary, "run finished");

    Ok(RunReport {
        summary,
        outcomes,
        trace_records,
    })
}

/// Wait for one worker; a panic becomes that worker's failure
fn join_worker(
    worker: usize,
    handle: Result<JoinHandle<Result<WorkerOutcome, BenchError>>, BenchError>,
) -> Result<WorkerOutcome, BenchError> {
    handle?.join().unwrap_or_else(|_| {
        Err(BenchError::Worker {
            worker,
            reason: "panicked".to_string(),
        })
    })
}

/// Process exit code for a finished (or rejected) run
///
/// `0` when every worker completed, [`EXIT_WORKER_FAILED`] when any aborted,
/// [`EXIT_CONFIG`] when the run never started.
pub fn exit_code(result: &Result<RunReport, BenchError>) -> u8 {
    match result {
        Ok(report) if report.all_workers_completed() => EXIT_SUCCESS,
        Ok(_) => EXIT_WORKER_FAILED,
        Err(_) => EXIT_CONFIG,
    }
}

/// Warn about target properties that make the results questionable
///
/// A probe failure is not reported here: every worker reports it on open.
fn check_target(config: &RunConfig) {
    let Ok(info) = target::probe(&config.target) else {
        return;
    };
    debug!(kind = %info.kind, size = info.size, "target probed");

    if config.pattern == AccessPattern::Random && config.range_bytes() > info.size {
        warn!(
            range_bytes = config.range_bytes(),
            target_size = info.size,
            "random range extends past the end of the target"
        );
    }
}
