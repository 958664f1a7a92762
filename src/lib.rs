//! simplebench - synchronous storage micro-benchmark
//!
//! Drives a fixed number of worker threads against one file or block device.
//! Each worker issues fixed-size reads or writes, sequential or random, for a
//! bounded wall-clock duration. The run reports total data, request count,
//! mean latency, IOPS and bandwidth.
//!
//! # Architecture
//!
//! - **config**: run parameters from the CLI and/or a TOML file, validated up front
//! - **distribution**: per-worker offset generation (sequential or uniform random)
//! - **target** / **engine**: opening the target and issuing one pread/pwrite per request
//! - **worker**: the timed request loop
//! - **stats**: per-worker samples and the shared [`stats::aggregator::Aggregator`]
//! - **coordinator**: spawn, join, summarize
//! - **output**: text report, JSON summary, per-request trace
//!
//! # Example
//!
//! ```no_run
//! use simplebench::config::{RequestType, RunConfig};
//! use simplebench::coordinator::run_benchmark;
//!
//! let mut config = RunConfig::new("/tmp/bench.dat", 10, 4);
//! config.request_type = RequestType::Write;
//! config.threads = 4;
//!
//! let report = run_benchmark(config)?;
//! println!("{} IOPS", report.summary.throughput_iops);
//! # Ok::<(), simplebench::BenchError>(())
//! ```

pub mod config;
pub mod coordinator;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod output;
pub mod stats;
pub mod target;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::RunConfig;
pub use error::BenchError;

/// Result type used by the application layer
pub type Result<T> = anyhow::Result<T>;
