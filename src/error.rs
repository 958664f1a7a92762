//! Error taxonomy
//!
//! Library-level failures are typed so the coordinator can tell a rejected
//! configuration (fatal before any worker starts) apart from a single worker
//! that could not open its target or allocate its buffer.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the benchmark core
#[derive(Debug, Error)]
pub enum BenchError {
    /// Invalid or missing run parameter
    #[error("configuration error: {0}")]
    Config(String),

    /// Target could not be opened with the requested flags
    #[error("failed to open {path} (direct={direct}): {source}")]
    Open {
        path: PathBuf,
        direct: bool,
        #[source]
        source: io::Error,
    },

    /// IO buffer allocation failed
    #[error("failed to allocate {size} byte buffer (alignment {alignment})")]
    Allocation { size: usize, alignment: usize },

    /// A read or write call failed or transferred fewer bytes than requested
    #[error("{op} failed at offset {offset} ({transferred}/{length} bytes): {source}")]
    Io {
        op: &'static str,
        offset: u64,
        length: usize,
        transferred: usize,
        #[source]
        source: io::Error,
    },

    /// Trace file could not be created or written
    #[error("trace file {path}: {source}")]
    Trace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Worker thread could not be spawned or panicked
    ///
    /// `worker` is 1-based, matching reports and traces.
    #[error("worker thread {reason}")]
    Worker { worker: usize, reason: String },
}

impl BenchError {
    /// Shorthand for a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short label used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "ConfigError",
            Self::Open { .. } => "OpenError",
            Self::Allocation { .. } => "AllocationError",
            Self::Io { .. } => "IOError",
            Self::Trace { .. } => "TraceError",
            Self::Worker { .. } => "WorkerError",
        }
    }
}
