//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! The core receives a fully populated, validated [`RunConfig`] and never
//! mutates it.

pub mod cli;
pub mod toml;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Sector size used for trace addressing and direct IO buffer alignment
pub const SECTOR_SIZE: u64 = 512;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Wall-clock run time in seconds
    pub duration_secs: u64,
    /// File or block device under test
    pub target: PathBuf,
    /// Addressable window for random offsets, in MiB
    #[serde(default)]
    pub range_mib: u64,
    /// Request size in KiB
    pub request_size_kib: u64,
    #[serde(default)]
    pub request_type: RequestType,
    #[serde(default)]
    pub pattern: AccessPattern,
    /// Number of worker threads
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Open the target with O_DIRECT
    #[serde(default)]
    pub direct: bool,
    /// Per-request trace output
    #[serde(default)]
    pub trace_path: Option<PathBuf>,
    /// Base seed for the random offset generators (worker `i` uses `seed + i`)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Machine-readable summary output
    #[serde(default)]
    pub json_output: Option<PathBuf>,
}

fn default_threads() -> usize {
    1
}

impl RunConfig {
    /// Config with the given required fields and defaults for everything else
    pub fn new(target: impl Into<PathBuf>, duration_secs: u64, request_size_kib: u64) -> Self {
        Self {
            duration_secs,
            target: target.into(),
            range_mib: 0,
            request_size_kib,
            request_type: RequestType::default(),
            pattern: AccessPattern::default(),
            threads: default_threads(),
            direct: false,
            trace_path: None,
            seed: None,
            json_output: None,
        }
    }

    /// Request size in bytes, saturating on overflow
    #[inline]
    pub fn request_size_bytes(&self) -> u64 {
        self.request_size_kib.saturating_mul(KIB)
    }

    /// Random offset window in bytes, saturating on overflow
    #[inline]
    pub fn range_bytes(&self) -> u64 {
        self.range_mib.saturating_mul(MIB)
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    /// Buffer alignment required by the configured open mode
    #[inline]
    pub fn buffer_alignment(&self) -> usize {
        if self.direct {
            SECTOR_SIZE as usize
        } else {
            1
        }
    }
}

/// Request type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    #[default]
    Read,
    Write,
}

impl RequestType {
    /// Single-letter code used on the command line and in trace files
    pub fn code(self) -> char {
        match self {
            Self::Read => 'R',
            Self::Write => 'W',
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "read" => Ok(Self::Read),
            "w" | "write" => Ok(Self::Write),
            other => Err(format!("invalid request type '{}' (expected R or W)", other)),
        }
    }
}

/// Access pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPattern {
    #[default]
    Sequential,
    Random,
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl FromStr for AccessPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "seq" | "sequential" => Ok(Self::Sequential),
            "r" | "rand" | "random" => Ok(Self::Random),
            other => Err(format!("invalid pattern '{}' (expected S or R)", other)),
        }
    }
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Target:       {}", self.target.display())?;
        writeln!(f, "Duration:     {}s", self.duration_secs)?;
        writeln!(f, "Request:      {} {} KiB", self.request_type, self.request_size_kib)?;
        writeln!(f, "Pattern:      {}", self.pattern)?;
        if self.pattern == AccessPattern::Random {
            writeln!(f, "Range:        {} MiB", self.range_mib)?;
        }
        writeln!(f, "Threads:      {}", self.threads)?;
        write!(f, "Direct IO:    {}", if self.direct { "yes" } else { "no" })?;
        if let Some(ref trace) = self.trace_path {
            write!(f, "\nTrace:        {}", trace.display())?;
        }
        Ok(())
    }
}
