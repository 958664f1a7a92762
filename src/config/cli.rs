//! CLI argument parsing using clap

use super::{AccessPattern, RequestType, RunConfig};
use crate::error::BenchError;
use clap::Parser;
use std::path::PathBuf;

/// simplebench - synchronous storage micro-benchmark
///
/// Every run parameter may also come from a TOML file given with `--config`;
/// values passed on the command line take precedence over the file.
#[derive(Parser, Debug, Default)]
#[command(name = "simplebench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Test duration in seconds
    #[arg(short = 'e', long = "duration")]
    pub duration: Option<u64>,

    /// Target file or block device
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Address range for random offsets, in MiB
    #[arg(short = 'r', long = "range")]
    pub range: Option<u64>,

    /// Request size in KiB
    #[arg(short = 's', long = "request-size")]
    pub request_size: Option<u64>,

    /// Request type: R (read) or W (write)
    #[arg(short = 't', long = "type")]
    pub request_type: Option<RequestType>,

    /// Access pattern: S (sequential) or R (random)
    #[arg(short = 'p', long = "pattern")]
    pub pattern: Option<AccessPattern>,

    /// Number of worker threads
    #[arg(short = 'q', long = "threads")]
    pub threads: Option<usize>,

    /// Direct IO (O_DIRECT): T or F
    #[arg(short = 'd', long = "direct", value_parser = parse_flag)]
    pub direct: Option<bool>,

    /// Per-request trace output file
    #[arg(short = 'o', long = "trace")]
    pub trace: Option<PathBuf>,

    /// TOML run configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the random offset generators (reproducible runs)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a JSON summary to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build a run configuration from the command line alone
    ///
    /// Fails when a required parameter (duration, target, request size) is missing.
    pub fn to_run_config(&self) -> Result<RunConfig, BenchError> {
        let duration = self
            .duration
            .ok_or_else(|| BenchError::config("missing required parameter: -e <duration>"))?;
        let file = self
            .file
            .clone()
            .ok_or_else(|| BenchError::config("missing required parameter: -f <file>"))?;
        let request_size = self
            .request_size
            .ok_or_else(|| BenchError::config("missing required parameter: -s <request size>"))?;

        let mut config = RunConfig::new(file, duration, request_size);
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Overwrite every field of `config` that was given on the command line
    pub fn apply_overrides(&self, config: &mut RunConfig) {
        if let Some(duration) = self.duration {
            config.duration_secs = duration;
        }
        if let Some(ref file) = self.file {
            config.target = file.clone();
        }
        if let Some(range) = self.range {
            config.range_mib = range;
        }
        if let Some(size) = self.request_size {
            config.request_size_kib = size;
        }
        if let Some(request_type) = self.request_type {
            config.request_type = request_type;
        }
        if let Some(pattern) = self.pattern {
            config.pattern = pattern;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(direct) = self.direct {
            config.direct = direct;
        }
        if let Some(ref trace) = self.trace {
            config.trace_path = Some(trace.clone());
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(ref json) = self.json_output {
            config.json_output = Some(json.clone());
        }
    }
}

/// Parse a `T`/`F` style boolean flag
fn parse_flag(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "t" | "true" | "y" | "yes" | "1" => Ok(true),
        "f" | "false" | "n" | "no" | "0" => Ok(false),
        other => Err(format!("invalid flag '{}' (expected T or F)", other)),
    }
}
