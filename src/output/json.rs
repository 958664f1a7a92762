//! JSON output formatting
//!
//! Machine-readable copy of the end-of-run report, written once after all
//! workers have been joined.

use crate::config::RunConfig;
use crate::stats::RunSummary;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    pub tool: String,
    pub version: String,
    pub config: RunConfig,
    pub summary: RunSummary,
}

impl JsonOutput {
    pub fn new(config: &RunConfig, summary: &RunSummary) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: config.clone(),
            summary: summary.clone(),
        }
    }
}

/// Write JSON output to file
pub fn write_json_output(output_path: &Path, output: &JsonOutput) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;

    serde_json::to_writer_pretty(BufWriter::new(file), output)
        .with_context(|| format!("Failed to write JSON output: {}", output_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::aggregator::AggregateSnapshot;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");

        let config = RunConfig::new("/tmp/t", 2, 8);
        let totals = AggregateSnapshot {
            total_bytes: 100 * 8192,
            total_requests: 100,
            failed_requests: 0,
            latency_samples: 100,
            latency_sum_ms: 10.0,
        };
        let summary = RunSummary::compute(&config, &totals, 1, vec![], Duration::from_secs(2));

        write_json_output(&path, &JsonOutput::new(&config, &summary)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["tool"], "simplebench");
        assert_eq!(value["config"]["request_size_kib"], 8);
        assert_eq!(value["config"]["request_type"], "read");
        assert_eq!(value["summary"]["total_requests"], 100);
        assert_eq!(value["summary"]["throughput_iops"], 50.0);
    }

    #[test]
    fn test_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let config = RunConfig::new("/tmp/t", 1, 4);
        let summary = RunSummary::compute(
            &config,
            &AggregateSnapshot {
                total_bytes: 0,
                total_requests: 0,
                failed_requests: 0,
                latency_samples: 0,
                latency_sum_ms: 0.0,
            },
            1,
            vec![],
            Duration::from_secs(1),
        );
        let path = dir.path().join("missing/summary.json");
        assert!(write_json_output(&path, &JsonOutput::new(&config, &summary)).is_err());
    }
}
