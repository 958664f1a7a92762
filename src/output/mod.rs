//! Result output: text report, JSON summary and the per-request trace

pub mod json;
pub mod text;
pub mod trace;

use crate::config::RunConfig;
use crate::stats::RunSummary;
use tracing::{error, info};

/// Print the report and write the JSON summary if one was requested
///
/// A JSON write failure is logged only; it never changes how the run ended.
pub fn emit_report(config: &RunConfig, summary: &RunSummary) {
    text::print_summary(summary);

    if let Some(ref path) = config.json_output {
        match json::write_json_output(path, &json::JsonOutput::new(config, summary)) {
            Ok(()) => info!(path = %path.display(), "JSON summary written"),
            Err(e) => error!("{:#}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessPattern, RequestType};
    use crate::coordinator::{exit_code, run_benchmark, EXIT_WORKER_FAILED};
    use tempfile::TempDir;

    #[test]
    fn test_json_failure_keeps_worker_exit_code() {
        let dir = TempDir::new().unwrap();
        let mut config = RunConfig::new(dir.path().join("missing.dat"), 1, 4);
        config.request_type = RequestType::Write;
        config.pattern = AccessPattern::Sequential;
        config.json_output = Some(dir.path().join("no/such/dir/summary.json"));

        let result = run_benchmark(config.clone());
        let report = result.as_ref().unwrap();
        emit_report(&config, &report.summary);

        assert!(!dir.path().join("no/such/dir/summary.json").exists());
        assert_eq!(exit_code(&result), EXIT_WORKER_FAILED);
    }

    #[test]
    fn test_json_written_when_requested() {
        let dir = TempDir::new().unwrap();
        let mut config = RunConfig::new(dir.path().join("missing.dat"), 1, 4);
        let json_path = dir.path().join("summary.json");
        config.json_output = Some(json_path.clone());

        let report = run_benchmark(config.clone()).unwrap();
        emit_report(&config, &report.summary);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["summary"]["workers_completed"], 0);
    }
}
