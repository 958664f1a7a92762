//! Human-readable text output

use crate::stats::RunSummary;
use crate::util::time::format_rate;
use std::fmt::Write;

/// Render the end-of-run report
///
/// The five headline lines (data, requests, latency, IOPS, bandwidth) are
/// always present; worker failures follow when any worker aborted.
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Benchmark completed.");
    let _ = writeln!(out, "Total Data Transferred: {:.2} MB", summary.total_mb);
    let _ = writeln!(out, "Total Requests: {}", summary.total_requests);
    let _ = writeln!(out, "Average Latency: {:.6} ms", summary.avg_latency_ms);
    let _ = writeln!(
        out,
        "Throughput: {:.2} IOPS ({})",
        summary.throughput_iops,
        format_rate(summary.throughput_iops)
    );
    let _ = writeln!(out, "Bandwidth: {:.2} MB/sec", summary.bandwidth_mbps);

    if summary.failed_requests > 0 {
        let _ = writeln!(out, "Failed Requests: {}", summary.failed_requests);
    }

    let _ = writeln!(
        out,
        "Workers: {} of {} completed",
        summary.workers_completed, summary.workers_launched
    );
    for failure in &summary.failures {
        let _ = writeln!(
            out,
            "  worker {}: {}: {}",
            failure.worker, failure.kind, failure.message
        );
    }

    out
}

/// Print the end-of-run report to stdout
pub fn print_summary(summary: &RunSummary) {
    print!("{}", render_summary(summary));
}
