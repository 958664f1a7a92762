//! Timing and rate helpers
//!
//! Latencies are kept as fractional milliseconds measured on the monotonic
//! clock (`Instant`).

use std::time::Duration;

/// Bytes per MiB; all MB figures in reports are binary megabytes
pub const MIB: u64 = 1024 * 1024;

/// Duration as fractional milliseconds
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use simplebench::util::time::duration_ms;
///
/// assert_eq!(duration_ms(Duration::from_micros(1500)), 1.5);
/// ```
#[inline]
pub fn duration_ms(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

/// Calculate IOPS from operation count and duration
///
/// Returns 0 for a zero duration.
pub fn calculate_iops(operations: u64, duration: Duration) -> f64 {
    let secs = duration.as_secs_f64();
    if secs == 0.0 {
        return 0.0;
    }
    operations as f64 / secs
}

/// Calculate bandwidth in MB/s (binary megabytes)
///
/// Returns 0 for a zero duration.
pub fn calculate_bandwidth_mbps(bytes: u64, duration: Duration) -> f64 {
    let secs = duration.as_secs_f64();
    if secs == 0.0 {
        return 0.0;
    }
    (bytes as f64 / MIB as f64) / secs
}

/// Format a rate (operations per second)
///
/// # Examples
///
/// ```
/// use simplebench::util::time::format_rate;
///
/// assert_eq!(format_rate(500.0), "500");
/// assert_eq!(format_rate(1500.0), "1.50K");
/// assert_eq!(format_rate(2_500_000.0), "2.50M");
/// ```
pub fn format_rate(rate: f64) -> String {
    if rate < 1_000.0 {
        format!("{:.0}", rate)
    } else if rate < 1_000_000.0 {
        format!("{:.2}K", rate / 1_000.0)
    } else if rate < 1_000_000_000.0 {
        format!("{:.2}M", rate / 1_000_000.0)
    } else {
        format!("{:.2}G", rate / 1_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_ms_fractional() {
        assert_eq!(duration_ms(Duration::from_nanos(250_000)), 0.25);
        assert_eq!(duration_ms(Duration::from_secs(2)), 2000.0);
    }

    #[test]
    fn test_calculate_iops() {
        assert_eq!(calculate_iops(1000, Duration::from_secs(1)), 1000.0);
        assert_eq!(calculate_iops(1000, Duration::from_secs(4)), 250.0);
        assert_eq!(calculate_iops(1000, Duration::ZERO), 0.0);
    }

    #[test]
    fn test_calculate_bandwidth() {
        assert_eq!(calculate_bandwidth_mbps(10 * MIB, Duration::from_secs(2)), 5.0);
        assert_eq!(calculate_bandwidth_mbps(MIB / 2, Duration::from_secs(1)), 0.5);
        assert_eq!(calculate_bandwidth_mbps(MIB, Duration::ZERO), 0.0);
    }
}
