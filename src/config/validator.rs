//! Configuration validation
//!
//! Every check here runs before any worker starts; a failure aborts the run.

use super::{AccessPattern, RunConfig};
use crate::error::BenchError;

/// Upper bound on worker threads
pub const MAX_THREADS: usize = 4096;

/// Validate complete configuration
pub fn validate_config(config: &RunConfig) -> Result<(), BenchError> {
    if config.duration_secs == 0 {
        return Err(BenchError::config("duration must be greater than 0 seconds"));
    }

    if config.target.as_os_str().is_empty() {
        return Err(BenchError::config("target path must not be empty"));
    }

    if config.request_size_kib == 0 {
        return Err(BenchError::config("request size must be greater than 0 KiB"));
    }

    let fits = config
        .request_size_kib
        .checked_mul(1024)
        .map_or(false, |bytes| usize::try_from(bytes).is_ok());
    if !fits {
        return Err(BenchError::config(format!(
            "request size {} KiB does not fit in memory",
            config.request_size_kib
        )));
    }

    if config.threads == 0 || config.threads > MAX_THREADS {
        return Err(BenchError::config(format!(
            "thread count must be between 1 and {}, got {}",
            MAX_THREADS, config.threads
        )));
    }

    validate_range(config)?;

    Ok(())
}

/// The range must be addressable; random offsets also need at least one
/// request-sized slot in it
fn validate_range(config: &RunConfig) -> Result<(), BenchError> {
    let range_bytes = config
        .range_mib
        .checked_mul(1024 * 1024)
        .ok_or_else(|| BenchError::config(format!("range {} MiB overflows", config.range_mib)))?;

    if config.pattern != AccessPattern::Random {
        return Ok(());
    }

    if range_bytes < config.request_size_bytes() {
        return Err(BenchError::config(format!(
            "random pattern needs range ({} MiB) >= request size ({} KiB)",
            config.range_mib, config.request_size_kib
        )));
    }

    Ok(())
}
