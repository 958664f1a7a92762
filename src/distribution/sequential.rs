//! Sequential slot generation
//!
//! The slot is the worker's own request index, so each worker walks
//! `0, 1, 2, ...` from the start of the target. Nothing wraps: once a read
//! stream passes the end of the target its requests come back short.

use crate::distribution::Distribution;

/// Sequential slot generator
#[derive(Debug, Default)]
pub struct SequentialDistribution;

impl SequentialDistribution {
    /// Create a new sequential distribution
    pub fn new() -> Self {
        Self
    }
}

impl Distribution for SequentialDistribution {
    #[inline(always)]
    fn next_slot(&mut self, request_index: u64, _num_slots: u64) -> u64 {
        request_index
    }
}
