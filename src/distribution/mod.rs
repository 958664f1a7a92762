//! Offset generation
//!
//! Distributions generate request slot numbers (0, 1, 2, ..., N-1) rather than
//! byte offsets. The [`OffsetGenerator`] converts a slot to a byte offset with
//! `offset = slot * request_size`, so every offset is naturally aligned to the
//! request size (and therefore to the 512-byte sector required by O_DIRECT).
//!
//! # Example
//!
//! ```
//! use simplebench::config::AccessPattern;
//! use simplebench::distribution::OffsetGenerator;
//!
//! let mut gen = OffsetGenerator::new(AccessPattern::Random, 1024, 10 * 1024 * 1024, Some(1)).unwrap();
//! let offset = gen.next_offset(0);
//! assert!(offset < 10 * 1024 * 1024);
//! assert_eq!(offset % 1024, 0);
//! ```

pub mod sequential;
pub mod uniform;

use crate::config::AccessPattern;
use crate::error::BenchError;
use sequential::SequentialDistribution;
use uniform::UniformDistribution;

/// Slot number generation
///
/// Distributions must be `Send` so each worker can own its own instance; no
/// state is shared between workers.
pub trait Distribution: Send {
    /// Next slot number for the request with local index `request_index`
    ///
    /// `num_slots` is the number of request-sized slots in the addressable
    /// window. Bounded distributions return a value in `[0, num_slots)`.
    fn next_slot(&mut self, request_index: u64, num_slots: u64) -> u64;
}

/// Per-worker byte offset generator
pub struct OffsetGenerator {
    distribution: Box<dyn Distribution>,
    request_size: u64,
    num_slots: u64,
}

impl OffsetGenerator {
    /// Create a generator for `pattern`
    ///
    /// `seed` seeds the random pattern; `None` draws the seed from entropy.
    /// Fails with a configuration error when the random pattern has no
    /// request-sized slot in `[0, range_bytes)`.
    pub fn new(
        pattern: AccessPattern,
        request_size: u64,
        range_bytes: u64,
        seed: Option<u64>,
    ) -> Result<Self, BenchError> {
        if request_size == 0 {
            return Err(BenchError::config("request size must be greater than 0"));
        }

        let num_slots = range_bytes / request_size;

        let distribution: Box<dyn Distribution> = match pattern {
            AccessPattern::Sequential => Box::new(SequentialDistribution::new()),
            AccessPattern::Random => {
                if num_slots == 0 {
                    return Err(BenchError::config(format!(
                        "range of {} bytes holds no {} byte request",
                        range_bytes, request_size
                    )));
                }
                match seed {
                    Some(seed) => Box::new(UniformDistribution::with_seed(seed)),
                    None => Box::new(UniformDistribution::new()),
                }
            }
        };

        Ok(Self {
            distribution,
            request_size,
            num_slots,
        })
    }

    /// Byte offset for the request with local index `request_index`
    #[inline]
    pub fn next_offset(&mut self, request_index: u64) -> u64 {
        self.distribution
            .next_slot(request_index, self.num_slots)
            .saturating_mul(self.request_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_sequential_offsets_strictly_increasing() {
        let mut gen = OffsetGenerator::new(AccessPattern::Sequential, 4 * KIB, 0, None).unwrap();
        let offsets: Vec<u64> = (0..1000).map(|i| gen.next_offset(i)).collect();

        for (i, offset) in offsets.iter().enumerate() {
            assert_eq!(*offset, i as u64 * 4096);
        }
        assert_eq!(&offsets[..3], &[0, 4096, 8192]);
    }

    #[test]
    fn test_sequential_ignores_range() {
        // The range only bounds random offsets
        let mut gen = OffsetGenerator::new(AccessPattern::Sequential, 4 * KIB, MIB, None).unwrap();
        assert_eq!(gen.next_offset(1000), 1000 * 4096);
    }

    #[test]
    fn test_sequential_generators_overlap() {
        // Each worker owns its own cursor starting at 0
        let mut a = OffsetGenerator::new(AccessPattern::Sequential, 4 * KIB, 0, None).unwrap();
        let mut b = OffsetGenerator::new(AccessPattern::Sequential, 4 * KIB, 0, None).unwrap();
        for i in 0..10 {
            assert_eq!(a.next_offset(i), b.next_offset(i));
        }
    }

    #[test]
    fn test_random_offsets_bounded_and_aligned() {
        let mut gen =
            OffsetGenerator::new(AccessPattern::Random, KIB, 10 * MIB, Some(42)).unwrap();
        for i in 0..10_000 {
            let offset = gen.next_offset(i);
            assert!(offset < 10 * MIB, "offset {} out of range", offset);
            assert_eq!(offset % 1024, 0, "offset {} not aligned", offset);
        }
    }

    #[test]
    fn test_random_single_slot() {
        let mut gen = OffsetGenerator::new(AccessPattern::Random, MIB, MIB, None).unwrap();
        for i in 0..100 {
            assert_eq!(gen.next_offset(i), 0);
        }
    }

    #[test]
    fn test_random_degenerate_range_rejected() {
        let err = OffsetGenerator::new(AccessPattern::Random, 4 * KIB, 0, None).err().unwrap();
        assert!(matches!(err, BenchError::Config(_)));

        let err = OffsetGenerator::new(AccessPattern::Random, 4 * KIB, 2 * KIB, None).err().unwrap();
        assert!(matches!(err, BenchError::Config(_)));
    }

    #[test]
    fn test_zero_request_size_rejected() {
        assert!(OffsetGenerator::new(AccessPattern::Sequential, 0, MIB, None).is_err());
    }

    #[test]
    fn test_seeded_generators_reproducible() {
        let mut a = OffsetGenerator::new(AccessPattern::Random, KIB, MIB, Some(9)).unwrap();
        let mut b = OffsetGenerator::new(AccessPattern::Random, KIB, MIB, Some(9)).unwrap();
        for i in 0..100 {
            assert_eq!(a.next_offset(i), b.next_offset(i));
        }
    }
}
