//! IO buffer allocation
//!
//! O_DIRECT requires the user buffer to sit on a sector boundary, so the
//! buffer is allocated with an explicit [`Layout`] rather than through `Vec`.

use crate::error::BenchError;
use std::alloc::{alloc, dealloc, Layout};
use std::fmt;
use std::ptr;

/// Memory-aligned buffer suitable for O_DIRECT operations
pub struct AlignedBuffer {
    ptr: *mut u8,
    size: usize,
    layout: Layout,
}

impl AlignedBuffer {
    /// Allocate a buffer of `size` bytes at an `alignment`-byte boundary
    ///
    /// Fails with an allocation error if `size` is zero, `alignment` is not a
    /// power of two, or the allocator returns null.
    pub fn try_new(size: usize, alignment: usize) -> Result<Self, BenchError> {
        let failed = || BenchError::Allocation { size, alignment };

        if size == 0 {
            return Err(failed());
        }

        let layout = Layout::from_size_align(size, alignment).map_err(|_| failed())?;

        // SAFETY: layout has a non-zero size.
        let ptr = unsafe { alloc(layout) };
        if ptr.is_null() {
            return Err(failed());
        }

        Ok(AlignedBuffer { ptr, size, layout })
    }

    /// Get a raw pointer to the buffer
    #[inline(always)]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr
    }

    /// Get a mutable raw pointer to the buffer
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr
    }

    /// Get the buffer as a slice
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr is valid for `size` bytes for the lifetime of self.
        unsafe { std::slice::from_raw_parts(self.ptr, self.size) }
    }

    /// Get the size of the buffer in bytes
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Alignment the buffer was allocated with
    #[inline(always)]
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }

    /// Verify that the buffer is properly aligned
    #[inline(always)]
    pub fn is_aligned(&self) -> bool {
        (self.ptr as usize) % self.layout.align() == 0
    }

    /// Zero the whole buffer
    pub fn zero(&mut self) {
        // SAFETY: ptr is valid for writes of `size` bytes.
        unsafe { ptr::write_bytes(self.ptr, 0, self.size) };
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc with this exact layout.
        unsafe {
            dealloc(self.ptr, self.layout);
        }
    }
}

impl fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("size", &self.size)
            .field("alignment", &self.layout.align())
            .finish()
    }
}

// AlignedBuffer is Send because it owns its memory
unsafe impl Send for AlignedBuffer {}
