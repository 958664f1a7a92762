//! Synchronous IO engine
//!
//! Blocking pread/pwrite. Positioned IO leaves the shared file cursor alone,
//! so a request is one system call with the offset carried in the call. Each
//! call is issued exactly once; partial transfers are returned as-is.

use super::{IOEngine, IOOperation};
use crate::config::RequestType;
use std::io;

/// Synchronous IO engine using pread/pwrite
#[derive(Debug, Default)]
pub struct SyncEngine;

impl SyncEngine {
    /// Create a new synchronous IO engine
    pub fn new() -> Self {
        Self
    }
}

impl IOEngine for SyncEngine {
    #[inline]
    fn execute(&mut self, op: IOOperation<'_>) -> io::Result<usize> {
        let length = op.buffer.size();
        let offset = libc::off_t::try_from(op.offset)
            .map_err(|_| io::Error::from_raw_os_error(libc::EOVERFLOW))?;

        // SAFETY: the buffer is valid for `length` bytes and exclusively
        // borrowed for the duration of the call.
        let result = unsafe {
            match op.op_type {
                RequestType::Read => libc::pread(
                    op.target_fd,
                    op.buffer.as_mut_ptr() as *mut libc::c_void,
                    length,
                    offset,
                ),
                RequestType::Write => libc::pwrite(
                    op.target_fd,
                    op.buffer.as_ptr() as *const libc::c_void,
                    length,
                    offset,
                ),
            }
        };

        if result < 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(result as usize)
    }

    fn name(&self) -> &'static str {
        "sync"
    }
}
