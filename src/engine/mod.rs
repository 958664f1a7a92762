//! IO engine abstraction
//!
//! An IO engine performs exactly one positioned read or write per call and
//! reports how many bytes moved. Engines never retry: a failed or short call
//! is handed back to the worker, which classifies it with [`check_transfer`].
//!
//! The worker owns its engine; engines need to be `Send` but not `Sync`.
//!
//! # Example
//!
//! ```no_run
//! use simplebench::config::RequestType;
//! use simplebench::engine::{IOEngine, IOOperation};
//! use simplebench::engine::sync::SyncEngine;
//! use simplebench::util::buffer::AlignedBuffer;
//!
//! let file = std::fs::File::open("/tmp/data")?;
//! let mut buffer = AlignedBuffer::try_new(4096, 512)?;
//! let mut engine = SyncEngine::new();
//!
//! let op = IOOperation {
//!     op_type: RequestType::Read,
//!     target_fd: std::os::unix::io::AsRawFd::as_raw_fd(&file),
//!     offset: 0,
//!     buffer: &mut buffer,
//! };
//! let bytes = engine.execute(op)?;
//! # let _ = bytes;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod mock;
pub mod sync;

use crate::config::RequestType;
use crate::error::BenchError;
use crate::util::buffer::AlignedBuffer;
use std::io;
use std::os::unix::io::RawFd;

/// IO engine trait
pub trait IOEngine: Send {
    /// Perform one read or write of the whole buffer at `op.offset`
    ///
    /// Returns the number of bytes the single system call transferred, which
    /// may be less than the buffer size.
    fn execute(&mut self, op: IOOperation<'_>) -> io::Result<usize>;

    /// Engine name for logging
    fn name(&self) -> &'static str;
}

/// IO operation descriptor
#[derive(Debug)]
pub struct IOOperation<'a> {
    pub op_type: RequestType,
    /// Open file descriptor of the target
    pub target_fd: RawFd,
    /// Byte offset of the request
    pub offset: u64,
    /// Source (write) or destination (read); its full size is transferred
    pub buffer: &'a mut AlignedBuffer,
}

/// Classify the result of one engine call
///
/// Anything other than a full transfer of `length` bytes is an IO error.
pub fn check_transfer(
    op_type: RequestType,
    offset: u64,
    length: usize,
    result: io::Result<usize>,
) -> Result<(), BenchError> {
    let op = match op_type {
        RequestType::Read => "read",
        RequestType::Write => "write",
    };

    match result {
        Ok(n) if n == length => Ok(()),
        Ok(n) => Err(BenchError::Io {
            op,
            offset,
            length,
            transferred: n,
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "short transfer"),
        }),
        Err(source) => Err(BenchError::Io {
            op,
            offset,
            length,
            transferred: 0,
            source,
        }),
    }
}
