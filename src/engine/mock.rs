//! Mock IO engine for testing
//!
//! Simulates IO without system calls. Clones share their operation log and
//! settings, so a test can keep one handle while the worker owns another.
//!
//! # Example
//!
//! ```
//! use simplebench::config::RequestType;
//! use simplebench::engine::{IOEngine, IOOperation};
//! use simplebench::engine::mock::MockEngine;
//! use simplebench::util::buffer::AlignedBuffer;
//!
//! let mut engine = MockEngine::new();
//! let mut buffer = AlignedBuffer::try_new(4096, 512).unwrap();
//! let op = IOOperation { op_type: RequestType::Read, target_fd: 3, offset: 0, buffer: &mut buffer };
//! assert_eq!(engine.execute(op).unwrap(), 4096);
//! assert_eq!(engine.submitted_ops().len(), 1);
//! ```

use super::{IOEngine, IOOperation};
use crate::config::RequestType;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Record of an executed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    pub op_type: RequestType,
    pub target_fd: i32,
    pub offset: u64,
    pub length: usize,
}

#[derive(Debug, Default)]
struct MockState {
    submitted: Vec<OperationRecord>,
    /// Every Nth call (1-based) transfers half the buffer
    short_every: Option<u64>,
    /// Every call fails with this errno
    fail_errno: Option<i32>,
    delay: Duration,
}

/// Mock IO engine
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    state: Arc<Mutex<MockState>>,
}

impl MockEngine {
    /// Engine that completes every operation in full, immediately
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `n`th operation a short transfer
    pub fn set_short_every(&self, n: u64) {
        self.lock().short_every = Some(n.max(1));
    }

    /// Make every operation fail with `errno`
    pub fn set_fail_errno(&self, errno: i32) {
        self.lock().fail_errno = Some(errno);
    }

    /// Sleep this long inside each operation
    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = delay;
    }

    /// All operations executed so far, in order
    pub fn submitted_ops(&self) -> Vec<OperationRecord> {
        self.lock().submitted.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl IOEngine for MockEngine {
    fn execute(&mut self, op: IOOperation<'_>) -> io::Result<usize> {
        let length = op.buffer.size();
        let (delay, fail_errno, short) = {
            let mut state = self.lock();
            state.submitted.push(OperationRecord {
                op_type: op.op_type,
                target_fd: op.target_fd,
                offset: op.offset,
                length,
            });
            let call = state.submitted.len() as u64;
            let short = state.short_every.map_or(false, |n| call % n == 0);
            (state.delay, state.fail_errno, short)
        };

        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        if let Some(errno) = fail_errno {
            return Err(io::Error::from_raw_os_error(errno));
        }

        Ok(if short { length / 2 } else { length })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::buffer::AlignedBuffer;

    fn run(engine: &mut MockEngine, offset: u64) -> io::Result<usize> {
        let mut buffer = AlignedBuffer::try_new(1024, 512).unwrap();
        engine.execute(IOOperation {
            op_type: RequestType::Write,
            target_fd: 7,
            offset,
            buffer: &mut buffer,
        })
    }

    #[test]
    fn test_mock_records_operations() {
        let mut engine = MockEngine::new();
        let observer = engine.clone();

        run(&mut engine, 0).unwrap();
        run(&mut engine, 1024).unwrap();

        let ops = observer.submitted_ops();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[1].offset, 1024);
        assert_eq!(ops[1].target_fd, 7);
        assert_eq!(ops[1].op_type, RequestType::Write);
    }

    #[test]
    fn test_mock_short_every() {
        let mut engine = MockEngine::new();
        engine.set_short_every(2);

        assert_eq!(run(&mut engine, 0).unwrap(), 1024);
        assert_eq!(run(&mut engine, 0).unwrap(), 512);
        assert_eq!(run(&mut engine, 0).unwrap(), 1024);
    }

    #[test]
    fn test_mock_failure() {
        let mut engine = MockEngine::new();
        engine.set_fail_errno(libc::EIO);
        assert_eq!(run(&mut engine, 0).unwrap_err().raw_os_error(), Some(libc::EIO));
    }
}
