//! Per-request trace file
//!
//! One line per completed request:
//!
//! ```text
//! elapsed_seconds thread_id request_type offset_sectors length_sectors latency_ms
//! ```
//!
//! The file is truncated once when the sink is created and then appended to
//! through a single buffered handle. Every record is written under one lock,
//! so lines from different workers never interleave mid-line; their order is
//! arrival order, not time order.

use crate::config::{RequestType, SECTOR_SIZE};
use crate::error::BenchError;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// One traced request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRecord {
    /// Seconds from run start to request issue
    pub elapsed_secs: f64,
    /// 1-based worker number
    pub thread_id: usize,
    pub request_type: RequestType,
    pub offset_sectors: u64,
    pub length_sectors: u64,
    pub latency_ms: f64,
}

impl TraceRecord {
    /// Build a record from byte addressing
    pub fn new(
        elapsed_secs: f64,
        thread_id: usize,
        request_type: RequestType,
        offset: u64,
        length: u64,
        latency_ms: f64,
    ) -> Self {
        Self {
            elapsed_secs,
            thread_id,
            request_type,
            offset_sectors: offset / SECTOR_SIZE,
            length_sectors: length / SECTOR_SIZE,
            latency_ms,
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} {} {} {} {} {:.6}",
            self.elapsed_secs,
            self.thread_id,
            self.request_type,
            self.offset_sectors,
            self.length_sectors,
            self.latency_ms
        )
    }
}

/// Shared trace sink
pub struct TraceSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    records: AtomicU64,
}

impl TraceSink {
    /// Create (or truncate) the trace file
    pub fn create(path: &Path) -> Result<Self, BenchError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|source| BenchError::Trace {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
            records: AtomicU64::new(0),
        })
    }

    /// Append one record
    pub fn record(&self, record: &TraceRecord) -> Result<(), BenchError> {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(writer, "{}", record).map_err(|source| self.error(source))?;
        self.records.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Records written so far
    pub fn records(&self) -> u64 {
        self.records.load(Ordering::Relaxed)
    }

    /// Flush buffered records to the file
    pub fn flush(&self) -> Result<(), BenchError> {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writer.flush().map_err(|source| self.error(source))
    }

    fn error(&self, source: io::Error) -> BenchError {
        BenchError::Trace {
            path: self.path.clone(),
            source,
        }
    }
}

impl Drop for TraceSink {
    fn drop(&mut self) {
        let writer = self.writer.get_mut().unwrap_or_else(|e| e.into_inner());
        let _ = writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn test_record_format() {
        let record = TraceRecord::new(1.5, 3, RequestType::Write, 8192, 4096, 0.125);
        assert_eq!(record.offset_sectors, 16);
        assert_eq!(record.length_sectors, 8);
        assert_eq!(record.to_string(), "1.500000 3 W 16 8 0.125000");
    }

    #[test]
    fn test_create_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.txt");
        std::fs::write(&path, "stale line\n").unwrap();

        let sink = TraceSink::create(&path).unwrap();
        sink.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_create_in_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/trace.txt");
        assert!(matches!(TraceSink::create(&path), Err(BenchError::Trace { .. })));
    }

    #[test]
    fn test_concurrent_lines_do_not_interleave() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.txt");
        let sink = Arc::new(TraceSink::create(&path).unwrap());

        let handles: Vec<_> = (1..=4)
            .map(|thread_id| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for i in 0..500u64 {
                        let record = TraceRecord::new(
                            i as f64,
                            thread_id,
                            RequestType::Read,
                            i * 4096,
                            4096,
                            0.01,
                        );
                        sink.record(&record).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        sink.flush().unwrap();
        assert_eq!(sink.records(), 2000);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2000);
        for line in lines {
            let fields: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(fields.len(), 6, "malformed line: {}", line);
            assert_eq!(fields[2], "R");
            assert_eq!(fields[4], "8");
        }
    }
}
