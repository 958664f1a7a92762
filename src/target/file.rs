//! File and device target
//!
//! Opens the target read/write, optionally bypassing the page cache. The
//! target is never created or truncated: the benchmark runs against what is
//! already there.
//!
//! # Example
//!
//! ```no_run
//! use simplebench::target::FileTarget;
//!
//! let target = FileTarget::open("/dev/nvme0n1".as_ref(), true)?;
//! println!("{} is a {} of {} bytes", target.path().display(), target.kind(), target.size());
//! # Ok::<(), simplebench::BenchError>(())
//! ```

use super::{block, TargetKind};
use crate::error::BenchError;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

/// An open file or block device
#[derive(Debug)]
pub struct FileTarget {
    path: PathBuf,
    file: File,
    kind: TargetKind,
    size: u64,
    direct: bool,
}

impl FileTarget {
    /// Open `path` read/write, with O_DIRECT when `direct` is set
    pub fn open(path: &Path, direct: bool) -> Result<Self, BenchError> {
        let open_error = |source: io::Error| BenchError::Open {
            path: path.to_path_buf(),
            direct,
            source,
        };

        let mut options = OpenOptions::new();
        options.read(true).write(true);

        #[cfg(target_os = "linux")]
        if direct {
            options.custom_flags(libc::O_DIRECT);
        }

        let file = options.open(path).map_err(open_error)?;

        #[cfg(target_os = "macos")]
        if direct {
            // SAFETY: F_NOCACHE takes an integer argument.
            let rc = unsafe { libc::fcntl(file.as_raw_fd(), libc::F_NOCACHE, 1) };
            if rc < 0 {
                return Err(open_error(io::Error::last_os_error()));
            }
        }

        let metadata = file.metadata().map_err(open_error)?;
        let kind = TargetKind::from_file_type(metadata.file_type());
        let size = match kind {
            TargetKind::BlockDevice => block::device_size(&file).map_err(open_error)?,
            _ => metadata.len(),
        };

        Ok(Self {
            path: path.to_path_buf(),
            file,
            kind,
            size,
            direct,
        })
    }

    #[inline]
    pub fn fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Size in bytes at open time
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_direct(&self) -> bool {
        self.direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_open_existing_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"test data").unwrap();

        let target = FileTarget::open(file.path(), false).unwrap();
        assert_eq!(target.size(), 9);
        assert_eq!(target.kind(), TargetKind::File);
        assert!(!target.is_direct());
        assert!(target.fd() >= 0);
    }

    #[test]
    fn test_open_missing_file_is_open_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.dat");

        let err = FileTarget::open(&path, false).unwrap_err();
        match err {
            BenchError::Open { path: p, direct, source } => {
                assert_eq!(p, path);
                assert!(!direct);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Never created
        assert!(!path.exists());
    }

    #[test]
    fn test_open_direct() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("direct.dat");
        std::fs::write(&path, vec![0u8; 8192]).unwrap();

        // O_DIRECT is not supported on every filesystem (tmpfs), so only a
        // successful open is checked further.
        if let Ok(target) = FileTarget::open(&path, true) {
            assert!(target.is_direct());
            assert_eq!(target.size(), 8192);
        }
    }
}
