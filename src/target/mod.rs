//! Target abstraction
//!
//! A target is the regular file or block device every worker opens. Each
//! worker holds its own handle; nothing about an open target is shared.

pub mod block;
pub mod file;

use std::fmt;
use std::fs;
use std::io;
use std::os::unix::fs::FileTypeExt;
use std::path::Path;

pub use file::FileTarget;

/// Kind of filesystem object behind the target path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    File,
    BlockDevice,
    /// Character devices, FIFOs and anything else `open` accepts
    Other,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::BlockDevice => write!(f, "block device"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl TargetKind {
    pub fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_file() {
            Self::File
        } else if file_type.is_block_device() {
            Self::BlockDevice
        } else {
            Self::Other
        }
    }
}

/// Kind and size of a target, as seen before the run starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInfo {
    pub kind: TargetKind,
    pub size: u64,
}

/// Inspect the target without opening it for IO
///
/// Block device sizes need an open descriptor, so those are opened read-only
/// just long enough to query the size.
pub fn probe(path: &Path) -> io::Result<TargetInfo> {
    let metadata = fs::metadata(path)?;
    let kind = TargetKind::from_file_type(metadata.file_type());

    let size = match kind {
        TargetKind::BlockDevice => {
            let device = fs::File::open(path)?;
            block::device_size(&device)?
        }
        _ => metadata.len(),
    };

    Ok(TargetInfo { kind, size })
}
