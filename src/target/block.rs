//! Block device helpers

use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;

// ioctl request code for getting block device size
#[cfg(target_os = "linux")]
const BLKGETSIZE64: libc::c_ulong = 0x80081272;

/// Size of an open block device in bytes
#[cfg(target_os = "linux")]
pub fn device_size(device: &File) -> io::Result<u64> {
    let mut size: u64 = 0;

    // SAFETY: BLKGETSIZE64 writes a single u64 through the pointer.
    let result = unsafe { libc::ioctl(device.as_raw_fd(), BLKGETSIZE64 as _, &mut size) };
    if result < 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(size)
}

/// Size of an open block device in bytes
///
/// Falls back to seeking to the end where the Linux ioctl is unavailable.
#[cfg(not(target_os = "linux"))]
pub fn device_size(device: &File) -> io::Result<u64> {
    // SAFETY: lseek on a valid descriptor has no memory-safety requirements.
    let end = unsafe { libc::lseek(device.as_raw_fd(), 0, libc::SEEK_END) };
    if end < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(end as u64)
}
