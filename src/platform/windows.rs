//! Windows implementations of platform helpers.
//!
//! Notes:
//! - Windows lacks POSIX mode semantics; directory and file modes are ignored.
//! - `rename` does not overwrite there, so moves go through MoveFileExW with
//!   REPLACE_EXISTING | COPY_ALLOWED.
//! - Hard links are not attempted; MoveFileExW is the whole move strategy.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use windows_sys::Win32::Storage::FileSystem::{
    MOVEFILE_COPY_ALLOWED, MOVEFILE_REPLACE_EXISTING, MoveFileExW,
};

pub(super) const HARD_LINKS: bool = false;

pub(super) fn mkdir_one(path: &Path, _mode: u32) -> io::Result<()> {
    fs::create_dir(path)
}

fn wide(path: &Path) -> Vec<u16> {
    path.as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

pub(super) fn rename(from: &Path, to: &Path) -> io::Result<()> {
    let from_w = wide(from);
    let to_w = wide(to);
    // SAFETY: both buffers are NUL-terminated UTF-16 and outlive the call.
    let ok = unsafe {
        MoveFileExW(
            from_w.as_ptr(),
            to_w.as_ptr(),
            MOVEFILE_REPLACE_EXISTING | MOVEFILE_COPY_ALLOWED,
        )
    };
    if ok == 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

pub(super) fn create_file(path: &Path, _mode: u32) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Open log file for appending (no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
