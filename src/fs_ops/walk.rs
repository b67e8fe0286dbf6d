//! Single-level directory enumeration over a caller-owned path buffer.
//!
//! The buffer is rewritten in place: it is normalized to end with exactly one `/`,
//! then each entry name is written after that slash before the visitor runs.
//! `.` and `..` are never visited. Nothing is written past `capacity` bytes.
//! Entry names are handled as raw OS strings, so names that are not UTF-8 are
//! visited like any other.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use tracing::debug;

use crate::errors::{PathTreeError, Result};
use crate::platform::FileSystem;

use super::helpers::io_error_with_help;

/// Visitor verdict for one entry.
#[derive(Debug)]
pub enum Visit {
    Continue,
    /// Stop without error; the walk reports `WalkOutcome::Stopped`.
    Stop,
    /// Abort; the error is returned from `walk` unchanged.
    Fail(PathTreeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    Completed,
    Stopped,
}

pub fn walk<F>(
    fs: &dyn FileSystem,
    path: &mut OsString,
    capacity: usize,
    mut visit: F,
) -> Result<WalkOutcome>
where
    F: FnMut(&Path) -> Visit,
{
    if path.is_empty() {
        return Err(PathTreeError::invalid_argument("", "the directory path is empty"));
    }

    let bytes = path.as_encoded_bytes();
    let dir_len = bytes.len() - bytes.iter().rev().take_while(|&&b| b == b'/').count();
    // room for the separator plus at least one byte of entry name
    if capacity < dir_len + 2 {
        return Err(PathTreeError::invalid_argument(
            &path.to_string_lossy(),
            format!("buffer capacity {capacity} cannot hold a single entry"),
        ));
    }
    // SAFETY: `dir_len` is either the end of the string or the start of a run of
    // ASCII `/`, both valid split points of the encoded form.
    let mut base = unsafe { OsStr::from_encoded_bytes_unchecked(&bytes[..dir_len]) }.to_os_string();
    base.push("/");
    let base_len = base.as_encoded_bytes().len();
    path.clone_from(&base);

    let dir = Path::new(&base);
    let entries = fs
        .read_dir(dir)
        .map_err(io_error_with_help("open directory", dir))?;

    for entry in entries {
        let name = entry.map_err(io_error_with_help("read directory entry", dir))?;
        if name == "." || name == ".." {
            continue;
        }

        let needed = base_len + name.as_encoded_bytes().len();
        if needed > capacity {
            return Err(PathTreeError::BufferTooSmall {
                path: format!("{}{}", base.to_string_lossy(), name.to_string_lossy()),
                needed,
                capacity,
            });
        }

        path.clear();
        path.push(&base);
        path.push(&name);

        match visit(Path::new(path.as_os_str())) {
            Visit::Continue => {}
            Visit::Stop => {
                debug!(dir = %dir.display(), at = %Path::new(path.as_os_str()).display(), "walk stopped by visitor");
                return Ok(WalkOutcome::Stopped);
            }
            Visit::Fail(e) => return Err(e),
        }
    }

    Ok(WalkOutcome::Completed)
}
