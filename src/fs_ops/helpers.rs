//! I/O error helpers.
//!
//! Enriches io::Error with the operation, the path and a platform-aware hint,
//! and wraps the result in `PathTreeError::Os`.
//!
//! Usage:
//!   fs.mkdir_one(dir, mode).map_err(io_error_with_help("create directory", dir))?;

use std::io;
use std::path::Path;

use crate::errors::PathTreeError;

#[cfg(unix)]
use libc;

/// Format a human-friendly message with op/path plus platform-aware hints.
pub(crate) fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::EXDEV => {
                    msg.push_str(" (cross-filesystem; links and renames cannot span devices)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path not found; verify the parent exists)");
                }
                libc::EEXIST => {
                    msg.push_str(" (already exists)");
                }
                libc::ENOTDIR => {
                    msg.push_str(" (a path component is not a directory)");
                }
                libc::EMLINK => {
                    msg.push_str(" (too many links to the source)");
                }
                libc::ENOSPC => {
                    msg.push_str(" (insufficient space on device)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (filename or path too long)");
                }
                libc::EMFILE | libc::ENFILE => {
                    msg.push_str(" (file descriptor limit reached)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"), // ERROR_ACCESS_DENIED
                17 => msg.push_str(" (not same device)"),                 // ERROR_NOT_SAME_DEVICE
                32 => msg.push_str(" (sharing violation; file is in use)"), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" (path not found)"),               // FILE / PATH NOT FOUND
                80 | 183 => msg.push_str(" (already exists)"),            // FILE_EXISTS / ALREADY_EXISTS
                206 => msg.push_str(" (path too long)"),                  // ERROR_FILENAME_EXCED_RANGE
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" (permission denied; check ownership and write permissions)");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" (path not found; verify the parent exists)");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" (already exists)");
            }
            io::ErrorKind::Unsupported => {
                msg.push_str(" (operation not supported by this filesystem)");
            }
            _ => {}
        }
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> PathTreeError::Os.
pub(crate) fn io_error_with_help<'a>(
    op: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> PathTreeError + 'a {
    move |source: io::Error| PathTreeError::Os {
        op,
        path: path.to_path_buf(),
        source,
    }
}
