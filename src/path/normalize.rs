//! Path prettification.
//!
//! Turns user-supplied path strings into canonical, root-bounded paths:
//! - separators collapsed, `.` elided, `..` resolved against previous segments;
//! - relative input is anchored at the current directory;
//! - `..` may never climb above the root prefix (CWE-22);
//! - segments made of three or more dots are refused (CWE-33).
//!
//! Directories come back with exactly one trailing `/`; files never do.

use std::path::Path;
use tracing::{debug, warn};

use crate::errors::{PathTreeError, Result};
use crate::fs_ops::helpers::io_error_with_help;
use crate::platform::FileSystem;

use super::buf::BoundedBuf;
use super::root::RootResolver;

/// Canonical directory form of `path`, at most `capacity` bytes long.
pub fn prettify_dir(
    fs: &dyn FileSystem,
    roots: &dyn RootResolver,
    path: &str,
    capacity: usize,
) -> Result<String> {
    let wire = roots.to_wire(path);
    let input: &str = &wire;
    let mut out = BoundedBuf::new(path, capacity);

    if !roots.is_rooted(input) {
        let cwd = wire_current_dir(fs, roots)?;
        out.push_str(&cwd)?;
    }

    let bytes = input.as_bytes();
    let mut cur = 0;
    while cur < bytes.len() {
        // Never emit two consecutive separators.
        if bytes[cur] == b'/' && out.ends_with_slash() {
            cur += 1;
            continue;
        }

        let end = input[cur..].find('/').map_or(bytes.len(), |i| cur + i);
        let segment = &input[cur..end];
        let only_dots = segment.bytes().all(|c| c == b'.');

        match (only_dots, segment.len()) {
            (true, 1) => {
                cur = end + 1;
                continue;
            }
            (true, 2) => {
                let start = previous_component_start(roots, out.as_str()).ok_or_else(|| {
                    warn!(path = %path, "path escapes out of the root directory");
                    PathTreeError::PathEscapesRoot {
                        path: path.to_owned(),
                    }
                })?;
                out.truncate(start);
                cur = end + 1;
                continue;
            }
            (true, n) if n > 0 => {
                warn!(path = %path, segment, "refusing multi-dot segment");
                return Err(PathTreeError::invalid_path(
                    path,
                    "the path contains a segment with three `.` or more",
                ));
            }
            _ => {}
        }

        out.push_str(segment)?;
        out.push_slash()?;
        cur = end;
    }

    debug!(input = %path, canonical = %out.as_str(), "prettified directory path");
    Ok(out.into_string())
}

/// Canonical file form of `path`: same rules as `prettify_dir`, minus the trailing `/`.
pub fn prettify_file(
    fs: &dyn FileSystem,
    roots: &dyn RootResolver,
    path: &str,
    capacity: usize,
) -> Result<String> {
    if path.is_empty() || path == "." {
        return Err(PathTreeError::invalid_path(
            path,
            "the path is empty or names the current directory",
        ));
    }

    let wire = roots.to_wire(path);
    if wire.ends_with('/') || wire.ends_with("/.") || wire.ends_with("/..") {
        return Err(PathTreeError::invalid_path(path, "the path points to a folder"));
    }

    let mut canonical = prettify_dir(fs, roots, path, capacity)?;
    let root_len = roots.root_offset(&canonical).map_or(0, |o| o + 1);
    if canonical.len() <= root_len {
        return Err(PathTreeError::invalid_path(
            path,
            "the path resolves to the root directory",
        ));
    }

    canonical.pop();
    Ok(canonical)
}

/// Current directory in wire form: `/` separators, exactly one trailing `/`.
pub fn wire_current_dir(fs: &dyn FileSystem, roots: &dyn RootResolver) -> Result<String> {
    let cwd = fs
        .current_dir()
        .map_err(io_error_with_help("get current directory", Path::new(".")))?;
    let cwd = dunce::simplified(&cwd);
    let raw = cwd.to_str().ok_or_else(|| {
        PathTreeError::invalid_path(&cwd.to_string_lossy(), "current directory is not valid UTF-8")
    })?;

    let mut wire = roots.to_wire(raw).into_owned();
    if !roots.is_rooted(&wire) {
        return Err(PathTreeError::invalid_path(
            &wire,
            "current directory is not rooted for the selected root style",
        ));
    }
    if !wire.ends_with('/') {
        wire.push('/');
    }
    Ok(wire)
}

/// Offset where the last segment of `out` starts, or `None` when removing it
/// would cross the root prefix.
fn previous_component_start(roots: &dyn RootResolver, out: &str) -> Option<usize> {
    let b = out.as_bytes();
    if b.is_empty() {
        return None;
    }

    let root = roots.root_offset(out).unwrap_or(0);
    let mut start = root;
    if b.get(start) == Some(&b'/') {
        start += 1;
    }

    let mut offset = b.len() - 1;
    if b[offset] == b'/' {
        if offset == 0 {
            return None;
        }
        offset -= 1;
    }
    if offset < root {
        return None;
    }

    while offset > start && b[offset - 1] != b'/' {
        offset -= 1;
    }
    Some(offset)
}
