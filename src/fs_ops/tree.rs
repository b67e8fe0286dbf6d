//! Directory materialization.
//! Creates every missing component of a directory path, treating components
//! that already exist as directories as done. Safe to re-run after a partial failure.

use std::io;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::{PathTreeError, Result};
use crate::path::RootResolver;
use crate::platform::{FileSystem, MkdirOutcome};

use super::helpers::io_error_with_help;

/// Directory test that tolerates a trailing `/` (Windows cannot stat `dir/`).
pub fn is_dir(fs: &dyn FileSystem, path: &str) -> bool {
    let trimmed = match path.strip_suffix('/') {
        Some(t) if !t.is_empty() && !t.ends_with(':') => t,
        _ => path,
    };
    fs.stat(Path::new(trimmed)).is_dir
}

/// Containing directory of `path`: `a/b` -> `a`, `/a` -> `/`, `C:/a` -> `C:/`, `a` -> `.`.
pub fn parent_dir<'a>(roots: &dyn RootResolver, path: &'a str) -> Result<&'a str> {
    if path.is_empty() {
        return Err(PathTreeError::invalid_path(path, "an empty path has no parent directory"));
    }
    let root_end = roots.root_offset(path).map(|o| o + 1);
    let trimmed = path.trim_end_matches('/');

    match trimmed.rfind('/') {
        None if root_end.is_some() => Err(PathTreeError::invalid_path(
            path,
            "the root directory has no parent",
        )),
        None => Ok("."),
        Some(i) => {
            let dir = path[..i].trim_end_matches('/');
            match root_end {
                Some(r) if dir.len() < r => Ok(&path[..r]),
                _ => Ok(dir),
            }
        }
    }
}

/// Make sure every component of `path` exists as a directory.
pub fn ensure_tree(
    fs: &dyn FileSystem,
    roots: &dyn RootResolver,
    path: &str,
    mode: u32,
) -> Result<()> {
    if path.is_empty() {
        return Err(PathTreeError::invalid_path(path, "cannot create an empty directory path"));
    }

    // Private copy; the caller's string is never touched.
    let copy = roots.to_wire(path).into_owned();
    let mut pp = roots.root_offset(&copy).unwrap_or(0);
    let mut created = 0usize;

    while let Some(rel) = copy[pp..].find('/') {
        let sp = pp + rel;
        if sp != pp && make_dir(fs, &copy[..sp], mode)? {
            created += 1;
        }
        pp = sp + 1;
    }

    if !copy.ends_with('/') && make_dir(fs, &copy, mode)? {
        created += 1;
    }

    if created > 0 {
        info!(path = %copy, created, "Materialized directory tree");
    } else {
        debug!(path = %copy, "Directory tree already present");
    }
    Ok(())
}

/// Create the directory holding `file_path` when it does not exist yet.
pub fn ensure_parent(
    fs: &dyn FileSystem,
    roots: &dyn RootResolver,
    file_path: &str,
    mode: u32,
) -> Result<()> {
    let wire = roots.to_wire(file_path);
    let parent = parent_dir(roots, &wire)?;
    if is_dir(fs, parent) {
        return Ok(());
    }

    let mut target = parent.to_owned();
    if !target.ends_with('/') {
        target.push('/');
    }
    ensure_tree(fs, roots, &target, mode)
}

/// Returns true when a directory was actually created.
fn make_dir(fs: &dyn FileSystem, prefix: &str, mode: u32) -> Result<bool> {
    let p = Path::new(prefix);
    if fs.stat(p).is_dir {
        return Ok(false);
    }

    match fs
        .mkdir_one(p, mode)
        .map_err(io_error_with_help("create directory", p))?
    {
        MkdirOutcome::Created => {
            debug!(path = %prefix, mode = %format!("{mode:o}"), "created directory");
            Ok(true)
        }
        // Lost a race with another creator, or a file is squatting on the name.
        MkdirOutcome::AlreadyExists if fs.stat(p).is_dir => Ok(false),
        MkdirOutcome::AlreadyExists => Err(PathTreeError::Os {
            op: "create directory",
            path: p.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::NotADirectory,
                "an entry with this name exists and is not a directory",
            ),
        }),
    }
}
