//! Platform-specific helpers.
//! The `FileSystem` trait is the narrow collaborator surface the tree operations
//! are written against; `OsFileSystem` maps it onto the host (Unix/Windows) so
//! the rest of the codebase can remain platform-agnostic.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
use unix as sys;
#[cfg(not(unix))]
use windows as sys;

pub use sys::open_log_file_secure_append;

/// Result of a single `stat` call. Any stat failure reads as "does not exist".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stat {
    pub exists: bool,
    pub is_dir: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MkdirOutcome {
    Created,
    AlreadyExists,
}

/// Entry names of one directory, `.`/`..` included if the source reports them.
pub type DirEntries<'a> = Box<dyn Iterator<Item = io::Result<OsString>> + 'a>;

pub trait FileSystem {
    fn current_dir(&self) -> io::Result<PathBuf>;

    fn stat(&self, path: &Path) -> Stat;

    /// Create exactly one directory; an existing entry is reported, not failed.
    fn mkdir_one(&self, path: &Path, mode: u32) -> io::Result<MkdirOutcome>;

    fn hard_link(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn unlink(&self, path: &Path) -> io::Result<()>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Whether `hard_link` is worth attempting at all on this filesystem.
    fn supports_hard_links(&self) -> bool {
        true
    }

    /// Open a directory for enumeration. The handle closes when the iterator drops.
    fn read_dir(&self, path: &Path) -> io::Result<DirEntries<'_>>;

    /// Create or truncate a regular file for writing.
    fn create_file(&self, path: &Path, mode: u32) -> io::Result<File>;
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn stat(&self, path: &Path) -> Stat {
        match fs::metadata(path) {
            Ok(meta) => Stat {
                exists: true,
                is_dir: meta.is_dir(),
            },
            Err(_) => Stat::default(),
        }
    }

    fn mkdir_one(&self, path: &Path, mode: u32) -> io::Result<MkdirOutcome> {
        match sys::mkdir_one(path, mode) {
            Ok(()) => Ok(MkdirOutcome::Created),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(MkdirOutcome::AlreadyExists),
            Err(e) => Err(e),
        }
    }

    fn hard_link(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::hard_link(from, to)
    }

    fn unlink(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        sys::rename(from, to)
    }

    fn supports_hard_links(&self) -> bool {
        sys::HARD_LINKS
    }

    fn read_dir(&self, path: &Path) -> io::Result<DirEntries<'_>> {
        let rd = fs::read_dir(path)?;
        Ok(Box::new(rd.map(|entry| entry.map(|e| e.file_name()))))
    }

    fn create_file(&self, path: &Path, mode: u32) -> io::Result<File> {
        sys::create_file(path, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn stat_reports_dirs_files_and_missing() {
        let td = tempdir().unwrap();
        let f = td.path().join("f");
        fs::write(&f, b"x").unwrap();
        let os = OsFileSystem;
        assert_eq!(os.stat(td.path()), Stat { exists: true, is_dir: true });
        assert_eq!(os.stat(&f), Stat { exists: true, is_dir: false });
        assert_eq!(os.stat(&td.path().join("nope")), Stat::default());
    }

    #[test]
    fn mkdir_one_reports_existing() {
        let td = tempdir().unwrap();
        let d = td.path().join("d");
        let os = OsFileSystem;
        assert_eq!(os.mkdir_one(&d, 0o755).unwrap(), MkdirOutcome::Created);
        assert_eq!(os.mkdir_one(&d, 0o755).unwrap(), MkdirOutcome::AlreadyExists);
        let err = os.mkdir_one(&td.path().join("a/b"), 0o755).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn read_dir_yields_names() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("one"), b"1").unwrap();
        fs::create_dir(td.path().join("two")).unwrap();
        let mut names: Vec<OsString> = OsFileSystem
            .read_dir(td.path())
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();
        names.sort();
        assert_eq!(names, [OsString::from("one"), OsString::from("two")]);
    }
}
