//! High-level entry point bundling a filesystem, a root strategy and the
//! configured limits, so callers do not thread them through every call.

use std::cmp::Ordering;
use std::ffi::OsString;
use std::fs::File;
use std::path::Path;

use crate::config::Config;
use crate::errors::Result;
use crate::fs_ops::{self, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, Visit, WalkOutcome};
use crate::path::{self, PATH_MAX, RootResolver, RootStyle};
use crate::platform::{FileSystem, OsFileSystem};

pub struct TreeOps<F: FileSystem = OsFileSystem> {
    fs: F,
    roots: &'static dyn RootResolver,
    capacity: usize,
    dir_mode: u32,
    file_mode: u32,
}

impl TreeOps<OsFileSystem> {
    /// Host filesystem, settings taken from `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self::with_fs(OsFileSystem, cfg.root_style)
            .capacity(cfg.path_capacity)
            .modes(cfg.dir_mode, cfg.file_mode)
    }
}

impl Default for TreeOps<OsFileSystem> {
    fn default() -> Self {
        Self::with_fs(OsFileSystem, RootStyle::Host)
    }
}

impl<F: FileSystem> TreeOps<F> {
    pub fn with_fs(fs: F, style: RootStyle) -> Self {
        Self {
            fs,
            roots: style.resolver(),
            capacity: PATH_MAX,
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: DEFAULT_FILE_MODE,
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn modes(mut self, dir_mode: u32, file_mode: u32) -> Self {
        self.dir_mode = dir_mode;
        self.file_mode = file_mode;
        self
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn roots(&self) -> &dyn RootResolver {
        self.roots
    }

    pub fn path_capacity(&self) -> usize {
        self.capacity
    }

    pub fn prettify_dir(&self, path: &str) -> Result<String> {
        path::prettify_dir(&self.fs, self.roots, path, self.capacity)
    }

    pub fn prettify_file(&self, path: &str) -> Result<String> {
        path::prettify_file(&self.fs, self.roots, path, self.capacity)
    }

    pub fn current_dir(&self) -> Result<String> {
        path::wire_current_dir(&self.fs, self.roots)
    }

    pub fn is_dir(&self, path: &str) -> bool {
        fs_ops::is_dir(&self.fs, path)
    }

    pub fn parent_dir<'a>(&self, path: &'a str) -> Result<&'a str> {
        fs_ops::parent_dir(self.roots, path)
    }

    pub fn ensure_tree(&self, path: &str) -> Result<()> {
        fs_ops::ensure_tree(&self.fs, self.roots, path, self.dir_mode)
    }

    pub fn ensure_parent(&self, file_path: &str) -> Result<()> {
        fs_ops::ensure_parent(&self.fs, self.roots, file_path, self.dir_mode)
    }

    /// Walk one directory level; `path` is reused as the entry buffer.
    pub fn walk<V>(&self, path: &mut OsString, visit: V) -> Result<WalkOutcome>
    where
        V: FnMut(&Path) -> Visit,
    {
        fs_ops::walk(&self.fs, path, self.capacity, visit)
    }

    pub fn move_file(&self, from: &str, to: &str) -> Result<()> {
        fs_ops::move_file(&self.fs, from, to)
    }

    pub fn move_forced(&self, from: &str, to: &str) -> Result<()> {
        fs_ops::move_forced(&self.fs, self.roots, from, to, self.dir_mode)
    }

    pub fn create_file_forced(&self, path: &str) -> Result<File> {
        fs_ops::create_file_forced(&self.fs, self.roots, path, self.dir_mode, self.file_mode)
    }

    /// Order two full entry paths, asking the filesystem for their kind.
    pub fn compare(&self, a: &Path, b: &Path) -> Ordering {
        path::compare_entries(
            a.as_os_str().as_encoded_bytes(),
            self.fs.stat(a).is_dir,
            b.as_os_str().as_encoded_bytes(),
            self.fs.stat(b).is_dir,
        )
    }
}
