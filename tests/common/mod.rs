//! In-memory filesystem double shared by the integration tests.
//! Records every mutating call so tests can assert on fallback order.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use pathtree::platform::{DirEntries, FileSystem, MkdirOutcome, Stat};

pub struct MemFs {
    pub cwd: PathBuf,
    pub dirs: RefCell<BTreeSet<String>>,
    pub files: RefCell<BTreeMap<String, Vec<u8>>>,
    pub calls: RefCell<Vec<String>>,
    pub hard_links: bool,
    pub fail_link: Option<io::ErrorKind>,
    pub fail_unlink: Option<io::ErrorKind>,
    pub fail_rename: Option<io::ErrorKind>,
    /// Raw names returned by `read_dir`, overriding the real children.
    pub listing: Option<Vec<&'static str>>,
}

fn key(p: &Path) -> String {
    let s = p.to_string_lossy();
    let t = s.trim_end_matches('/');
    if t.is_empty() { "/".to_string() } else { t.to_string() }
}

fn parent_key(k: &str) -> String {
    match k.rfind('/') {
        Some(0) => "/".to_string(),
        Some(i) => k[..i].to_string(),
        None => ".".to_string(),
    }
}

fn err(kind: io::ErrorKind, what: &str) -> io::Error {
    io::Error::new(kind, what.to_string())
}

impl MemFs {
    pub fn new(cwd: &str) -> Self {
        let fs = MemFs {
            cwd: PathBuf::from(cwd),
            dirs: RefCell::new(BTreeSet::from(["/".to_string()])),
            files: RefCell::new(BTreeMap::new()),
            calls: RefCell::new(Vec::new()),
            hard_links: true,
            fail_link: None,
            fail_unlink: None,
            fail_rename: None,
            listing: None,
        };
        fs.add_dir(cwd);
        fs
    }

    /// Register a directory and all of its ancestors.
    pub fn add_dir(&self, path: &str) {
        let mut k = key(Path::new(path));
        let mut dirs = self.dirs.borrow_mut();
        while k != "/" && k != "." {
            dirs.insert(k.clone());
            k = parent_key(&k);
        }
    }

    pub fn add_file(&self, path: &str, content: &[u8]) {
        let k = key(Path::new(path));
        self.add_dir(&parent_key(&k));
        self.files.borrow_mut().insert(k, content.to_vec());
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.dirs.borrow().contains(&key(Path::new(path)))
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(&key(Path::new(path))).cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn exists(&self, k: &str) -> bool {
        self.dirs.borrow().contains(k) || self.files.borrow().contains_key(k)
    }
}

impl FileSystem for MemFs {
    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn stat(&self, path: &Path) -> Stat {
        let k = key(path);
        Stat {
            exists: self.exists(&k),
            is_dir: self.dirs.borrow().contains(&k),
        }
    }

    fn mkdir_one(&self, path: &Path, _mode: u32) -> io::Result<MkdirOutcome> {
        let k = key(path);
        self.record(format!("mkdir {k}"));
        if self.exists(&k) {
            return Ok(MkdirOutcome::AlreadyExists);
        }
        if !self.dirs.borrow().contains(&parent_key(&k)) {
            return Err(err(io::ErrorKind::NotFound, "parent missing"));
        }
        self.dirs.borrow_mut().insert(k);
        Ok(MkdirOutcome::Created)
    }

    fn hard_link(&self, from: &Path, to: &Path) -> io::Result<()> {
        let (f, t) = (key(from), key(to));
        self.record(format!("link {f} {t}"));
        if let Some(kind) = self.fail_link {
            return Err(err(kind, "link refused"));
        }
        if self.exists(&t) {
            return Err(err(io::ErrorKind::AlreadyExists, "destination exists"));
        }
        if !self.dirs.borrow().contains(&parent_key(&t)) {
            return Err(err(io::ErrorKind::NotFound, "destination directory missing"));
        }
        let data = self
            .files
            .borrow()
            .get(&f)
            .cloned()
            .ok_or_else(|| err(io::ErrorKind::NotFound, "no source"))?;
        self.files.borrow_mut().insert(t, data);
        Ok(())
    }

    fn unlink(&self, path: &Path) -> io::Result<()> {
        let k = key(path);
        self.record(format!("unlink {k}"));
        if let Some(kind) = self.fail_unlink {
            return Err(err(kind, "unlink refused"));
        }
        self.files
            .borrow_mut()
            .remove(&k)
            .map(|_| ())
            .ok_or_else(|| err(io::ErrorKind::NotFound, "no such file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let (f, t) = (key(from), key(to));
        self.record(format!("rename {f} {t}"));
        if let Some(kind) = self.fail_rename {
            return Err(err(kind, "rename refused"));
        }
        if !self.dirs.borrow().contains(&parent_key(&t)) {
            return Err(err(io::ErrorKind::NotFound, "destination directory missing"));
        }
        let data = self
            .files
            .borrow_mut()
            .remove(&f)
            .ok_or_else(|| err(io::ErrorKind::NotFound, "no source"))?;
        self.files.borrow_mut().insert(t, data);
        Ok(())
    }

    fn supports_hard_links(&self) -> bool {
        self.hard_links
    }

    fn read_dir(&self, path: &Path) -> io::Result<DirEntries<'_>> {
        let k = key(path);
        if !self.dirs.borrow().contains(&k) {
            return Err(err(io::ErrorKind::NotFound, "no such directory"));
        }
        let names: Vec<OsString> = match &self.listing {
            Some(list) => list.iter().map(OsString::from).collect(),
            None => {
                let mut names = vec![OsString::from("."), OsString::from("..")];
                let children = self
                    .dirs
                    .borrow()
                    .iter()
                    .chain(self.files.borrow().keys())
                    .filter(|c| *c != "/" && parent_key(c) == k)
                    .filter_map(|c| c.rsplit('/').next().map(OsString::from))
                    .collect::<Vec<_>>();
                names.extend(children);
                names
            }
        };
        Ok(Box::new(names.into_iter().map(Ok)))
    }

    fn create_file(&self, path: &Path, _mode: u32) -> io::Result<File> {
        self.record(format!("create {}", key(path)));
        Err(err(io::ErrorKind::Unsupported, "in-memory files have no handle"))
    }
}
