use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::errors::Result;
use crate::path::RootResolver;
use crate::platform::FileSystem;

use super::helpers::io_error_with_help;
use super::tree::ensure_parent;

/// Create (or truncate) `path` for writing, materializing its parent tree first.
pub fn create_file_forced(
    fs: &dyn FileSystem,
    roots: &dyn RootResolver,
    path: &str,
    dir_mode: u32,
    file_mode: u32,
) -> Result<File> {
    ensure_parent(fs, roots, path, dir_mode)?;
    let p = Path::new(path);
    let file = fs
        .create_file(p, file_mode)
        .map_err(io_error_with_help("create file", p))?;
    debug!(path = %path, "created file");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PosixRoot;
    use crate::platform::OsFileSystem;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn creates_parents_then_file() {
        let td = tempdir().unwrap();
        let target = td.path().join("objects/ab/cdef");
        let mut f = create_file_forced(
            &OsFileSystem,
            &PosixRoot,
            target.to_str().unwrap(),
            0o755,
            0o644,
        )
        .unwrap();
        f.write_all(b"blob").unwrap();
        drop(f);
        assert_eq!(std::fs::read(&target).unwrap(), b"blob");
    }
}
