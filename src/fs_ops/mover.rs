//! File relocation.
//! Prefers link+unlink (readers of `to` never observe a partial file), falls back
//! to rename (MoveFileExW on Windows). `move_forced` creates the destination's
//! parent tree first.

use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::{PathTreeError, Result};
use crate::path::RootResolver;
use crate::platform::FileSystem;

use super::tree::ensure_parent;

pub fn move_file(fs: &dyn FileSystem, from: &str, to: &str) -> Result<()> {
    let (src, dst) = (Path::new(from), Path::new(to));

    let link_err = if fs.supports_hard_links() {
        match fs.hard_link(src, dst) {
            Ok(()) => match fs.unlink(src) {
                Ok(()) => {
                    info!(src = %from, dest = %to, strategy = "link", "Moved file");
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, src = %from, "Linked destination but could not unlink source; undoing link");
                    if fs.unlink(dst).is_err() {
                        // Both names now point at the same file; rename would be a no-op.
                        return Err(PathTreeError::Os {
                            op: "remove source after linking",
                            path: src.to_path_buf(),
                            source: e,
                        });
                    }
                    Some(e)
                }
            },
            Err(e) => {
                debug!(error = %e, src = %from, dest = %to, "hard link failed; falling back to rename");
                Some(e)
            }
        }
    } else {
        None
    };

    match fs.rename(src, dst) {
        Ok(()) => {
            info!(src = %from, dest = %to, strategy = "rename", "Moved file");
            Ok(())
        }
        Err(rename_err) => {
            let mut msg = format!("cannot move to '{to}': {rename_err}");
            if let Some(link_err) = link_err {
                msg.push_str(&format!("; hard link also failed: {link_err}"));
            }
            Err(PathTreeError::Os {
                op: "move file",
                path: src.to_path_buf(),
                source: io::Error::new(rename_err.kind(), msg),
            })
        }
    }
}

pub fn move_forced(
    fs: &dyn FileSystem,
    roots: &dyn RootResolver,
    from: &str,
    to: &str,
    dir_mode: u32,
) -> Result<()> {
    ensure_parent(fs, roots, to, dir_mode)?;
    move_file(fs, from, to)
}
