//! Config validation logic.
//! Range checks for capacity and permission modes, plus log file placement.

use anyhow::{Result, bail};
use tracing::{debug, error};

use super::paths::path_has_symlink_ancestor;
use super::types::Config;

/// Upper bound for `path_capacity`.
pub const MAX_PATH_CAPACITY: usize = 1 << 20;

impl Config {
    /// Validate capacity, modes and the log file location.
    pub fn validate(&self) -> Result<()> {
        // Room for at least the root and one component byte.
        if self.path_capacity < 2 {
            error!(capacity = self.path_capacity, "path_capacity too small");
            bail!("path_capacity must be at least 2 (got {})", self.path_capacity);
        }
        if self.path_capacity > MAX_PATH_CAPACITY {
            error!(capacity = self.path_capacity, "path_capacity too large");
            bail!(
                "path_capacity must be at most {MAX_PATH_CAPACITY} (got {})",
                self.path_capacity
            );
        }
        ensure_mode(self.dir_mode, "dir_mode")?;
        ensure_mode(self.file_mode, "file_mode")?;

        if let Some(log) = &self.log_file {
            if log.as_os_str().is_empty() {
                bail!("log_file is empty");
            }
            if path_has_symlink_ancestor(log)? {
                bail!(
                    "log_file '{}' has a symlinked ancestor; refusing to log there",
                    log.display()
                );
            }
        }

        debug!(
            root_style = %self.root_style,
            capacity = self.path_capacity,
            dir_mode = %format!("{:o}", self.dir_mode),
            file_mode = %format!("{:o}", self.file_mode),
            "Config validated"
        );
        Ok(())
    }
}

fn ensure_mode(mode: u32, name: &str) -> Result<()> {
    if mode > 0o7777 {
        bail!("{name} {mode:o} is not a valid permission mode");
    }
    Ok(())
}
