//! Core library for `pathtree`.
//!
//! Canonical, root-bounded path strings plus the filesystem tree operations
//! built on them: materializing directory trees, single-level walks, and
//! file moves that never expose a half-written destination.
//!
//! Everything filesystem-facing is written against the `platform::FileSystem`
//! trait; `TreeOps` bundles a filesystem with the configured limits.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod ops;
pub mod output;
pub mod path;
pub mod platform;

pub use config::{
    Config, LogLevel, default_config_path, default_log_path, load_config,
    path_has_symlink_ancestor,
};
pub use errors::{PathTreeError, Result};
pub use fs_ops::{
    Visit, WalkOutcome, create_file_forced, ensure_parent, ensure_tree, is_dir, move_file,
    move_forced, parent_dir, walk,
};
pub use ops::TreeOps;
pub use path::{
    PATH_MAX, RootResolver, RootStyle, compare_entries, prettify_dir, prettify_file,
    wire_current_dir,
};
pub use platform::{FileSystem, OsFileSystem};
