//! Filesystem tree operations built on canonical paths.

mod create;
pub(crate) mod helpers;
mod mover;
mod tree;
mod walk;

pub use create::create_file_forced;
pub use mover::{move_file, move_forced};
pub use tree::{ensure_parent, ensure_tree, is_dir, parent_dir};
pub use walk::{Visit, WalkOutcome, walk};

/// Default mode for directories created by `ensure_tree`.
pub const DEFAULT_DIR_MODE: u32 = 0o755;
/// Default mode for files created by `create_file_forced`.
pub const DEFAULT_FILE_MODE: u32 = 0o644;
