//! Path canonicalization: root strategies, bounded output buffers, prettification
//! and tree-entry ordering.

pub mod buf;
pub mod compare;
pub mod normalize;
pub mod root;

pub use buf::{BoundedBuf, PATH_MAX};
pub use compare::compare_entries;
pub use normalize::{prettify_dir, prettify_file, wire_current_dir};
pub use root::{DriveLetterRoot, PosixRoot, RootResolver, RootStyle};
