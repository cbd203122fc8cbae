pub mod walker;

pub use walker::{validate_root, walk_files, FileEntry, WalkItem};
