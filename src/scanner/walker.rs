use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::common::{PurgeError, Result};

/// A non-directory entry found under the scan root
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}

/// One step of the walk
#[derive(Debug)]
pub enum WalkItem {
    File(FileEntry),
    /// A nested entry could not be read; the walk carries on
    Warning(String),
}

/// Check that `root` exists, is a directory and can be listed
pub fn validate_root(root: &Path) -> Result<()> {
    let metadata = std::fs::metadata(root).map_err(|e| PurgeError::InvalidRoot {
        path: root.to_path_buf(),
        reason: match e.kind() {
            io::ErrorKind::NotFound => "does not exist".to_string(),
            _ => e.to_string(),
        },
    })?;

    if !metadata.is_dir() {
        return Err(PurgeError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    std::fs::read_dir(root).map_err(|source| PurgeError::Enumeration {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Walk every file and symlink under `root`, never following links.
///
/// Entries come back in file-name order within each directory. Errors on
/// the root itself are fatal; errors below it become warnings.
pub fn walk_files(root: &Path) -> impl Iterator<Item = Result<WalkItem>> + '_ {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |result| match result {
            Ok(entry) => {
                if entry.file_type().is_dir() {
                    return None;
                }
                let path = entry.path().to_path_buf();
                let relative = path.strip_prefix(root).unwrap_or(path.as_path()).to_path_buf();
                let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);

                Some(Ok(WalkItem::File(FileEntry {
                    file_name: entry.file_name().to_string_lossy().into_owned(),
                    path,
                    relative,
                    size_bytes,
                })))
            }
            Err(err) if err.depth() == 0 || err.path() == Some(root) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                let message = err.to_string();
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
                Some(Err(PurgeError::Enumeration { path, source }))
            }
            Err(err) => Some(Ok(WalkItem::Warning(err.to_string()))),
        })
}
