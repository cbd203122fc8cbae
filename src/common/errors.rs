use std::path::PathBuf;

/// Typed errors for purge operations.
/// The binary uses `anyhow` at the top level, but these variants decide
/// the process exit code, so the engine reports them precisely.
#[derive(Debug, thiserror::Error)]
pub enum PurgeError {
    /// Root path is missing or is not a directory
    #[error("Invalid root '{}': {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// The tree itself could not be listed
    #[error("Cannot enumerate '{}': {source}", .path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A glob pattern in the rule set is malformed
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// A single file could not be removed
    #[error("Failed to remove '{}': {source}", .path.display())]
    Deletion {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PurgeError {
    /// Process exit code for this error when it aborts a run.
    ///
    /// `Deletion` never aborts a run; it maps to success because the walk
    /// itself completed.
    pub fn exit_code(&self) -> i32 {
        match self {
            PurgeError::InvalidRoot { .. } => 1,
            PurgeError::Enumeration { .. } | PurgeError::Pattern { .. } => 2,
            PurgeError::Deletion { .. } => 0,
        }
    }

    /// Short human reason, used for per-file failure records
    pub fn reason(&self) -> String {
        match self {
            PurgeError::Deletion { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => "file vanished before removal".to_string(),
                std::io::ErrorKind::PermissionDenied => "permission denied".to_string(),
                _ => source.to_string(),
            },
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PurgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exit_codes() {
        let invalid = PurgeError::InvalidRoot {
            path: PathBuf::from("/nope"),
            reason: "does not exist".to_string(),
        };
        assert_eq!(invalid.exit_code(), 1);

        let enumeration = PurgeError::Enumeration {
            path: PathBuf::from("/root"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(enumeration.exit_code(), 2);

        let pattern = PurgeError::Pattern {
            pattern: "[".to_string(),
            message: "unclosed".to_string(),
        };
        assert_eq!(pattern.exit_code(), 2);
    }

    #[test]
    fn test_deletion_reason_not_found() {
        let err = PurgeError::Deletion {
            path: PathBuf::from("a/.gitignore"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.reason(), "file vanished before removal");
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_display_includes_path() {
        let err = PurgeError::InvalidRoot {
            path: PathBuf::from("/missing/dir"),
            reason: "does not exist".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing/dir"));
        assert!(msg.contains("does not exist"));
    }
}
