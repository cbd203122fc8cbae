use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What happened to a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    /// Deleted, or would be deleted in a dry run
    Removed,
    /// Deletion was attempted and failed; the walk continued
    FailedToRemove(String),
    /// Protected by a keep rule, the canonical file, or matched by nothing
    KeptByRule,
}

/// Per-file decision
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub outcome: Outcome,
    /// Label of the rule that decided the outcome, if any
    pub rule: Option<String>,
    pub size_bytes: u64,
    /// True only for the family's root-level canonical file
    pub canonical: bool,
}

impl FileRecord {
    /// Records worth keeping in the result listing. Files no rule
    /// touched are counted but not listed.
    pub fn is_notable(&self) -> bool {
        self.canonical || self.rule.is_some()
    }
}

/// Outcome of a completed scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub root: PathBuf,
    /// Name of the root-level file the family always keeps
    pub canonical: String,
    /// Whether the canonical file was actually found in the root
    pub canonical_present: bool,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub visited: usize,
    pub removed: usize,
    pub failed: usize,
    pub skipped_kept: usize,
    pub bytes_removed: u64,
    pub records: Vec<FileRecord>,
    /// Non-fatal problems hit while walking nested directories
    pub warnings: Vec<String>,
}

impl ScanResult {
    pub fn new(root: &Path, canonical: &str, dry_run: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            canonical: canonical.to_string(),
            canonical_present: false,
            dry_run,
            started_at: Utc::now(),
            duration_secs: 0.0,
            visited: 0,
            removed: 0,
            failed: 0,
            skipped_kept: 0,
            bytes_removed: 0,
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Tally a record and keep it in the listing if a rule touched it
    pub fn add_record(&mut self, record: FileRecord) {
        self.visited += 1;

        match &record.outcome {
            Outcome::Removed => {
                self.removed += 1;
                self.bytes_removed += record.size_bytes;
            }
            Outcome::FailedToRemove(_) => self.failed += 1,
            Outcome::KeptByRule => self.skipped_kept += 1,
        }

        if record.canonical {
            self.canonical_present = true;
        }

        if record.is_notable() {
            self.records.push(record);
        }
    }

    pub fn removed_paths(&self) -> impl Iterator<Item = &Path> {
        self.records
            .iter()
            .filter(|r| r.outcome == Outcome::Removed)
            .map(|r| r.relative.as_path())
    }

    pub fn failed_records(&self) -> impl Iterator<Item = &FileRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::FailedToRemove(_)))
    }
}
