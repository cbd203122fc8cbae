use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

use super::report::{FileRecord, Outcome, ScanResult};
use crate::common::{PurgeError, Result};
use crate::rules::RuleSet;
use crate::scanner::walker::{self, FileEntry, WalkItem};

/// Deletes a single file. Swappable so callers can observe or fake removal.
pub trait Remover {
    fn remove(&mut self, path: &Path) -> std::io::Result<()>;
}

impl<R: Remover + ?Sized> Remover for &mut R {
    fn remove(&mut self, path: &Path) -> std::io::Result<()> {
        (**self).remove(path)
    }
}

/// Permanent removal through the filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove(&mut self, path: &Path) -> std::io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// Walks a tree, classifies every file against a rule set and deletes the
/// removal candidates.
pub struct PurgeEngine<'a, R: Remover = FsRemover> {
    rules: &'a RuleSet,
    dry_run: bool,
    remover: R,
}

impl<'a> PurgeEngine<'a, FsRemover> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            dry_run: false,
            remover: FsRemover,
        }
    }
}

impl<'a, R: Remover> PurgeEngine<'a, R> {
    /// Report candidates as removed without touching the filesystem
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_remover<S: Remover>(self, remover: S) -> PurgeEngine<'a, S> {
        PurgeEngine {
            rules: self.rules,
            dry_run: self.dry_run,
            remover,
        }
    }

    pub fn run(&mut self, root: &Path) -> Result<ScanResult> {
        self.run_with(root, |_| {})
    }

    /// Run the purge, handing every per-file decision to `on_record` as
    /// soon as it is made.
    ///
    /// Fails only for an invalid root or when the root cannot be listed.
    /// Per-file deletion failures are recorded and the walk continues.
    pub fn run_with<F>(&mut self, root: &Path, mut on_record: F) -> Result<ScanResult>
    where
        F: FnMut(&FileRecord),
    {
        walker::validate_root(root)?;

        let start = Instant::now();
        let mut result = ScanResult::new(root, self.rules.canonical(), self.dry_run);

        debug!(
            root = %root.display(),
            canonical = self.rules.canonical(),
            dry_run = self.dry_run,
            "starting purge"
        );

        for item in walker::walk_files(root) {
            match item? {
                WalkItem::File(entry) => {
                    let record = self.process(entry);
                    on_record(&record);
                    result.add_record(record);
                }
                WalkItem::Warning(message) => {
                    warn!("{}", message);
                    result.warnings.push(message);
                }
            }
        }

        result.duration_secs = start.elapsed().as_secs_f64();
        debug!(
            removed = result.removed,
            failed = result.failed,
            kept = result.skipped_kept,
            "purge finished"
        );

        Ok(result)
    }

    fn process(&mut self, entry: FileEntry) -> FileRecord {
        let FileEntry {
            path,
            relative,
            file_name,
            size_bytes,
        } = entry;

        if self.rules.is_canonical(&relative) {
            debug!(path = %relative.display(), "keeping canonical file");
            return FileRecord {
                path,
                relative,
                outcome: Outcome::KeptByRule,
                rule: None,
                size_bytes,
                canonical: true,
            };
        }

        let verdict = self.rules.classify(&file_name);
        let rule = verdict.label().map(str::to_string);

        let outcome = if !verdict.is_remove() {
            Outcome::KeptByRule
        } else if self.dry_run {
            debug!(path = %relative.display(), "would remove");
            Outcome::Removed
        } else {
            match self.delete(&path) {
                Ok(()) => {
                    debug!(path = %relative.display(), "removed");
                    Outcome::Removed
                }
                Err(e) => {
                    warn!("{}", e);
                    Outcome::FailedToRemove(e.reason())
                }
            }
        };

        FileRecord {
            path,
            relative,
            outcome,
            rule,
            size_bytes,
            canonical: false,
        }
    }

    fn delete(&mut self, path: &Path) -> Result<()> {
        self.remover
            .remove(path)
            .map_err(|source| PurgeError::Deletion {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Scan `root`, delete everything `rules` marks for removal (unless
/// `dry_run`), and return the tally.
pub fn scan_and_purge(root: &Path, rules: &RuleSet, dry_run: bool) -> Result<ScanResult> {
    PurgeEngine::new(rules).dry_run(dry_run).run(root)
}
