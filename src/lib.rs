//! # purge
//!
//! Recursively remove stray copies of a file family from a directory tree
//! while keeping the canonical copy in the root.
//!
//! - **Families**: `ignore` (`.gitignore`, `.dockerignore`, `.prettierignore`,
//!   any other `*ignore`) and `requirements` (`requirements*.txt`)
//! - **Rule sets**: ordered glob rules; keep rules always win, and new
//!   patterns can be added without code changes
//! - **Dry run**: reports exactly what a real run would remove
//! - **Structured results**: per-file outcomes and counts, rendered as
//!   colored text, JSON, or a single quiet line
//!
//! ```no_run
//! use purge::cleaner::scan_and_purge;
//! use purge::rules::{Family, RuleSet};
//! use std::path::Path;
//!
//! let rules = RuleSet::for_family(Family::Requirements)?;
//! let result = scan_and_purge(Path::new("."), &rules, true)?;
//! println!("would remove {} files", result.removed);
//! # Ok::<(), purge::common::PurgeError>(())
//! ```

pub mod cleaner;
pub mod cli;
pub mod common;
pub mod rules;
pub mod scanner;
