use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use crate::cleaner::{FileRecord, Outcome, ScanResult};
use crate::common::format::{self, format_count, format_outcome, format_path, format_size};
use crate::rules::Family;

/// Print the run banner
pub fn print_header(root: &Path, family: Family, dry_run: bool) {
    println!();
    println!(
        "{}  Purging {} files in {}",
        "🧹",
        family.to_string().bold(),
        format_path(root).cyan()
    );
    if dry_run {
        println!("  {} Dry run: nothing will be deleted", "ℹ".cyan());
    }
    println!("{}", "─".repeat(60).dimmed());
}

/// Format one per-file line, or `None` when the record should stay silent.
///
/// Attempted removals always produce a line; kept files only when verbose.
pub fn record_line(record: &FileRecord, dry_run: bool, verbose: bool) -> Option<String> {
    let tag = format_outcome(&record.outcome, dry_run);
    let path = record.relative.display();

    match &record.outcome {
        Outcome::Removed => Some(match &record.rule {
            Some(rule) => format!("  {:<14} {}  {}", tag, path, format!("({})", rule).dimmed()),
            None => format!("  {:<14} {}", tag, path),
        }),
        Outcome::FailedToRemove(reason) => {
            Some(format!("  {:<14} {}  {}", tag, path, reason.red()))
        }
        Outcome::KeptByRule if verbose => {
            let why = if record.canonical {
                "canonical".to_string()
            } else {
                match &record.rule {
                    Some(rule) => format!("keep rule {}", rule),
                    None => "no rule matched".to_string(),
                }
            };
            Some(format!("  {:<14} {}  {}", tag, path, format!("({})", why).dimmed()))
        }
        Outcome::KeptByRule => None,
    }
}

/// Print the human-readable summary. Always shown after a completed walk.
pub fn print_summary(result: &ScanResult) {
    println!("{}", "─".repeat(60).dimmed());

    let removed_label = if result.dry_run {
        "Would remove"
    } else {
        "Removed"
    };
    println!(
        "  {} {}: {} ({})",
        "✓".green(),
        removed_label,
        format_count(result.removed).green().bold(),
        format_size(result.bytes_removed)
    );

    let failed = format_count(result.failed);
    println!(
        "  {} Failed: {}",
        if result.failed > 0 { "✗".red() } else { "✗".dimmed() },
        if result.failed > 0 {
            failed.red().bold()
        } else {
            failed.normal()
        }
    );

    let canonical_state = if result.canonical_present {
        "retained".green()
    } else {
        "not present".dimmed()
    };
    println!(
        "  {} Canonical file: {} ({})",
        "●".cyan(),
        result.canonical.bold(),
        canonical_state
    );

    println!(
        "  {} Scanned {} in {}",
        "•".dimmed(),
        format_count(result.visited),
        format::format_duration(result.duration_secs)
    );

    if !result.warnings.is_empty() {
        println!();
        println!(
            "  {} {}",
            "⚠".yellow(),
            format!("{} warnings:", result.warnings.len()).yellow()
        );
        for warning in &result.warnings {
            println!("    {} {}", "→".dimmed(), warning.dimmed());
        }
    }

    if result.failed > 0 {
        println!();
        println!(
            "  {} Run with {} to see why each file failed",
            "💡",
            "--verbose".cyan()
        );
    }
    println!();
}

/// Print the full result as JSON
pub fn print_json(result: &ScanResult) -> Result<()> {
    println!("{}", json_string(result)?);
    Ok(())
}

pub fn json_string(result: &ScanResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize scan result")
}

/// One tab-separated line: removed, failed, canonical file name
pub fn print_quiet(result: &ScanResult) {
    println!("{}", quiet_line(result));
}

pub fn quiet_line(result: &ScanResult) -> String {
    format!("{}\t{}\t{}", result.removed, result.failed, result.canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(outcome: Outcome, rule: Option<&str>, canonical: bool) -> FileRecord {
        FileRecord {
            path: PathBuf::from("/repo/sub/.gitignore"),
            relative: PathBuf::from("sub/.gitignore"),
            outcome,
            rule: rule.map(str::to_string),
            size_bytes: 4,
            canonical,
        }
    }

    #[test]
    fn test_removed_line_always_printed() {
        colored::control::set_override(false);
        let line = record_line(&record(Outcome::Removed, Some("git ignore"), false), false, false)
            .unwrap();
        assert!(line.contains("removed"));
        assert!(line.contains("sub/.gitignore"));
        assert!(line.contains("(git ignore)"));
    }

    #[test]
    fn test_dry_run_line_says_would_remove() {
        colored::control::set_override(false);
        let line = record_line(&record(Outcome::Removed, None, false), true, false).unwrap();
        assert!(line.contains("would remove"));
    }

    #[test]
    fn test_kept_line_only_when_verbose() {
        colored::control::set_override(false);
        let kept = record(Outcome::KeptByRule, None, true);
        assert!(record_line(&kept, false, false).is_none());
        let line = record_line(&kept, false, true).unwrap();
        assert!(line.contains("canonical"));
    }

    #[test]
    fn test_failed_line_carries_reason() {
        colored::control::set_override(false);
        let failed = record(
            Outcome::FailedToRemove("permission denied".to_string()),
            Some("git ignore"),
            false,
        );
        let line = record_line(&failed, false, false).unwrap();
        assert!(line.contains("failed"));
        assert!(line.contains("permission denied"));
    }

    #[test]
    fn test_json_string_carries_counts_and_records() {
        let mut result = ScanResult::new(Path::new("/repo"), ".gitignore", true);
        result.add_record(record(Outcome::Removed, Some("git ignore"), false));

        let json: serde_json::Value = serde_json::from_str(&json_string(&result).unwrap()).unwrap();
        assert_eq!(json["removed"], 1);
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["records"][0]["outcome"]["status"], "removed");
        assert_eq!(json["records"][0]["rule"], "git ignore");
    }

    #[test]
    fn test_quiet_line() {
        let mut result = ScanResult::new(Path::new("/repo"), "requirements.txt", false);
        result.add_record(record(Outcome::Removed, Some("requirements files"), false));
        assert_eq!(quiet_line(&result), "1\t0\trequirements.txt");
    }
}
