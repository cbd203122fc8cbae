use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::common::Result;
use crate::rules::{Family, RuleSet};

/// purge: remove stray ignore and requirements files from a tree
#[derive(Parser, Debug)]
#[command(
    name = "purge",
    version,
    about = "Remove stray ignore and requirements files, keeping the canonical root copy",
    long_about = "purge walks a directory tree and deletes every file of the chosen family\n\
                   except the canonical copy in the root directory.",
    after_help = "EXAMPLES:\n  \
        purge --family ignore                      Keep ./.gitignore, remove all other *ignore files\n  \
        purge --family requirements --dry-run      Preview stray requirements*.txt removals\n  \
        purge --root ~/src/app --family ignore -v  Show every per-file decision\n  \
        purge --family ignore --remove '*.bak'     Extend the family with another pattern\n  \
        purge --family ignore --keep .npmignore    Protect a file the family would remove\n  \
        purge --family requirements --format json  Machine-readable result"
)]
pub struct Cli {
    /// Directory to scan
    #[arg(long, short, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Family of files to purge
    #[arg(long, short, value_enum, required_unless_present = "completions")]
    pub family: Option<Family>,

    /// Report what would be removed without deleting anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Print every per-file decision and debug logs
    #[arg(long, short)]
    pub verbose: bool,

    /// Extra glob whose matches are never removed (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub keep: Vec<String>,

    /// Extra glob whose matches are removed (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub remove: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<CompletionShell>,
}

impl Cli {
    /// The family's built-in rules plus any `--keep`/`--remove` globs
    pub fn rule_set(&self, family: Family) -> Result<RuleSet> {
        let mut rules = RuleSet::for_family(family)?;
        for glob in &self.remove {
            rules.remove(glob)?;
        }
        for glob in &self.keep {
            rules.keep(glob)?;
        }
        Ok(rules)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
