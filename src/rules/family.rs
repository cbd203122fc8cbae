use serde::{Deserialize, Serialize};

use super::set::{Rule, RuleSet};
use crate::common::Result;

/// Named groups of files that are purged together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// `.gitignore`, `.dockerignore`, `.prettierignore` and any other `*ignore`
    Ignore,
    /// `requirements*.txt`
    Requirements,
}

/// Ignore-file names that have their own rule and are excluded from the
/// generic `*ignore` sweep.
const NAMED_IGNORE_FILES: &[(&str, &str)] = &[
    ("git ignore", ".gitignore"),
    ("docker ignore", ".dockerignore"),
    ("prettier ignore", ".prettierignore"),
];

impl Family {
    /// Root-level file this family always keeps
    pub fn canonical(&self) -> &'static str {
        match self {
            Family::Ignore => ".gitignore",
            Family::Requirements => "requirements.txt",
        }
    }
}

impl RuleSet {
    /// Built-in rule set for `family`, keyed to its canonical root file
    pub fn for_family(family: Family) -> Result<Self> {
        let mut rules = RuleSet::new(family.canonical());

        match family {
            Family::Ignore => {
                for (label, name) in NAMED_IGNORE_FILES {
                    rules.push(Rule::remove(*label, name)?);
                }
                let mut other = Rule::remove("other ignore files", "*ignore")?;
                for (_, name) in NAMED_IGNORE_FILES {
                    other = other.except(name)?;
                }
                rules.push(other);
            }
            Family::Requirements => {
                rules.push(Rule::remove("requirements files", "requirements*.txt")?);
            }
        }

        Ok(rules)
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Family::Ignore => write!(f, "ignore"),
            Family::Requirements => write!(f, "requirements"),
        }
    }
}
