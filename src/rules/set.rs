use glob::{MatchOptions, Pattern};
use std::path::{Component, Path};

use crate::common::{PurgeError, Result};

/// Options shared by every rule: case-sensitive, and `*` may match a
/// leading dot so `*ignore` covers `.dockerignore`.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

fn compile(glob: &str) -> Result<Pattern> {
    Pattern::new(glob).map_err(|e| PurgeError::Pattern {
        pattern: glob.to_string(),
        message: e.msg.to_string(),
    })
}

/// A single glob rule evaluated against a file name
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Display name reported for files this rule claims
    pub label: String,
    /// `true` protects matching files, `false` marks them for removal
    pub keep: bool,
    pattern: Pattern,
    except: Vec<Pattern>,
}

impl Rule {
    /// Rule that marks matching files for removal
    pub fn remove(label: impl Into<String>, glob: &str) -> Result<Self> {
        Ok(Self {
            label: label.into(),
            keep: false,
            pattern: compile(glob)?,
            except: Vec::new(),
        })
    }

    /// Rule that protects matching files
    pub fn keep(label: impl Into<String>, glob: &str) -> Result<Self> {
        Ok(Self {
            keep: true,
            ..Self::remove(label, glob)?
        })
    }

    /// Carve names out of this rule's pattern
    pub fn except(mut self, glob: &str) -> Result<Self> {
        self.except.push(compile(glob)?);
        Ok(self)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.matches_with(file_name, MATCH_OPTIONS)
            && !self
                .except
                .iter()
                .any(|p| p.matches_with(file_name, MATCH_OPTIONS))
    }
}

/// Classification of one file name against a rule set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict<'a> {
    /// Claimed by the first matching removal rule
    Remove(&'a Rule),
    /// Protected by a keep rule, or matched by nothing
    Keep(Option<&'a Rule>),
}

impl Verdict<'_> {
    pub fn is_remove(&self) -> bool {
        matches!(self, Verdict::Remove(_))
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Verdict::Remove(rule) | Verdict::Keep(Some(rule)) => Some(rule.label.as_str()),
            Verdict::Keep(None) => None,
        }
    }
}

/// Ordered rules plus the canonical root file that is always kept
#[derive(Debug, Clone)]
pub struct RuleSet {
    canonical: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            rules: Vec::new(),
        }
    }

    /// Name of the root-level file that is never deleted
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn push(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Append a removal rule labelled by its own glob
    pub fn remove(&mut self, glob: &str) -> Result<&mut Self> {
        Ok(self.push(Rule::remove(glob, glob)?))
    }

    /// Append a keep rule labelled by its own glob
    pub fn keep(&mut self, glob: &str) -> Result<&mut Self> {
        Ok(self.push(Rule::keep(glob, glob)?))
    }

    /// True when `relative` names the canonical file directly in the root
    pub fn is_canonical(&self, relative: &Path) -> bool {
        let mut components = relative.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => name == self.canonical.as_str(),
            _ => false,
        }
    }

    /// Keep rules always win; otherwise the first removal rule claims the file.
    pub fn classify(&self, file_name: &str) -> Verdict<'_> {
        if let Some(rule) = self.rules.iter().find(|r| r.keep && r.matches(file_name)) {
            return Verdict::Keep(Some(rule));
        }
        match self.rules.iter().find(|r| !r.keep && r.matches(file_name)) {
            Some(rule) => Verdict::Remove(rule),
            None => Verdict::Keep(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_is_case_sensitive() {
        let rule = Rule::remove("req", "requirements*.txt").unwrap();
        assert!(rule.matches("requirements-dev.txt"));
        assert!(!rule.matches("Requirements-dev.txt"));
        assert!(!rule.matches("requirements-dev.TXT"));
    }

    #[test]
    fn test_star_matches_leading_dot() {
        let rule = Rule::remove("other", "*ignore").unwrap();
        assert!(rule.matches(".eslintignore"));
        assert!(rule.matches("build.ignore"));
        assert!(!rule.matches("ignored.txt"));
    }

    #[test]
    fn test_except_carves_out_names() {
        let rule = Rule::remove("other", "*ignore")
            .unwrap()
            .except(".gitignore")
            .unwrap();
        assert!(!rule.matches(".gitignore"));
        assert!(rule.matches(".npmignore"));
    }

    #[test]
    fn test_keep_rule_wins_over_remove() {
        let mut rules = RuleSet::new("requirements.txt");
        rules.remove("requirements*.txt").unwrap();
        rules.keep("requirements-lock.txt").unwrap();

        assert!(rules.classify("requirements-dev.txt").is_remove());
        let verdict = rules.classify("requirements-lock.txt");
        assert!(!verdict.is_remove());
        assert_eq!(verdict.label(), Some("requirements-lock.txt"));
    }

    #[test]
    fn test_first_removal_rule_claims_file() {
        let mut rules = RuleSet::new(".gitignore");
        rules.push(Rule::remove("docker", ".dockerignore").unwrap());
        rules.push(Rule::remove("generic", "*ignore").unwrap());
        assert_eq!(rules.classify(".dockerignore").label(), Some("docker"));
        assert_eq!(rules.classify(".npmignore").label(), Some("generic"));
    }

    #[test]
    fn test_unmatched_is_kept_without_rule() {
        let mut rules = RuleSet::new("requirements.txt");
        rules.remove("requirements*.txt").unwrap();
        assert_eq!(rules.classify("setup.py"), Verdict::Keep(None));
    }

    #[test]
    fn test_is_canonical_only_at_root() {
        let rules = RuleSet::new(".gitignore");
        assert!(rules.is_canonical(Path::new(".gitignore")));
        assert!(!rules.is_canonical(Path::new("sub/.gitignore")));
        assert!(!rules.is_canonical(Path::new(".dockerignore")));
    }

    #[test]
    fn test_invalid_glob_is_rejected() {
        let mut rules = RuleSet::new("x");
        let err = rules.remove("[unclosed").unwrap_err();
        assert!(matches!(err, PurgeError::Pattern { .. }));
    }
}
