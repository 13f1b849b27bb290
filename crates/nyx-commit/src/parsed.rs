//! The result of running a commit message through a convention matcher.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A commit after convention matching.
///
/// `captures` holds every named capture group the convention's primary
/// expression produced (at minimum `type`, if the convention names one);
/// `bump` is the identifier chosen by evaluating the convention's
/// `bumpExpressions` in order, or `None` if the commit carried no
/// significant change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommit {
    pub sha: String,
    pub convention: String,
    pub captures: HashMap<String, String>,
    pub breaking: bool,
    pub bump: Option<String>,
}

impl ParsedCommit {
    #[must_use]
    pub fn new(
        sha: impl Into<String>,
        convention: impl Into<String>,
        captures: HashMap<String, String>,
        breaking: bool,
        bump: Option<String>,
    ) -> Self {
        Self {
            sha: sha.into(),
            convention: convention.into(),
            captures,
            breaking,
            bump,
        }
    }

    #[must_use]
    pub fn capture(&self, name: &str) -> Option<&str> {
        self.captures.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn commit_type(&self) -> Option<&str> {
        self.capture("type")
    }

    /// A commit is significant when matching it produced a non-empty bump
    /// identifier, per the `ReleaseScope.significantCommits` definition.
    #[must_use]
    pub fn is_significant(&self) -> bool {
        self.bump.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captures(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn commit_type_reads_named_capture() {
        let parsed = ParsedCommit::new(
            "abc123",
            "conventionalCommits",
            captures(&[("type", "feat")]),
            false,
            Some("minor".into()),
        );
        assert_eq!(parsed.commit_type(), Some("feat"));
    }

    #[test]
    fn significance_follows_bump_presence() {
        let significant = ParsedCommit::new("abc", "c", captures(&[]), false, Some("patch".into()));
        let not_significant = ParsedCommit::new("abc", "c", captures(&[]), false, None);
        assert!(significant.is_significant());
        assert!(!not_significant.is_significant());
    }

    #[test]
    fn breaking_commit_without_matching_bump_expression_is_still_significant() {
        let parsed = ParsedCommit::new("abc", "c", captures(&[]), true, Some("major".into()));
        assert!(parsed.breaking);
        assert!(parsed.is_significant());
    }
}
