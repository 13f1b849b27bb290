//! Value types describing a commit as streamed from the repository port.

use serde::{Deserialize, Serialize};

/// A Git identity: a name and an email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// An identity plus the moment it acted, as either author or committer.
///
/// `timestamp_epoch_ms` and `tz_offset_minutes` are kept separate rather
/// than folded into a single offset-aware timestamp so that the offset
/// the commit was authored under survives round-trips through the state
/// file and the template engine verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub identity: Identity,
    pub timestamp_epoch_ms: i64,
    pub tz_offset_minutes: i32,
}

impl Action {
    #[must_use]
    pub fn new(identity: Identity, timestamp_epoch_ms: i64, tz_offset_minutes: i32) -> Self {
        Self {
            identity,
            timestamp_epoch_ms,
            tz_offset_minutes,
        }
    }
}

/// A tag as resolved from the repository: lightweight tags point directly
/// at a commit, annotated tags carry their own message and tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub target: String,
    pub annotated: bool,
}

impl Tag {
    #[must_use]
    pub fn new(name: impl Into<String>, target: impl Into<String>, annotated: bool) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            annotated,
        }
    }
}

/// A commit as retrieved from the repository port, before convention
/// matching. Parents are SHAs only: the commit does not own its parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub parents: Vec<String>,
    pub author: Action,
    pub committer: Action,
    pub message: String,
    pub tags: Vec<Tag>,
}

impl Commit {
    #[must_use]
    pub fn new(
        sha: impl Into<String>,
        parents: Vec<String>,
        author: Action,
        committer: Action,
        message: impl Into<String>,
        tags: Vec<Tag>,
    ) -> Self {
        Self {
            sha: sha.into(),
            parents,
            author,
            committer,
            message: message.into(),
            tags,
        }
    }

    /// The first line of the commit message.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Everything after the subject and the blank separator line, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        let mut rest = self.message.splitn(2, '\n');
        rest.next();
        let body = rest.next()?.trim_start_matches('\n').trim_end();
        if body.is_empty() { None } else { Some(body) }
    }

    /// The first 7 characters of the SHA, unchanged if shorter.
    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action() -> Action {
        Action::new(Identity::new("Test Author", "test@example.com"), 0, 0)
    }

    fn make_commit(sha: &str, message: &str) -> Commit {
        Commit::new(sha, vec![], action(), action(), message, vec![])
    }

    #[test]
    fn subject_splits_on_first_line() {
        let commit = make_commit("abc1234567890", "feat: add new feature\n\nThis is the body");
        assert_eq!(commit.subject(), "feat: add new feature");
    }

    #[test]
    fn subject_single_line() {
        let commit = make_commit("abc123", "single line message");
        assert_eq!(commit.subject(), "single line message");
    }

    #[test]
    fn body_none_for_single_line_message() {
        let commit = make_commit("abc123", "single line");
        assert!(commit.body().is_none());
    }

    #[test]
    fn body_returns_text_after_subject() {
        let commit = make_commit("abc123", "subject\n\nbody text\nsecond line");
        assert_eq!(commit.body(), Some("body text\nsecond line"));
    }

    #[test]
    fn short_hash_truncates_to_seven() {
        let commit = make_commit("abc1234567890", "msg");
        assert_eq!(commit.short_hash(), "abc1234");
    }

    #[test]
    fn short_hash_unchanged_when_shorter() {
        let commit = make_commit("abc", "msg");
        assert_eq!(commit.short_hash(), "abc");
    }

    #[test]
    fn is_root_detects_no_parents() {
        let commit = make_commit("abc", "msg");
        assert!(commit.is_root());
        let mut child = commit.clone();
        child.parents.push("abc".into());
        assert!(!child.is_root());
    }

    #[test]
    fn serialize_round_trips() {
        let commit = make_commit("abc123", "test message");
        let json = serde_json::to_string(&commit).unwrap();
        let back: Commit = serde_json::from_str(&json).unwrap();
        assert_eq!(commit, back);
    }
}
