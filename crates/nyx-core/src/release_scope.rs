//! `ReleaseScope`: the per-run derivation of which commits and which
//! previous version bound this release (spec's data model §3).

use nyx_commit::{Commit, ParsedCommit};
use nyx_version::Version;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseScope {
    pub previous_version: Option<Version>,
    pub previous_version_commit: Option<String>,
    pub initial_commit: Option<String>,
    pub final_commit: Option<String>,
    pub commits: Vec<Commit>,
    pub significant_commits: Vec<ParsedCommit>,
}

impl ReleaseScope {
    #[must_use]
    pub fn significant(&self) -> bool {
        !self.significant_commits.is_empty()
    }
}
