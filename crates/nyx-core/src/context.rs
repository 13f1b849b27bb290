//! Builds the JSON context templates (commit/tag/publish messages,
//! collapsed-version qualifiers) render against.

use nyx_commit::Commit;
use serde_json::{Value, json};

use crate::state::State;

#[must_use]
pub fn template_context(state: &State, branch: &str) -> Value {
    json!({
        "branch": branch,
        "scheme": serde_json::to_value(state.scheme).unwrap_or(Value::Null),
        "version": state.version.as_ref().map(ToString::to_string),
        "previousVersion": state.release_scope.previous_version.as_ref().map(ToString::to_string),
        "bump": state.bump.as_ref().map(ToString::to_string),
        "commits": commit_entries(&state.release_scope.commits),
    })
}

fn commit_entries(commits: &[Commit]) -> Vec<Value> {
    commits
        .iter()
        .map(|c| json!({"sha": c.sha, "shortHash": c.short_hash(), "message": c.subject()}))
        .collect()
}
