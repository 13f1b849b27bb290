//! Commit message convention definitions (the configuration-side view; the
//! matching engine lives in `nyx-convention`).

use serde::{Deserialize, Serialize};

/// One `{bump-id -> regex}` rule, kept as a struct rather than a map entry
/// so that declaration order survives JSON/YAML round-trips (a `HashMap`
/// would not).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BumpExpression {
    pub id: String,
    pub expression: String,
}

/// A named commit-message convention: a primary regex capturing at least
/// `type` and `breaking`, and an ordered list of bump expressions evaluated
/// against its capture groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitMessageConvention {
    pub expression: String,
    #[serde(default)]
    pub bump_expressions: Vec<BumpExpression>,
}
