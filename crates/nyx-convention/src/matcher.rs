//! Matches a commit message against an ordered set of commit message
//! conventions and resolves the bump identifier it implies.

use std::collections::HashMap;

use nyx_commit::ParsedCommit;
use nyx_config::CommitMessageConvention;

use crate::error::ConventionError;

fn compile(pattern: &str) -> Result<regex::Regex, ConventionError> {
    regex::Regex::new(pattern).map_err(|source| ConventionError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Tries each `(name, convention)` pair in order against `message`,
/// returning the first match. A convention "matches" when its primary
/// expression matches the message; captures are then run through
/// `bumpExpressions` in declared order to find the bump identifier, and a
/// `breaking` capture overrides to `"major"` regardless of what, if
/// anything, the bump expressions picked.
pub fn match_commit<'a>(
    sha: &str,
    message: &str,
    conventions: impl IntoIterator<Item = (&'a str, &'a CommitMessageConvention)>,
) -> Result<Option<ParsedCommit>, ConventionError> {
    for (name, convention) in conventions {
        let primary = compile(&convention.expression)?;
        let Some(captured) = primary.captures(message) else {
            continue;
        };

        let captures: HashMap<String, String> = primary
            .capture_names()
            .flatten()
            .filter_map(|group| captured.name(group).map(|m| (group.to_string(), m.as_str().to_string())))
            .collect();

        let breaking = captures.contains_key("breaking");
        let bump = if breaking {
            Some("major".to_string())
        } else {
            resolve_bump(&captures, convention)?
        };

        return Ok(Some(ParsedCommit::new(sha, name, captures, breaking, bump)));
    }
    Ok(None)
}

/// Evaluates `bumpExpressions` in declared order against the commit's
/// `type` capture (empty string if the convention names none); the first
/// whose regex matches wins.
fn resolve_bump(
    captures: &HashMap<String, String>,
    convention: &CommitMessageConvention,
) -> Result<Option<String>, ConventionError> {
    let subject = captures.get("type").map(String::as_str).unwrap_or("");
    for expr in &convention.bump_expressions {
        let re = compile(&expr.expression)?;
        if re.is_match(subject) {
            return Ok(Some(expr.id.clone()));
        }
    }
    Ok(None)
}
