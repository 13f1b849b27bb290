//! Selects the release type that applies to the current branch.

use std::collections::HashMap;

use nyx_config::ReleaseType;

use crate::error::ConventionError;

fn compile(pattern: &str) -> Result<regex::Regex, ConventionError> {
    regex::Regex::new(pattern).map_err(|source| ConventionError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Tests release types in declared order against the branch name and a
/// snapshot of environment variables; a release type matches when its
/// `branchFilter` matches `branch` and every one of its configured
/// environment-variable predicates matches the corresponding (possibly
/// absent) variable. First match wins; `None` means the caller should
/// fail the pipeline with `NoMatchingReleaseType`.
pub fn select_release_type<'a>(
    branch: &str,
    environment: &HashMap<String, String>,
    release_types: impl IntoIterator<Item = (&'a str, &'a ReleaseType)>,
) -> Result<Option<(&'a str, &'a ReleaseType)>, ConventionError> {
    for (name, release_type) in release_types {
        if matches(branch, environment, release_type)? {
            return Ok(Some((name, release_type)));
        }
    }
    Ok(None)
}

fn matches(
    branch: &str,
    environment: &HashMap<String, String>,
    release_type: &ReleaseType,
) -> Result<bool, ConventionError> {
    if !compile(&release_type.branch_filter)?.is_match(branch) {
        return Ok(false);
    }
    for (var, pattern) in &release_type.environment_variables {
        let value = environment.get(var).map(String::as_str).unwrap_or("");
        if !compile(pattern)?.is_match(value) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mainline() -> ReleaseType {
        ReleaseType {
            branch_filter: "^(main|master)$".to_string(),
            environment_variables: HashMap::new(),
            collapsed_versioning: false,
            collapsed_version_qualifier: None,
            version_range: None,
            version_range_from_branch_name: false,
            publish: true,
            git_commit: true,
            git_tag: true,
            git_push: true,
            commit_message: None,
            tag_message: None,
            publish_message: None,
        }
    }

    fn prerelease() -> ReleaseType {
        let mut env = HashMap::new();
        env.insert("CI".to_string(), "^true$".to_string());
        ReleaseType {
            branch_filter: "^develop$".to_string(),
            environment_variables: env,
            collapsed_versioning: true,
            collapsed_version_qualifier: Some("beta".to_string()),
            version_range: None,
            version_range_from_branch_name: false,
            publish: false,
            git_commit: true,
            git_tag: true,
            git_push: false,
            commit_message: None,
            tag_message: None,
            publish_message: None,
        }
    }

    #[test]
    fn first_branch_filter_match_wins() {
        let main = mainline();
        let empty = HashMap::new();
        let (name, _) = select_release_type("main", &empty, [("mainline", &main)])
            .unwrap()
            .unwrap();
        assert_eq!(name, "mainline");
    }

    #[test]
    fn environment_predicate_must_also_match() {
        let pre = prerelease();
        let mut env = HashMap::new();
        env.insert("CI".to_string(), "false".to_string());
        let result = select_release_type("develop", &env, [("prerelease", &pre)]).unwrap();
        assert!(result.is_none());

        env.insert("CI".to_string(), "true".to_string());
        let result = select_release_type("develop", &env, [("prerelease", &pre)]).unwrap();
        assert!(result.is_some());
    }

    #[test]
    fn no_matching_branch_yields_none() {
        let main = mainline();
        let empty = HashMap::new();
        let result = select_release_type("feature/x", &empty, [("mainline", &main)]).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn declared_order_decides_between_two_matches() {
        let main = mainline();
        let also_main = mainline();
        let empty = HashMap::new();
        let (name, _) = select_release_type(
            "main",
            &empty,
            [("first", &main), ("second", &also_main)],
        )
        .unwrap()
        .unwrap();
        assert_eq!(name, "first");
    }
}
