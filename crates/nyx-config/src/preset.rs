//! Named bundles of default release types and conventions.

use std::collections::HashMap;

use crate::composite::CompositeBlock;
use crate::convention::{BumpExpression, CommitMessageConvention};
use crate::layer::ConfigLayer;
use crate::release_type::ReleaseType;

/// Resolves a named preset to the layer it contributes, or `None` if the
/// name is not a built-in preset.
#[must_use]
pub fn resolve_preset(name: &str) -> Option<ConfigLayer> {
    match name {
        "default" => Some(default_preset()),
        _ => None,
    }
}

fn default_preset() -> ConfigLayer {
    let convention = CommitMessageConvention {
        expression: r"^(?P<type>\w+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<message>.+)$"
            .to_string(),
        bump_expressions: vec![
            BumpExpression { id: "major".into(), expression: r"^$".into() },
            BumpExpression { id: "minor".into(), expression: r"^feat$".into() },
            BumpExpression { id: "patch".into(), expression: r"^fix$".into() },
        ],
    };
    let mut convention_items = HashMap::new();
    convention_items.insert("conventionalCommits".to_string(), convention);

    let mainline = ReleaseType {
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
        commit_message: Some("Release {{version}}".to_string()),
        tag_message: Some("Release {{version}}".to_string()),
        publish_message: Some("{{#commits}}* {{message}}\n{{/commits}}".to_string()),
    };
    let mut release_type_items = HashMap::new();
    release_type_items.insert("mainline".to_string(), mainline);

    ConfigLayer {
        commit_message_conventions: Some(CompositeBlock {
            enabled: vec!["conventionalCommits".to_string()],
            items: convention_items,
        }),
        release_types: Some(CompositeBlock {
            enabled: vec!["mainline".to_string()],
            items: release_type_items,
        }),
        ..ConfigLayer::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_matches_mainline_branches() {
        let layer = resolve_preset("default").unwrap();
        let release_types = layer.release_types.unwrap();
        let mainline = &release_types.items["mainline"];
        let re = regex::Regex::new(&mainline.branch_filter).unwrap();
        assert!(re.is_match("main"));
        assert!(re.is_match("master"));
        assert!(!re.is_match("feature/x"));
    }

    #[test]
    fn unknown_preset_resolves_to_none() {
        assert!(resolve_preset("nonexistent").is_none());
    }
}
