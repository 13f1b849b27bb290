//! Release type definitions: named policies selected by branch name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named release policy. The first release type (in declaration order
/// within `enabled`) whose `branch_filter` matches the current branch and
/// whose `environment_variables` predicates all hold wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseType {
    pub branch_filter: String,

    /// Environment variable name -> regex the variable's value must match.
    #[serde(default)]
    pub environment_variables: HashMap<String, String>,

    #[serde(default)]
    pub collapsed_versioning: bool,

    /// Template rendered to produce the prerelease qualifier when
    /// `collapsed_versioning` is set (e.g. `"alpha"`, or a template like
    /// `"{{#first}}{{branch}}{{/first}}"`).
    pub collapsed_version_qualifier: Option<String>,

    /// A `semver::VersionReq`-parseable range the inferred version must
    /// satisfy.
    pub version_range: Option<String>,

    #[serde(default)]
    pub version_range_from_branch_name: bool,

    #[serde(default)]
    pub publish: bool,

    #[serde(default)]
    pub git_commit: bool,

    #[serde(default)]
    pub git_tag: bool,

    #[serde(default)]
    pub git_push: bool,

    pub commit_message: Option<String>,
    pub tag_message: Option<String>,
    pub publish_message: Option<String>,
}
