//! A single configuration layer: every field is optional, `None` meaning
//! "this layer does not speak to this option".

use std::collections::HashMap;
use std::path::PathBuf;

use nyx_version::Scheme;
use serde::{Deserialize, Serialize};

use crate::composite::CompositeBlock;
use crate::convention::CommitMessageConvention;
use crate::release_type::ReleaseType;

/// A configured asset: written to `path` by `service` (an asset-service
/// port name) when the Make command runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub path: String,
    pub service: Option<String>,
}

/// Opaque per-service configuration (credentials, endpoints); passed
/// through to whichever publish/asset service implementation is resolved
/// by name.
pub type ServiceConfig = HashMap<String, serde_json::Value>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLayer {
    pub bump: Option<String>,
    pub directory: Option<PathBuf>,
    pub dry_run: Option<bool>,
    pub initial_version: Option<String>,
    pub release_prefix: Option<String>,
    pub release_lenient: Option<bool>,
    pub resume: Option<bool>,
    pub scheme: Option<Scheme>,
    pub state_file: Option<String>,
    pub version: Option<String>,
    pub assets: Option<HashMap<String, AssetConfig>>,
    pub commit_message_conventions: Option<CompositeBlock<CommitMessageConvention>>,
    pub release_types: Option<CompositeBlock<ReleaseType>>,
    pub services: Option<HashMap<String, ServiceConfig>>,

    /// Meta-options: these name the *other* layers and are themselves
    /// resolved with self-reference exclusion (spec §4.3).
    pub configuration_file: Option<PathBuf>,
    pub shared_configuration_file: Option<PathBuf>,
    pub preset: Option<String>,
}

impl ConfigLayer {
    /// The hard-wired bottom layer: every scalar option has a concrete
    /// value here so resolution never falls through to "no value at all"
    /// for non-optional fields.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            bump: None,
            directory: Some(PathBuf::from(".")),
            dry_run: Some(false),
            initial_version: Some("0.1.0".to_string()),
            release_prefix: Some(String::new()),
            release_lenient: Some(false),
            resume: Some(false),
            scheme: Some(Scheme::SemVer),
            state_file: Some(".nyx-state.json".to_string()),
            version: None,
            assets: Some(HashMap::new()),
            commit_message_conventions: None,
            release_types: None,
            services: Some(HashMap::new()),
            configuration_file: None,
            shared_configuration_file: None,
            preset: Some("default".to_string()),
        }
    }
}
