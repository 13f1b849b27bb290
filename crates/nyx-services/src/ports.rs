//! Abstract collaborators the core delegates artifact-building and
//! release-publishing to. Concrete clients (a real GitHub/GitLab API, a
//! real packaging step) live outside this crate; resolution is by name
//! through a [`crate::registry::ServiceRegistry`].

use std::path::{Path, PathBuf};

use nyx_git::Repository;
use serde_json::Value;

use crate::error::ServiceResult;
use crate::release::ReleaseHandle;

/// Builds one configured release asset.
pub trait AssetService: Send + Sync {
    /// Produces the asset at `path`, given the current pipeline `state`
    /// (a JSON snapshot) and the repository being released, and returns
    /// the path to the built file.
    fn build_asset(&self, path: &Path, state: &Value, repo: &Repository) -> ServiceResult<PathBuf>;
}

/// Publishes a release to a remote hosting service.
pub trait PublishService: Send + Sync {
    /// Creates a release identified by `tag_name`, with `body` as its
    /// description and `assets` attached.
    fn create_release(&self, tag_name: &str, body: &str, assets: &[PathBuf]) -> ServiceResult<ReleaseHandle>;

    /// Looks up an existing release by tag, if one exists. Used for
    /// idempotent publishing: a release that already exists is left
    /// untouched rather than recreated.
    fn get_release(&self, tag_name: &str) -> ServiceResult<Option<ReleaseHandle>>;
}
