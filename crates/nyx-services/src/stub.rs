//! Local filesystem-backed service implementations. These are not meant
//! to stand in for a real GitHub/GitLab client in production — they
//! exist so the core can be exercised end-to-end without a network.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ServiceError, ServiceResult};
use crate::ports::{AssetService, PublishService};
use crate::release::ReleaseHandle;

/// Writes the pipeline state as JSON under `base_dir/path`, standing in
/// for a real packaging step.
pub struct LocalAssetService {
    base_dir: PathBuf,
}

impl LocalAssetService {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }
}

impl AssetService for LocalAssetService {
    fn build_asset(&self, path: &Path, state: &Value, _repo: &nyx_git::Repository) -> ServiceResult<PathBuf> {
        let target = self.base_dir.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, serde_json::to_vec_pretty(state).unwrap_or_default())?;
        tracing::debug!(path = %target.display(), "built asset");
        Ok(target)
    }
}

/// Persists release records as one JSON file per tag under `base_dir`,
/// giving `get_release` an idempotency check to read back.
pub struct LocalPublishService {
    base_dir: PathBuf,
}

impl LocalPublishService {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    fn record_path(&self, tag_name: &str) -> PathBuf {
        self.base_dir.join(format!("{tag_name}.json"))
    }
}

impl PublishService for LocalPublishService {
    fn create_release(&self, tag_name: &str, body: &str, assets: &[PathBuf]) -> ServiceResult<ReleaseHandle> {
        fs::create_dir_all(&self.base_dir)?;
        let handle = ReleaseHandle::new(tag_name, tag_name, format!("local://{tag_name}"));
        let record = serde_json::json!({
            "handle": handle,
            "body": body,
            "assets": assets,
        });
        fs::write(self.record_path(tag_name), serde_json::to_vec_pretty(&record).unwrap_or_default())?;
        tracing::info!(tag = tag_name, "created local release");
        Ok(handle)
    }

    fn get_release(&self, tag_name: &str) -> ServiceResult<Option<ReleaseHandle>> {
        let path = self.record_path(tag_name);
        if !path.exists() {
            return Ok(None);
        }
        let record: Value = serde_json::from_slice(&fs::read(&path)?)
            .map_err(|e| ServiceError::UpstreamFailure(e.to_string()))?;
        let handle: ReleaseHandle = serde_json::from_value(record["handle"].clone())
            .map_err(|e| ServiceError::UpstreamFailure(e.to_string()))?;
        Ok(Some(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyx_git::Repository;
    use tempfile::tempdir;

    #[test]
    fn build_asset_writes_state_snapshot() {
        let dir = tempdir().unwrap();
        let repo_dir = tempdir().unwrap();
        git2::Repository::init(repo_dir.path()).unwrap();
        let repo = Repository::open(repo_dir.path()).unwrap();
        let service = LocalAssetService::new(dir.path());
        let state = serde_json::json!({"version": "1.0.0"});
        let built = service.build_asset(Path::new("out/release.json"), &state, &repo).unwrap();
        assert!(built.exists());
    }

    #[test]
    fn publish_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let service = LocalPublishService::new(dir.path());
        assert!(service.get_release("v1.0.0").unwrap().is_none());

        let created = service.create_release("v1.0.0", "release notes", &[]).unwrap();
        let fetched = service.get_release("v1.0.0").unwrap().unwrap();
        assert_eq!(created, fetched);
    }
}
