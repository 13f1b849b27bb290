//! The `Make` command: builds every configured asset by delegating to its
//! named asset service.

use nyx_config::Configuration;
use nyx_git::Repository;
use nyx_services::ServiceRegistry;

use crate::error::CoreError;
use crate::state::State;

pub struct Make;

impl Make {
    pub fn run(
        config: &Configuration,
        repo: &Repository,
        registry: &ServiceRegistry,
        state: &State,
    ) -> Result<(), CoreError> {
        let snapshot = serde_json::to_value(state).map_err(crate::error::DataAccessSource::from)?;

        for (key, asset) in &config.assets {
            let Some(service_name) = &asset.service else {
                tracing::debug!(asset = %key, "asset has no configured service, skipping");
                continue;
            };

            if config.dry_run {
                tracing::info!(asset = %key, service = %service_name, path = %asset.path, "dry run: skipping asset build");
                continue;
            }

            let service = registry.asset_service(service_name)?;
            let path = service.build_asset(std::path::Path::new(&asset.path), &snapshot, repo)?;
            tracing::info!(asset = %key, built = %path.display(), "asset built");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyx_config::{AssetConfig, ConfigLayer, Resolver};
    use nyx_services::LocalAssetService;
    use nyx_version::Scheme;
    use tempfile::tempdir;

    fn repo_with_commit(dir: &std::path::Path) -> Repository {
        let git2_repo = git2::Repository::init(dir).unwrap();
        let sig = git2::Signature::now("t", "t@example.com").unwrap();
        let tree_id = git2_repo.index().unwrap().write_tree().unwrap();
        let tree = git2_repo.find_tree(tree_id).unwrap();
        git2_repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[]).unwrap();
        drop(git2_repo);
        Repository::open(dir).unwrap()
    }

    #[test]
    fn builds_each_asset_with_a_configured_service() {
        let repo_dir = tempdir().unwrap();
        let repo = repo_with_commit(repo_dir.path());
        let assets_dir = tempdir().unwrap();

        let mut assets = std::collections::HashMap::new();
        assets.insert(
            "changelog".to_string(),
            AssetConfig { path: "CHANGELOG.json".to_string(), service: Some("local".to_string()) },
        );
        let layer = ConfigLayer { assets: Some(assets), ..ConfigLayer::default() };
        let mut resolver = Resolver::new(layer, ConfigLayer::default());
        resolver.update_configured_layers().unwrap();
        let config = resolver.resolve().unwrap();

        let registry = ServiceRegistry::new()
            .with_asset_service("local", Box::new(LocalAssetService::new(assets_dir.path())));
        let state = State::new(Scheme::SemVer);

        Make::run(&config, &repo, &registry, &state).unwrap();
        assert!(assets_dir.path().join("CHANGELOG.json").exists());
    }
}
