//! The `Mark` command: commits, tags, and pushes the computed version,
//! each step independently gated by the active release type.

use nyx_config::{Configuration, ReleaseType};
use nyx_git::Repository;
use nyx_template::Template;

use crate::context::template_context;
use crate::error::CoreError;
use crate::state::State;

pub struct Mark;

impl Mark {
    /// Precondition: `state.new_version` is `Some(true)`; callers that run
    /// Mark on a no-op Infer result get a commit/tag/push for a version
    /// that hasn't changed, so they should check first.
    pub fn run(
        config: &Configuration,
        repo: &Repository,
        branch: &str,
        release_type: &ReleaseType,
        mut state: State,
    ) -> Result<State, CoreError> {
        let context = template_context(&state, branch);
        let version = state
            .version
            .as_ref()
            .expect("Mark requires Infer to have computed a version")
            .to_string();

        if release_type.git_commit {
            commit_step(config, repo, release_type, &context, &mut state)?;
        }

        if release_type.git_tag {
            tag_step(config, repo, release_type, &context, &version, &mut state)?;
        }

        if release_type.git_push {
            push_step(config, repo)?;
        }

        Ok(state)
    }
}

fn commit_step(
    config: &Configuration,
    repo: &Repository,
    release_type: &ReleaseType,
    context: &serde_json::Value,
    state: &mut State,
) -> Result<(), CoreError> {
    if config.dry_run {
        tracing::info!("dry run: skipping commit");
        return Ok(());
    }
    if repo.is_clean()? {
        return Ok(());
    }

    repo.add(&[])?;
    let message_template = release_type.commit_message.as_deref().unwrap_or("Release {{version}}");
    let message = Template::parse(message_template)?.render(context);
    let commit = repo.commit(&message, None, None)?;

    state.release_scope.final_commit = Some(commit.sha.clone());
    state.release_scope.commits.insert(0, commit);
    Ok(())
}

fn tag_step(
    config: &Configuration,
    repo: &Repository,
    release_type: &ReleaseType,
    context: &serde_json::Value,
    version: &str,
    state: &mut State,
) -> Result<(), CoreError> {
    let tag_name = format!("{}{}", config.release_prefix, version);
    let message = release_type
        .tag_message
        .as_deref()
        .map(|tpl| Template::parse(tpl).map(|t| t.render(context)))
        .transpose()?;

    let target = state.release_scope.final_commit.as_deref();
    repo.tag(target, &tag_name, message.as_deref(), None)?;
    Ok(())
}

/// Pushes to every remote configured on the repository (spec §4.10: "each
/// configured remote, default: the sole remote"). A bare `push(None)` only
/// ever accepts exactly one remote, so a repo with more than one would
/// never get past this step at all; loop over `repo.remotes()` instead.
fn push_step(config: &Configuration, repo: &Repository) -> Result<(), CoreError> {
    if config.dry_run {
        tracing::info!("dry run: skipping push");
        return Ok(());
    }
    let mut remotes: Vec<String> = repo.remotes()?.into_iter().collect();
    remotes.sort();
    if remotes.is_empty() {
        return Err(nyx_git::GitError::NotFound("repository has no configured remote".into()).into());
    }
    for remote in &remotes {
        repo.push(Some(remote))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyx_version::Scheme;
    use tempfile::tempdir;

    fn release_type() -> ReleaseType {
        ReleaseType {
            branch_filter: "^main$".into(),
            environment_variables: Default::default(),
            collapsed_versioning: false,
            collapsed_version_qualifier: None,
            version_range: None,
            version_range_from_branch_name: false,
            publish: true,
            git_commit: true,
            git_tag: true,
            git_push: false,
            commit_message: Some("Release {{version}}".into()),
            tag_message: Some("Release {{version}}".into()),
            publish_message: None,
        }
    }

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
    fn tags_the_final_commit_with_the_computed_version() {
        let dir = tempdir().unwrap();
        let repo = repo_with_commit(dir.path());

        let mut resolver = nyx_config::Resolver::new(nyx_config::ConfigLayer::default(), nyx_config::ConfigLayer::default());
        resolver.update_configured_layers().unwrap();
        let config = resolver.resolve().unwrap();

        let mut state = State::new(Scheme::SemVer);
        state.version = Some(nyx_version::Version::parse(Scheme::SemVer, "1.0.0").unwrap());

        let result = Mark::run(&config, &repo, "main", &release_type(), state).unwrap();
        let tags = repo.tags().unwrap();
        assert!(tags.contains(&"1.0.0".to_string()));
        assert!(result.release_scope.final_commit.is_some());
    }

    #[test]
    fn push_step_pushes_to_every_configured_remote() {
        let dir = tempdir().unwrap();
        let repo = repo_with_commit(dir.path());
        let branch = repo.current_branch().unwrap();

        let remote_a = tempdir().unwrap();
        git2::Repository::init_bare(remote_a.path()).unwrap();
        let remote_b = tempdir().unwrap();
        git2::Repository::init_bare(remote_b.path()).unwrap();
        {
            let git2_repo = git2::Repository::open(dir.path()).unwrap();
            git2_repo.remote("origin", remote_a.path().to_str().unwrap()).unwrap();
            git2_repo.remote("upstream", remote_b.path().to_str().unwrap()).unwrap();
        }

        let mut resolver = nyx_config::Resolver::new(nyx_config::ConfigLayer::default(), nyx_config::ConfigLayer::default());
        resolver.update_configured_layers().unwrap();
        let config = resolver.resolve().unwrap();

        push_step(&config, &repo).unwrap();

        for remote_dir in [&remote_a, &remote_b] {
            let remote_repo = git2::Repository::open_bare(remote_dir.path()).unwrap();
            assert!(remote_repo.find_reference(&format!("refs/heads/{branch}")).is_ok());
        }
    }

    #[test]
    fn push_step_errors_with_no_configured_remote() {
        let dir = tempdir().unwrap();
        let repo = repo_with_commit(dir.path());

        let mut resolver = nyx_config::Resolver::new(nyx_config::ConfigLayer::default(), nyx_config::ConfigLayer::default());
        resolver.update_configured_layers().unwrap();
        let config = resolver.resolve().unwrap();

        assert!(push_step(&config, &repo).is_err());
    }
}
