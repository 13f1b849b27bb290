//! The command orchestrator: a linear DAG (`Clean`, then
//! `Arrange -> Infer -> Make -> Mark -> Publish`) with per-command
//! up-to-date caching recorded in `state.internals`.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use nyx_config::Configuration;
use nyx_convention::select_release_type;
use nyx_git::Repository;
use nyx_services::ServiceRegistry;

use crate::error::{CoreError, ReleaseError};
use crate::infer::Infer;
use crate::make::Make;
use crate::mark::Mark;
use crate::publish::Publish;
use crate::state::{FileMapper, State};

/// A single stage in the pipeline's fixed ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Command {
    Clean,
    Arrange,
    Infer,
    Make,
    Mark,
    Publish,
}

impl Command {
    fn key(self) -> &'static str {
        match self {
            Command::Clean => "Clean",
            Command::Arrange => "Arrange",
            Command::Infer => "Infer",
            Command::Make => "Make",
            Command::Mark => "Mark",
            Command::Publish => "Publish",
        }
    }

    /// Every command earlier than `self` in the fixed ordering, oldest
    /// first — run before `self` when invoking it directly.
    fn prerequisites(self) -> &'static [Command] {
        use Command::*;
        match self {
            Clean => &[],
            Arrange => &[],
            Infer => &[Arrange],
            Make => &[Arrange, Infer],
            Mark => &[Arrange, Infer, Make],
            Publish => &[Arrange, Infer, Make, Mark],
        }
    }
}

pub struct Pipeline {
    state_path: PathBuf,
}

impl Pipeline {
    #[must_use]
    pub fn new(state_path: impl Into<PathBuf>) -> Self {
        Self { state_path: state_path.into() }
    }

    /// Runs `command`, running its prerequisites first; per-command
    /// memoization means an up-to-date prerequisite is skipped rather than
    /// re-executed.
    pub fn run(
        &self,
        command: Command,
        config: &Configuration,
        repo: &Repository,
        registry: &ServiceRegistry,
    ) -> Result<State, CoreError> {
        if command == Command::Clean {
            return self.clean(config);
        }

        let mut state = FileMapper::resume(&self.state_path, config.resume)?
            .unwrap_or_else(|| State::new(config.scheme));

        let branch = repo.current_branch()?;
        let head = repo.latest_commit().unwrap_or_default();
        let fingerprint = fingerprint(config);

        for stage in command.prerequisites().iter().copied().chain(std::iter::once(command)) {
            if self.up_to_date(stage, &state, &branch, &head, &fingerprint) {
                tracing::debug!(command = stage.key(), "up to date, skipping");
                continue;
            }

            state = self.execute(stage, config, repo, registry, &branch, state)?;

            if !config.dry_run {
                state.set_internal(format!("{}.branch", stage.key()), &branch);
                state.set_internal(format!("{}.headSha", stage.key()), &head);
                state.set_internal(format!("{}.fingerprint", stage.key()), &fingerprint);
                FileMapper::save(&self.state_path, &state)?;
            }
        }

        Ok(state)
    }

    fn execute(
        &self,
        command: Command,
        config: &Configuration,
        repo: &Repository,
        registry: &ServiceRegistry,
        branch: &str,
        state: State,
    ) -> Result<State, CoreError> {
        match command {
            Command::Clean => unreachable!("Clean is handled before prerequisites are computed"),
            Command::Arrange => Ok(state),
            Command::Infer => Infer::run(config, repo, state),
            Command::Make => {
                Make::run(config, repo, registry, &state)?;
                Ok(state)
            }
            Command::Mark => {
                if state.new_version != Some(true) {
                    return Ok(state);
                }
                let release_type = self.active_release_type(config, branch)?;
                Mark::run(config, repo, branch, &release_type, state)
            }
            Command::Publish => {
                if state.new_release != Some(true) {
                    return Ok(state);
                }
                let release_type = self.active_release_type(config, branch)?;
                Publish::run(config, registry, branch, &release_type, &state)?;
                Ok(state)
            }
        }
    }

    fn active_release_type(&self, config: &Configuration, branch: &str) -> Result<nyx_config::ReleaseType, CoreError> {
        let environment: std::collections::HashMap<String, String> = std::env::vars().collect();
        let release_types = config.release_types.resolve()?;
        select_release_type(branch, &environment, release_types)?
            .map(|(_, rt)| rt.clone())
            .ok_or(CoreError::Release(ReleaseError::NoMatchingReleaseType))
    }

    fn up_to_date(&self, command: Command, state: &State, branch: &str, head: &str, fingerprint: &str) -> bool {
        if command == Command::Clean || command == Command::Arrange {
            return false;
        }
        if state.version.is_none() {
            return false;
        }
        let key = command.key();
        state.internal(&format!("{key}.branch")) == Some(branch)
            && state.internal(&format!("{key}.headSha")) == Some(head)
            && state.internal(&format!("{key}.fingerprint")) == Some(fingerprint)
    }

    /// Removes the state file and any internals cache; never itself
    /// cached, and carries no prerequisites.
    fn clean(&self, _config: &Configuration) -> Result<State, CoreError> {
        if self.state_path.exists() {
            std::fs::remove_file(&self.state_path).map_err(crate::error::DataAccessSource::from)?;
        }
        Ok(State::new(nyx_version::Scheme::SemVer))
    }
}

/// A stable fingerprint of the options Infer/Mark/Publish actually read,
/// used to invalidate the up-to-date cache when configuration changes
/// even though `HEAD` and the branch haven't moved.
fn fingerprint(config: &Configuration) -> String {
    let mut hasher = DefaultHasher::new();
    config.scheme.hash(&mut hasher);
    config.initial_version.hash(&mut hasher);
    config.release_prefix.hash(&mut hasher);
    config.release_lenient.hash(&mut hasher);
    config.version.hash(&mut hasher);
    config.bump.as_ref().map(ToString::to_string).hash(&mut hasher);
    for name in &config.release_types.enabled {
        name.hash(&mut hasher);
    }
    for name in &config.commit_message_conventions.enabled {
        name.hash(&mut hasher);
    }
    format!("{:x}", hasher.finish())
}

#[must_use]
pub fn default_state_path(directory: &Path, state_file: &str) -> PathBuf {
    directory.join(state_file)
}
