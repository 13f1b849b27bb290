//! The root run state, and its `FileMapper`-style persistence.

use std::collections::HashMap;
use std::path::Path;

use nyx_version::{BumpId, Scheme, Version};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, DataAccessSource};
use crate::release_scope::ReleaseScope;

/// Root holder for everything a pipeline run produces. `internals` is an
/// opaque `"<Command>.<purpose>"`-keyed map used only for up-to-date
/// caching; nothing in the core reads it for any other purpose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub timestamp: i64,
    pub scheme: Scheme,
    pub version: Option<Version>,
    pub new_version: Option<bool>,
    pub bump: Option<BumpId>,
    pub release_scope: ReleaseScope,
    pub internals: HashMap<String, String>,
    pub new_release: Option<bool>,
}

impl State {
    #[must_use]
    pub fn new(scheme: Scheme) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            scheme,
            version: None,
            new_version: None,
            bump: None,
            release_scope: ReleaseScope::default(),
            internals: HashMap::new(),
            new_release: None,
        }
    }

    #[must_use]
    pub fn internal(&self, key: &str) -> Option<&str> {
        self.internals.get(key).map(String::as_str)
    }

    pub fn set_internal(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.internals.insert(key.into(), value.into());
    }
}

/// Saves or loads [`State`] as JSON or YAML, selected by `path`'s
/// extension — the same convention `nyx_config::document` uses for
/// configuration files.
pub struct FileMapper;

impl FileMapper {
    pub fn save(path: &Path, state: &State) -> Result<(), CoreError> {
        let serialized = match extension(path) {
            Format::Yaml => serde_yaml::to_string(state).map_err(DataAccessSource::from)?,
            Format::Json => serde_json::to_string_pretty(state).map_err(DataAccessSource::from)?,
        };
        std::fs::write(path, serialized).map_err(DataAccessSource::from)?;
        Ok(())
    }

    /// Loads a state file. Per spec §4.4, a file that exists but does not
    /// parse is a hard failure — it is never silently treated as absent.
    pub fn load(path: &Path) -> Result<State, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(DataAccessSource::from)?;
        match extension(path) {
            Format::Yaml => serde_yaml::from_str(&raw).map_err(|e| DataAccessSource::from(e).into()),
            Format::Json => serde_json::from_str(&raw).map_err(|e| DataAccessSource::from(e).into()),
        }
    }

    /// Resume semantics: `None` if `resume` is false or the file is
    /// absent; `Some(state)` if it exists and parses; an error if it
    /// exists but fails to parse.
    pub fn resume(path: &Path, resume: bool) -> Result<Option<State>, CoreError> {
        if !resume || !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }
}

enum Format {
    Json,
    Yaml,
}

fn extension(path: &Path) -> Format {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => Format::Yaml,
        _ => Format::Json,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut state = State::new(Scheme::SemVer);
        state.set_internal("Infer.headSha", "abc123");
        FileMapper::save(&path, &state).unwrap();
        let loaded = FileMapper::load(&path).unwrap();
        assert_eq!(loaded.internal("Infer.headSha"), Some("abc123"));
    }

    #[test]
    fn yaml_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.yaml");
        let state = State::new(Scheme::Maven);
        FileMapper::save(&path, &state).unwrap();
        let loaded = FileMapper::load(&path).unwrap();
        assert_eq!(loaded.scheme, Scheme::Maven);
    }

    #[test]
    fn resume_is_none_when_disabled_or_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(FileMapper::resume(&path, true).unwrap().is_none());
        assert!(FileMapper::resume(&path, false).unwrap().is_none());
    }

    #[test]
    fn resume_errors_on_unparseable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(FileMapper::resume(&path, true).is_err());
    }
}
