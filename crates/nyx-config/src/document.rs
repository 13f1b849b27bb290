//! Loading a [`ConfigLayer`] from a JSON or YAML document, and discovering
//! the standard local/shared configuration file names.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, DataAccessSource};
use crate::layer::ConfigLayer;

/// Parses `path` as a [`ConfigLayer`], choosing JSON or YAML by extension.
pub fn load_layer(path: &Path) -> Result<ConfigLayer, ConfigError> {
    let read = |p: &Path| -> Result<String, ConfigError> {
        std::fs::read_to_string(p).map_err(|e| ConfigError::DataAccess {
            path: p.to_path_buf(),
            source: DataAccessSource::Io(e),
        })
    };
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "json" => {
            let content = read(path)?;
            serde_json::from_str(&content).map_err(|e| ConfigError::DataAccess {
                path: path.to_path_buf(),
                source: DataAccessSource::Json(e),
            })
        }
        "yaml" | "yml" => {
            let content = read(path)?;
            serde_yaml::from_str(&content).map_err(|e| ConfigError::DataAccess {
                path: path.to_path_buf(),
                source: DataAccessSource::Yaml(e),
            })
        }
        _ => Err(ConfigError::IllegalProperty(format!(
            "unsupported configuration file extension: {}",
            path.display()
        ))),
    }
}

/// Search order for the standard local configuration file.
pub const STANDARD_LOCAL_NAMES: &[&str] = &[".nyx.json", ".nyx.yaml", ".nyx.yml"];

/// Search order for the standard shared configuration file.
pub const STANDARD_SHARED_NAMES: &[&str] = &[".nyx-shared.json", ".nyx-shared.yaml", ".nyx-shared.yml"];

fn find_first_existing(directory: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|n| directory.join(n)).find(|p| p.exists())
}

/// Loads the standard local file from `directory`, if one of the
/// recognized names exists; an absent file is not an error (spec §4.3
/// treats a missing well-known-path layer as a dropped layer, not a
/// failure).
pub fn load_standard_local(directory: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    find_first_existing(directory, STANDARD_LOCAL_NAMES)
        .map(|p| load_layer(&p))
        .transpose()
}

pub fn load_standard_shared(directory: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    find_first_existing(directory, STANDARD_SHARED_NAMES)
        .map(|p| load_layer(&p))
        .transpose()
}

/// Loads a custom file (the path itself came from a higher layer). An
/// empty/blank path is a logged no-op per spec §4.3, not an error.
pub fn load_custom(path: Option<&Path>) -> Result<Option<ConfigLayer>, ConfigError> {
    match path {
        None => Ok(None),
        Some(p) if p.as_os_str().is_empty() => {
            tracing::debug!("configured path is blank, dropping layer");
            Ok(None)
        }
        Some(p) => load_layer(p).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_json_layer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(&path, r#"{"dryRun": true, "releasePrefix": "v"}"#).unwrap();
        let layer = load_layer(&path).unwrap();
        assert_eq!(layer.dry_run, Some(true));
        assert_eq!(layer.release_prefix, Some("v".into()));
    }

    #[test]
    fn loads_yaml_layer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("c.yaml");
        std::fs::write(&path, "dryRun: true\nreleasePrefix: v\n").unwrap();
        let layer = load_layer(&path).unwrap();
        assert_eq!(layer.dry_run, Some(true));
    }

    #[test]
    fn standard_local_search_order_prefers_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".nyx.json"), r#"{"releasePrefix": "json"}"#).unwrap();
        std::fs::write(dir.path().join(".nyx.yaml"), "releasePrefix: yaml\n").unwrap();
        let layer = load_standard_local(dir.path()).unwrap().unwrap();
        assert_eq!(layer.release_prefix, Some("json".into()));
    }

    #[test]
    fn missing_standard_local_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_standard_local(dir.path()).unwrap().is_none());
    }

    #[test]
    fn blank_custom_path_is_dropped_not_errored() {
        assert!(load_custom(Some(Path::new(""))).unwrap().is_none());
    }
}
