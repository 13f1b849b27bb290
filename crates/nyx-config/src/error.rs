//! Configuration error kinds.

use thiserror::Error;

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or parsing a configuration or state file failed.
    #[error("data access error reading {path}: {source}")]
    DataAccess {
        path: std::path::PathBuf,
        #[source]
        source: DataAccessSource,
    },

    /// A configuration value was missing or malformed after resolution —
    /// e.g. an enabled convention or release type name that resolves to no
    /// item.
    #[error("illegal property: {0}")]
    IllegalProperty(String),
}

#[derive(Debug, Error)]
pub enum DataAccessSource {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_property_display() {
        let err = ConfigError::IllegalProperty("releaseTypes.enabled: unknown-type".into());
        assert_eq!(
            err.to_string(),
            "illegal property: releaseTypes.enabled: unknown-type"
        );
    }
}
