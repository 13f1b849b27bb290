//! The aggregate error type the pipeline commands raise. Each variant
//! wraps a lower layer's error type rather than re-encoding its meaning.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Git(#[from] nyx_git::GitError),

    #[error(transparent)]
    Config(#[from] nyx_config::ConfigError),

    #[error(transparent)]
    Version(#[from] nyx_version::VersionError),

    #[error(transparent)]
    Convention(#[from] nyx_convention::ConventionError),

    #[error(transparent)]
    Service(#[from] nyx_services::ServiceError),

    #[error(transparent)]
    Template(#[from] nyx_template::TemplateError),

    #[error("reading or writing state failed: {0}")]
    DataAccess(#[from] DataAccessSource),

    #[error(transparent)]
    Release(#[from] ReleaseError),
}

#[derive(Debug, Error)]
pub enum DataAccessSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("no release type matches the current branch")]
    NoMatchingReleaseType,

    #[error("inferred version does not satisfy the release type's version range")]
    VersionRangeViolated,
}

pub type CoreResult<T> = Result<T, CoreError>;
