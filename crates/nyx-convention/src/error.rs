use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConventionError {
    #[error("invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    IllegalProperty(#[from] nyx_config::ConfigError),
}
