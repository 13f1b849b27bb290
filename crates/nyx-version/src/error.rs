use thiserror::Error;

/// Errors raised while parsing, bumping, or rendering a version.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("'{input}' is not a valid version under {scheme:?}")]
    MalformedVersion { scheme: crate::Scheme, input: String },

    #[error("scheme {0:?} does not support this operation")]
    UnsupportedScheme(crate::Scheme),
}
