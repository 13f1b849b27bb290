//! Git error kinds.

use thiserror::Error;

/// Every repository-port operation fails with exactly one of these kinds;
/// none return absent/nil on success.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("ambiguous reference: {0}")]
    Ambiguous(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("working tree is not clean")]
    Dirty,

    #[error("HEAD is detached")]
    Detached,
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        use git2::ErrorCode;
        match err.code() {
            ErrorCode::NotFound => GitError::NotFound(err.message().to_string()),
            ErrorCode::Ambiguous => GitError::Ambiguous(err.message().to_string()),
            ErrorCode::Auth => GitError::Auth(err.message().to_string()),
            _ => match err.class() {
                git2::ErrorClass::Net | git2::ErrorClass::Ssh | git2::ErrorClass::Http => {
                    GitError::Protocol(err.message().to_string())
                }
                _ => GitError::Protocol(err.message().to_string()),
            },
        }
    }
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;
