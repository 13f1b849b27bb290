use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service '{0}' is not registered")]
    Unknown(String),

    #[error("upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
