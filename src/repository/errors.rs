use thiserror::Error;

use crate::models::remote::RemoteFault;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The remote service has no record for the requested identifier.
    #[error("Entity not found")]
    NotFound,

    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The request never produced a usable reply (connect, timeout, HTTP status).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote service answered with a declared fault.
    #[error("Remote fault {code}: {message}")]
    Fault { code: String, message: String },

    /// The reply could not be interpreted.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Protocol(format!("Undecodable reply: {err}"))
        } else {
            RepositoryError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Protocol(format!("Unexpected reply shape: {err}"))
    }
}

impl From<RemoteFault> for RepositoryError {
    fn from(fault: RemoteFault) -> Self {
        RepositoryError::Fault {
            code: fault.code,
            message: fault.message,
        }
    }
}
