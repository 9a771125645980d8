use thiserror::Error;

use crate::domain::report::ReportDecodeError;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business identifier or handle has no match at the remote service.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Transport or remote-operation fault, surfaced unchanged.
    #[error("Remote service failure: {0}")]
    Remote(RepositoryError),

    /// The remote call succeeded but its payload could not be decoded.
    #[error("Decoding failure: {0}")]
    Decoding(#[from] ReportDecodeError),

    /// A bulk operation stopped at the first failing item.
    #[error("Bulk operation aborted at item {failed_at} after {processed} processed: {source}")]
    PartialBulk {
        processed: usize,
        failed_at: usize,
        #[source]
        source: Box<ServiceError>,
    },

    #[error("Type constraint error: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Stable name of the error kind, as reported to relay callers.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "NotFound",
            ServiceError::Authentication(_) => "AuthenticationFailure",
            ServiceError::Remote(_) => "RemoteServiceFailure",
            ServiceError::Decoding(_) => "DecodingFailure",
            ServiceError::PartialBulk { .. } => "PartialBulkFailure",
            ServiceError::TypeConstraint(_) => "InvalidArgument",
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("entity not found".to_string()),
            RepositoryError::Authentication(message) => ServiceError::Authentication(message),
            other => ServiceError::Remote(other),
        }
    }
}
