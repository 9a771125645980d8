//! Conversions from domain validation errors into the layer error types.
//!
//! Domain types stay free of repository and service concerns; the glue lives
//! here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

/// An envelope whose counts disagree came from the remote service, so it is a
/// protocol error rather than a local validation failure.
impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        match val {
            TypeConstraintError::EnvelopeCountMismatch { .. } => {
                RepositoryError::Protocol(val.to_string())
            }
            other => RepositoryError::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_mismatch_is_a_protocol_error() {
        let err = RepositoryError::from(TypeConstraintError::EnvelopeCountMismatch {
            reported: 3,
            actual: 2,
        });

        assert!(matches!(err, RepositoryError::Protocol(_)));
    }

    #[test]
    fn other_constraints_are_validation_errors() {
        assert!(matches!(
            RepositoryError::from(TypeConstraintError::NonPositiveId),
            RepositoryError::Validation(_)
        ));
        assert!(matches!(
            ServiceError::from(TypeConstraintError::EmptyString),
            ServiceError::TypeConstraint(_)
        ));
    }
}
