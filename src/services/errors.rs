use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Failures surfaced to callers of the service layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No client exists under the requested id.
    #[error("Resource not found: client id {0}")]
    ResourceNotFound(i32),

    /// The backend rejected or failed the operation. Details are logged, never
    /// returned.
    #[error("Database integrity violation")]
    DatabaseIntegrityViolation,

    /// Caller-supplied data broke a value invariant.
    #[error("Invalid value: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::EmptyResult(id) | RepositoryError::EntityNotFound(id) => {
                ServiceError::ResourceNotFound(id.get())
            }
            other => {
                log::error!("Repository failure: {other}");
                ServiceError::DatabaseIntegrityViolation
            }
        }
    }
}
