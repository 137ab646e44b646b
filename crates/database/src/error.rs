use sea_orm::DbErr;
use thiserror::Error;

/// Outcomes of a course repository call other than success
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("course {0} not found")]
    NotFound(String),

    #[error("course {0} already exists")]
    DuplicateKey(String),

    #[error("Course_Number cannot be changed")]
    KeyChange,

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}
