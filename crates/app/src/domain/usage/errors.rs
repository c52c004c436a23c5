//! Usage service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsageServiceError {
    /// A usage row already exists for this `(transaction, game)` line item.
    /// Double-recording is a caller ordering bug, never retried.
    #[error("usage already recorded for this line item")]
    DuplicateUsage,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsageServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateUsage,
            Some(ErrorKind::CheckViolation | ErrorKind::ForeignKeyViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
