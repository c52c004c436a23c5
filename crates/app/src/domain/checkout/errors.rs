//! Checkout service errors.

use gamevault::pricing::QuoteError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{pricing::PricingServiceError, usage::UsageServiceError};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("cannot complete an empty purchase")]
    EmptyOrder,

    #[error("game not found")]
    GameNotFound,

    #[error("transaction already exists")]
    AlreadyExists,

    #[error("usage already recorded for a purchased line")]
    DuplicateUsage,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::GameNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::GameNotFound,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

impl From<PricingServiceError> for CheckoutServiceError {
    fn from(error: PricingServiceError) -> Self {
        match error {
            PricingServiceError::GameNotFound => Self::GameNotFound,
            PricingServiceError::Quote(quote) => Self::Quote(quote),
            PricingServiceError::Sql(sql) => Self::Sql(sql),
        }
    }
}

impl From<UsageServiceError> for CheckoutServiceError {
    fn from(error: UsageServiceError) -> Self {
        match error {
            UsageServiceError::DuplicateUsage => Self::DuplicateUsage,
            UsageServiceError::InvalidData => Self::InvalidData,
            UsageServiceError::Sql(sql) => Self::Sql(sql),
        }
    }
}
