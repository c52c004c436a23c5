//! Pricing service errors.

use gamevault::pricing::QuoteError;
use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingServiceError {
    #[error("game not found")]
    GameNotFound,

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PricingServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::GameNotFound;
        }

        Self::Sql(error)
    }
}
