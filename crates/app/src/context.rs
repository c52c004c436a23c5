//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        checkout::service::{CheckoutService, PgCheckoutService},
        games::service::{GamesService, PgGamesService},
        pricing::service::{PgPricingService, PricingService},
        promotions::service::{PgPromotionsService, PromotionsService},
        usage::service::{PgUsageService, UsageService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub games: Arc<dyn GamesService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub pricing: Arc<dyn PricingService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub usage: Arc<dyn UsageService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url).await.map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            games: Arc::new(PgGamesService::new(db.clone())),
            promotions: Arc::new(PgPromotionsService::new(db.clone())),
            pricing: Arc::new(PgPricingService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone())),
            usage: Arc::new(PgUsageService::new(db)),
        })
    }
}
