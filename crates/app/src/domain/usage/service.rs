//! Usage Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        promotions::records::PromotionUuid,
        usage::{
            UsageServiceError,
            data::NewUsageRecord,
            records::{PromotionPerformance, UsageRecord},
            repository::PgUsageRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsageService {
    db: Db,
    repository: PgUsageRepository,
}

impl PgUsageService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsageRepository::new(),
        }
    }
}

#[async_trait]
impl UsageService for PgUsageService {
    #[tracing::instrument(
        name = "usage.service.record",
        skip(self, usage),
        fields(
            promotion_uuid = %usage.promotion_uuid,
            transaction_uuid = %usage.transaction_uuid,
            game_uuid = %usage.game_uuid
        ),
        err
    )]
    async fn record(&self, usage: NewUsageRecord) -> Result<UsageRecord, UsageServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.record(&mut tx, usage).await?;

        tx.commit().await?;

        info!(usage_uuid = %record.uuid, "recorded promotion usage");

        Ok(record)
    }

    #[tracing::instrument(
        name = "usage.service.performance",
        skip(self),
        fields(promotion_uuid = %promotion),
        err
    )]
    async fn performance(
        &self,
        promotion: PromotionUuid,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<PromotionPerformance, UsageServiceError> {
        let mut tx = self.db.begin().await?;

        let (total_uses, total_revenue, total_savings) = self
            .repository
            .performance_totals(&mut tx, promotion, from, to)
            .await?;

        let daily_trend = self
            .repository
            .daily_usage(&mut tx, promotion, from, to)
            .await?;

        let top_games = self
            .repository
            .top_games(&mut tx, promotion, from, to)
            .await?;

        tx.commit().await?;

        Ok(PromotionPerformance {
            total_uses,
            total_revenue,
            total_savings,
            daily_trend,
            top_games,
        })
    }
}

#[automock]
#[async_trait]
pub trait UsageService: Send + Sync {
    /// Record one honoured discount against a completed sale.
    ///
    /// The checkout path writes through the shared repository inside its own
    /// purchase transaction; this entry point exists for transaction
    /// collaborators that complete sales elsewhere. Either way the row is
    /// written exactly once per `(transaction, game)` line item.
    async fn record(&self, usage: NewUsageRecord) -> Result<UsageRecord, UsageServiceError>;

    /// Aggregate a promotion's performance over a time range. Read-only;
    /// empty ranges return zeroed totals, not an error.
    async fn performance(
        &self,
        promotion: PromotionUuid,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<PromotionPerformance, UsageServiceError>;
}
