//! Promotions Service

use async_trait::async_trait;
use gamevault::{discounts::DiscountRule, promotions::ActiveWindow};
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::promotions::{
        PromotionsServiceError,
        data::{DiscountData, NewPromotion, PromotionUpdate},
        records::{PromotionRecord, PromotionUuid},
        repository::PgPromotionsRepository,
    },
    money::money_from_decimal,
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    repository: PgPromotionsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromotionsRepository::new(),
        }
    }
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.create_promotion",
        skip(self, promotion),
        fields(
            promotion_uuid = %promotion.uuid,
            discount_kind = promotion.discount.kind_as_str(),
            game_count = promotion.games.len(),
            category_count = promotion.categories.len()
        ),
        err
    )]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        validate_definition(&promotion.discount, promotion.starts_at, promotion.ends_at)?;

        let mut tx = self.db.begin().await?;

        let record = self.repository.create_promotion(&mut tx, promotion).await?;

        tx.commit().await?;

        info!(promotion_uuid = %record.uuid, "created promotion");

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.update_promotion",
        skip(self, update),
        fields(promotion_uuid = %uuid, discount_kind = update.discount.kind_as_str()),
        err
    )]
    async fn update_promotion(
        &self,
        uuid: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<(), PromotionsServiceError> {
        validate_definition(&update.discount, update.starts_at, update.ends_at)?;

        let mut tx = self.db.begin().await?;

        self.repository.update_promotion(&mut tx, uuid, update).await?;

        tx.commit().await?;

        info!(promotion_uuid = %uuid, "updated promotion");

        Ok(())
    }

    #[tracing::instrument(
        name = "promotions.service.delete_promotion",
        skip(self),
        fields(promotion_uuid = %uuid),
        err
    )]
    async fn delete_promotion(&self, uuid: PromotionUuid) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_promotion(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(promotion_uuid = %uuid, "deleted promotion");

        Ok(())
    }

    #[tracing::instrument(
        name = "promotions.service.set_enabled",
        skip(self),
        fields(promotion_uuid = %uuid, enabled),
        err
    )]
    async fn set_enabled(
        &self,
        uuid: PromotionUuid,
        enabled: bool,
    ) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.set_enabled(&mut tx, uuid, enabled).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(promotion_uuid = %uuid, enabled, "toggled promotion");

        Ok(())
    }

    async fn get_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_promotion(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(record)
    }
}

/// Run a definition through the engine's validating constructors before it
/// touches storage; the schema carries matching CHECK constraints.
fn validate_definition(
    discount: &DiscountData,
    starts_at: Timestamp,
    ends_at: Timestamp,
) -> Result<(), PromotionsServiceError> {
    match discount {
        DiscountData::PercentageOff { percent } => {
            DiscountRule::percentage_off(*percent)?;
        }
        DiscountData::AmountOff { amount } => {
            let amount =
                money_from_decimal(*amount).ok_or(PromotionsServiceError::InvalidData)?;

            DiscountRule::amount_off(amount)?;
        }
    }

    ActiveWindow::new(starts_at, ends_at)?;

    Ok(())
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Create a promotion with its discount rule, window, and scope.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Update a promotion; its scope join rows are replaced wholesale.
    async fn update_promotion(
        &self,
        uuid: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<(), PromotionsServiceError>;

    /// Delete a promotion. Historical usage rows are left untouched.
    async fn delete_promotion(&self, uuid: PromotionUuid) -> Result<(), PromotionsServiceError>;

    /// Flip the manual activation flag.
    async fn set_enabled(
        &self,
        uuid: PromotionUuid,
        enabled: bool,
    ) -> Result<(), PromotionsServiceError>;

    /// Retrieve a promotion with its scope.
    async fn get_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError>;
}
