//! Pricing Service

use async_trait::async_trait;
use gamevault::{
    catalog::PromotionCatalog,
    pricing::{PriceQuote, PricingResolver},
};
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        games::records::{CategoryUuid, GameUuid},
        pricing::{
            PricingServiceError,
            repository::{PgCandidatesRepository, column_decode},
        },
    },
    money::money_from_decimal,
};

#[derive(Debug, Clone)]
pub struct PgPricingService {
    db: Db,
    candidates: PgCandidatesRepository,
}

impl PgPricingService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            candidates: PgCandidatesRepository::new(),
        }
    }
}

#[async_trait]
impl PricingService for PgPricingService {
    #[tracing::instrument(
        name = "pricing.service.quote_game",
        skip(self),
        fields(game_uuid = %game),
        err
    )]
    async fn quote_game(
        &self,
        game: GameUuid,
        at: Timestamp,
    ) -> Result<PriceQuote<'static>, PricingServiceError> {
        let mut tx = self.db.begin().await?;

        let quote = quote_in_tx(&self.candidates, &mut tx, game, at).await?;

        tx.commit().await?;

        Ok(quote)
    }
}

/// Quote a game inside an existing transaction.
///
/// Shared with the checkout service so a purchase re-resolves prices against
/// current promotion state inside the same commit that persists the sale.
pub(crate) async fn quote_in_tx(
    candidates: &PgCandidatesRepository,
    tx: &mut Transaction<'_, Postgres>,
    game: GameUuid,
    at: Timestamp,
) -> Result<PriceQuote<'static>, PricingServiceError> {
    let pricing = candidates.get_game_pricing(tx, game).await?;

    let Some(base_price) = money_from_decimal(pricing.price) else {
        return Err(PricingServiceError::Sql(column_decode(
            "price",
            "price has sub-minor-unit precision",
        )));
    };

    let promotions = candidates
        .get_candidate_promotions(tx, game, pricing.category_uuid, at)
        .await?;

    let catalog = PromotionCatalog::new(promotions);
    let resolver = PricingResolver::new(&catalog);

    let quote = resolver.quote(
        game.into_uuid(),
        base_price,
        pricing.category_uuid.map(CategoryUuid::into_uuid),
        at,
    )?;

    Ok(quote)
}

#[automock]
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Quote a game's price at a point in time.
    ///
    /// Pure read. Storefront callers rendering a page should fall back to
    /// the undiscounted catalog price when this fails rather than failing
    /// the page.
    async fn quote_game(
        &self,
        game: GameUuid,
        at: Timestamp,
    ) -> Result<PriceQuote<'static>, PricingServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::Money;
    use testresult::TestResult;

    use crate::{
        domain::promotions::data::DiscountData,
        money::STORE_CURRENCY,
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn quote_without_promotions_returns_base_price() -> TestResult {
        let ctx = TestContext::new().await;

        let game = ctx
            .seed_game("Quiet Village", Decimal::new(5999, 2), None)
            .await;

        let quote = ctx
            .pricing
            .quote_game(game.uuid, Timestamp::now())
            .await?;

        assert_eq!(quote.base_price, Money::from_minor(5999, STORE_CURRENCY));
        assert_eq!(quote.final_price, Money::from_minor(5999, STORE_CURRENCY));
        assert_eq!(quote.applied_promotion, None);

        Ok(())
    }

    #[tokio::test]
    async fn quote_unknown_game_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.pricing.quote_game(GameUuid::new(), Timestamp::now()).await;

        assert!(
            matches!(result, Err(PricingServiceError::GameNotFound)),
            "expected GameNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn quote_applies_game_scoped_percentage() -> TestResult {
        let ctx = TestContext::new().await;

        let game = ctx
            .seed_game("Starfield Drifter", Decimal::new(5999, 2), None)
            .await;

        let promotion = ctx
            .seed_promotion(
                DiscountData::PercentageOff {
                    percent: Decimal::from(25),
                },
                vec![game.uuid],
                Vec::new(),
            )
            .await;

        let quote = ctx
            .pricing
            .quote_game(game.uuid, Timestamp::now())
            .await?;

        assert_eq!(quote.final_price, Money::from_minor(4499, STORE_CURRENCY));
        assert_eq!(quote.applied_promotion, Some(promotion.uuid.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn quote_applies_category_scoped_promotion() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx.seed_category("RPG").await;
        let game = ctx
            .seed_game("Dungeon Saga", Decimal::new(4000, 2), Some(category.uuid))
            .await;

        ctx.seed_promotion(
            DiscountData::PercentageOff {
                percent: Decimal::from(50),
            },
            Vec::new(),
            vec![category.uuid],
        )
        .await;

        let quote = ctx
            .pricing
            .quote_game(game.uuid, Timestamp::now())
            .await?;

        assert_eq!(quote.final_price, Money::from_minor(2000, STORE_CURRENCY));
        assert!(quote.is_discounted());

        Ok(())
    }

    #[tokio::test]
    async fn quote_picks_the_best_of_overlapping_promotions() -> TestResult {
        let ctx = TestContext::new().await;

        let game = ctx
            .seed_game("Crown of Ashes", Decimal::new(5999, 2), None)
            .await;

        let percentage = ctx
            .seed_promotion(
                DiscountData::PercentageOff {
                    percent: Decimal::from(25),
                },
                vec![game.uuid],
                Vec::new(),
            )
            .await;

        ctx.seed_promotion(
            DiscountData::AmountOff {
                amount: Decimal::new(1000, 2),
            },
            vec![game.uuid],
            Vec::new(),
        )
        .await;

        let quote = ctx
            .pricing
            .quote_game(game.uuid, Timestamp::now())
            .await?;

        // 44.99 from 25% off beats 49.99 from $10 off.
        assert_eq!(quote.final_price, Money::from_minor(4499, STORE_CURRENCY));
        assert_eq!(quote.applied_promotion, Some(percentage.uuid.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn equal_prices_go_to_the_first_created_promotion() -> TestResult {
        let ctx = TestContext::new().await;

        let game = ctx
            .seed_game("Tiebreaker", Decimal::new(6000, 2), None)
            .await;

        let first = ctx
            .seed_promotion(
                DiscountData::PercentageOff {
                    percent: Decimal::from(50),
                },
                vec![game.uuid],
                Vec::new(),
            )
            .await;

        ctx.seed_promotion(
            DiscountData::AmountOff {
                amount: Decimal::new(3000, 2),
            },
            vec![game.uuid],
            Vec::new(),
        )
        .await;

        let quote = ctx
            .pricing
            .quote_game(game.uuid, Timestamp::now())
            .await?;

        assert_eq!(quote.final_price, Money::from_minor(3000, STORE_CURRENCY));
        assert_eq!(quote.applied_promotion, Some(first.uuid.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn disabled_promotion_is_ignored() -> TestResult {
        let ctx = TestContext::new().await;

        let game = ctx
            .seed_game("Paused Game", Decimal::new(5999, 2), None)
            .await;

        let promotion = ctx
            .seed_promotion(
                DiscountData::PercentageOff {
                    percent: Decimal::from(25),
                },
                vec![game.uuid],
                Vec::new(),
            )
            .await;

        ctx.promotions
            .set_enabled(promotion.uuid, false)
            .await?;

        let quote = ctx
            .pricing
            .quote_game(game.uuid, Timestamp::now())
            .await?;

        assert_eq!(quote.final_price, Money::from_minor(5999, STORE_CURRENCY));
        assert_eq!(quote.applied_promotion, None);

        Ok(())
    }

    #[tokio::test]
    async fn promotion_outside_its_window_is_ignored() -> TestResult {
        let ctx = TestContext::new().await;

        let game = ctx
            .seed_game("Future Sale", Decimal::new(5999, 2), None)
            .await;

        ctx.seed_upcoming_promotion(
            DiscountData::PercentageOff {
                percent: Decimal::from(50),
            },
            vec![game.uuid],
        )
        .await;

        let quote = ctx
            .pricing
            .quote_game(game.uuid, Timestamp::now())
            .await?;

        assert_eq!(quote.final_price, Money::from_minor(5999, STORE_CURRENCY));
        assert_eq!(quote.applied_promotion, None);

        Ok(())
    }

    #[tokio::test]
    async fn promotion_with_empty_scope_discounts_nothing() -> TestResult {
        let ctx = TestContext::new().await;

        let game = ctx
            .seed_game("Unscoped", Decimal::new(5999, 2), None)
            .await;

        ctx.seed_promotion(
            DiscountData::PercentageOff {
                percent: Decimal::from(50),
            },
            Vec::new(),
            Vec::new(),
        )
        .await;

        let quote = ctx
            .pricing
            .quote_game(game.uuid, Timestamp::now())
            .await?;

        assert_eq!(quote.applied_promotion, None);

        Ok(())
    }
}
