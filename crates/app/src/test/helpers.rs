//! Seed helpers shared across service tests.

use jiff::{Timestamp, ToSpan};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    games::{
        data::{NewCategory, NewGame},
        records::{CategoryRecord, CategoryUuid, GameRecord, GameUuid},
        service::GamesService,
    },
    promotions::{
        data::{DiscountData, NewPromotion},
        records::{PromotionRecord, PromotionUuid},
        service::PromotionsService,
    },
};

use super::TestContext;

impl TestContext {
    pub async fn seed_category(&self, name: &str) -> CategoryRecord {
        self.games
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: name.to_string(),
            })
            .await
            .expect("seed category should succeed")
    }

    pub async fn seed_game(
        &self,
        title: &str,
        price: Decimal,
        category: Option<CategoryUuid>,
    ) -> GameRecord {
        self.games
            .create_game(NewGame {
                uuid: GameUuid::new(),
                title: title.to_string(),
                price,
                category_uuid: category,
            })
            .await
            .expect("seed game should succeed")
    }

    /// Seed an enabled promotion whose window comfortably surrounds now.
    pub async fn seed_promotion(
        &self,
        discount: DiscountData,
        games: Vec<GameUuid>,
        categories: Vec<CategoryUuid>,
    ) -> PromotionRecord {
        let now = Timestamp::now();

        self.promotions
            .create_promotion(NewPromotion {
                uuid: PromotionUuid::new(),
                name: "Test Promotion".to_string(),
                description: None,
                discount,
                games,
                categories,
                starts_at: now.checked_sub(1.hour()).expect("window start"),
                ends_at: now.checked_add(720.hours()).expect("window end"),
                enabled: true,
                created_by: Uuid::now_v7(),
            })
            .await
            .expect("seed promotion should succeed")
    }

    /// Seed an enabled promotion whose window has not opened yet.
    pub async fn seed_upcoming_promotion(
        &self,
        discount: DiscountData,
        games: Vec<GameUuid>,
    ) -> PromotionRecord {
        let now = Timestamp::now();

        self.promotions
            .create_promotion(NewPromotion {
                uuid: PromotionUuid::new(),
                name: "Upcoming Promotion".to_string(),
                description: None,
                discount,
                games,
                categories: Vec::new(),
                starts_at: now.checked_add(240.hours()).expect("window start"),
                ends_at: now.checked_add(480.hours()).expect("window end"),
                enabled: true,
                created_by: Uuid::now_v7(),
            })
            .await
            .expect("seed upcoming promotion should succeed")
    }
}
