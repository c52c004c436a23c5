//! Promotions Data

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    games::records::{CategoryUuid, GameUuid},
    promotions::records::PromotionUuid,
};

/// Discount configuration for a promotion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscountData {
    /// Take a percentage off (whole number in `(0, 100]`).
    PercentageOff { percent: Decimal },

    /// Subtract a fixed amount in major units (`> 0`).
    AmountOff { amount: Decimal },
}

impl DiscountData {
    #[must_use]
    pub const fn kind_as_str(&self) -> &'static str {
        match self {
            Self::PercentageOff { .. } => "percentage_off",
            Self::AmountOff { .. } => "amount_off",
        }
    }

    #[must_use]
    pub const fn value(&self) -> Decimal {
        match self {
            Self::PercentageOff { percent } => *percent,
            Self::AmountOff { amount } => *amount,
        }
    }
}

/// Payload for creating a promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub uuid: PromotionUuid,
    pub name: String,
    pub description: Option<String>,
    pub discount: DiscountData,
    pub games: Vec<GameUuid>,
    pub categories: Vec<CategoryUuid>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub enabled: bool,
    pub created_by: Uuid,
}

/// Payload for updating a promotion; scope is replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionUpdate {
    pub name: String,
    pub description: Option<String>,
    pub discount: DiscountData,
    pub games: Vec<GameUuid>,
    pub categories: Vec<CategoryUuid>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub enabled: bool,
}
