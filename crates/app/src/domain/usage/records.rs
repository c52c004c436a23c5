//! Usage Records

use jiff::{Timestamp, civil};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    domain::{
        checkout::records::TransactionUuid, games::records::GameUuid,
        promotions::records::PromotionUuid,
    },
    uuids::TypedUuid,
};

/// Usage Record UUID
pub type UsageRecordUuid = TypedUuid<UsageRecord>;

/// One immutable ledger row: proof that a promotion discounted a specific
/// sold line item. `discount_amount` is a snapshot taken at purchase time,
/// not a reference to current promotion state.
#[derive(Debug, Clone)]
pub struct UsageRecord {
    pub uuid: UsageRecordUuid,
    pub promotion_uuid: PromotionUuid,
    pub transaction_uuid: TransactionUuid,
    pub game_uuid: GameUuid,
    pub discount_amount: Decimal,
    pub used_at: Timestamp,
}

/// Aggregated performance of one promotion over a date range.
#[derive(Debug, Clone, Serialize)]
pub struct PromotionPerformance {
    pub total_uses: i64,
    pub total_revenue: Decimal,
    pub total_savings: Decimal,
    pub daily_trend: Vec<DailyUsage>,
    pub top_games: Vec<GameUsage>,
}

/// Usage within one calendar day (UTC).
#[derive(Debug, Clone, Serialize)]
pub struct DailyUsage {
    pub day: civil::Date,
    pub uses: i64,
    pub revenue: Decimal,
    pub savings: Decimal,
}

/// Usage of one game under a promotion.
#[derive(Debug, Clone, Serialize)]
pub struct GameUsage {
    pub game_uuid: GameUuid,
    pub title: String,
    pub uses: i64,
    pub revenue: Decimal,
    pub savings: Decimal,
}
