//! Usage Data

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    checkout::records::TransactionUuid,
    games::records::GameUuid,
    promotions::records::PromotionUuid,
    usage::records::UsageRecordUuid,
};

/// Payload for recording one honoured discount.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUsageRecord {
    pub uuid: UsageRecordUuid,
    pub promotion_uuid: PromotionUuid,
    pub transaction_uuid: TransactionUuid,
    pub game_uuid: GameUuid,
    pub discount_amount: Decimal,
    pub used_at: Timestamp,
}
