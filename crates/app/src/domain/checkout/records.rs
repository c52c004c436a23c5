//! Checkout Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    domain::{games::records::GameUuid, promotions::records::PromotionUuid},
    uuids::TypedUuid,
};

/// Transaction UUID
pub type TransactionUuid = TypedUuid<TransactionRecord>;

/// Transaction Record
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub uuid: TransactionUuid,
    pub buyer_uuid: Uuid,
    pub total_amount: Decimal,
    pub created_at: Timestamp,
}

/// Transaction Item UUID
pub type TransactionItemUuid = TypedUuid<TransactionItemRecord>;

/// Transaction Item Record (one purchased line)
#[derive(Debug, Clone)]
pub struct TransactionItemRecord {
    pub uuid: TransactionItemUuid,
    pub transaction_uuid: TransactionUuid,
    pub game_uuid: GameUuid,
    pub price: Decimal,
    pub created_at: Timestamp,
}

/// One line of a completed purchase with its pricing outcome.
#[derive(Debug, Clone)]
pub struct PurchasedLine {
    pub item: TransactionItemRecord,
    pub base_price: Decimal,
    pub applied_promotion: Option<PromotionUuid>,
    pub discount_amount: Decimal,
}

/// A committed purchase.
#[derive(Debug, Clone)]
pub struct CompletedPurchase {
    pub transaction: TransactionRecord,
    pub lines: Vec<PurchasedLine>,
}
