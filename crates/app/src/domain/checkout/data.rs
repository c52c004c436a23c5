//! Checkout Data

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    checkout::records::{TransactionItemUuid, TransactionUuid},
    games::records::GameUuid,
};

/// Payload for completing a purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    pub uuid: TransactionUuid,
    pub buyer_uuid: Uuid,
    pub games: Vec<GameUuid>,
}

/// Payload for persisting one purchased line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewTransactionItem {
    pub(crate) uuid: TransactionItemUuid,
    pub(crate) transaction_uuid: TransactionUuid,
    pub(crate) game_uuid: GameUuid,
    pub(crate) price: Decimal,
}
