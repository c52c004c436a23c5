//! Games Data

use rust_decimal::Decimal;

use crate::domain::games::records::{CategoryUuid, GameUuid};

/// Payload for creating a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
}

/// Payload for creating a game.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub uuid: GameUuid,
    pub title: String,
    pub price: Decimal,
    pub category_uuid: Option<CategoryUuid>,
}
