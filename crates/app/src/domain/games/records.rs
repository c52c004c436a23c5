//! Games Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub created_at: Timestamp,
}

/// Game UUID
pub type GameUuid = TypedUuid<GameRecord>;

/// Game Record
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub uuid: GameUuid,
    pub title: String,
    pub price: Decimal,
    pub category_uuid: Option<CategoryUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
