//! Promotions Records

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    domain::{
        games::records::{CategoryUuid, GameUuid},
        promotions::data::DiscountData,
    },
    uuids::TypedUuid,
};

/// Promotion UUID
pub type PromotionUuid = TypedUuid<PromotionRecord>;

/// Promotion Record
#[derive(Debug, Clone)]
pub struct PromotionRecord {
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
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
