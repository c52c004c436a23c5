//! Promotions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    games::records::{CategoryUuid, GameUuid},
    promotions::{
        data::{DiscountData, NewPromotion, PromotionUpdate},
        records::{PromotionRecord, PromotionUuid},
    },
};

const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const UPDATE_PROMOTION_SQL: &str = include_str!("sql/update_promotion.sql");
const DELETE_PROMOTION_SQL: &str = include_str!("sql/delete_promotion.sql");
const SET_PROMOTION_ENABLED_SQL: &str = include_str!("sql/set_promotion_enabled.sql");
const GET_PROMOTION_SQL: &str = include_str!("sql/get_promotion.sql");
const CREATE_PROMOTION_GAMES_SQL: &str = include_str!("sql/create_promotion_games.sql");
const CREATE_PROMOTION_CATEGORIES_SQL: &str = include_str!("sql/create_promotion_categories.sql");
const DELETE_PROMOTION_GAMES_SQL: &str = include_str!("sql/delete_promotion_games.sql");
const DELETE_PROMOTION_CATEGORIES_SQL: &str = include_str!("sql/delete_promotion_categories.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, sqlx::Error> {
        let (created_at, updated_at): (SqlxTimestamp, SqlxTimestamp) =
            query_as(CREATE_PROMOTION_SQL)
                .bind(promotion.uuid.into_uuid())
                .bind(&promotion.name)
                .bind(&promotion.description)
                .bind(promotion.discount.kind_as_str())
                .bind(promotion.discount.value())
                .bind(SqlxTimestamp::from(promotion.starts_at))
                .bind(SqlxTimestamp::from(promotion.ends_at))
                .bind(promotion.enabled)
                .bind(promotion.created_by)
                .fetch_one(&mut **tx)
                .await?;

        replace_scope(tx, promotion.uuid, &promotion.games, &promotion.categories).await?;

        Ok(PromotionRecord {
            uuid: promotion.uuid,
            name: promotion.name,
            description: promotion.description,
            discount: promotion.discount,
            games: promotion.games,
            categories: promotion.categories,
            starts_at: promotion.starts_at,
            ends_at: promotion.ends_at,
            enabled: promotion.enabled,
            created_by: promotion.created_by,
            created_at: created_at.to_jiff(),
            updated_at: updated_at.to_jiff(),
        })
    }

    pub(crate) async fn update_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<(), sqlx::Error> {
        let rows_affected = query(UPDATE_PROMOTION_SQL)
            .bind(uuid.into_uuid())
            .bind(&update.name)
            .bind(&update.description)
            .bind(update.discount.kind_as_str())
            .bind(update.discount.value())
            .bind(SqlxTimestamp::from(update.starts_at))
            .bind(SqlxTimestamp::from(update.ends_at))
            .bind(update.enabled)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        replace_scope(tx, uuid, &update.games, &update.categories).await
    }

    pub(crate) async fn delete_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROMOTION_SQL)
            .bind(uuid.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn set_enabled(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PromotionUuid,
        enabled: bool,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PROMOTION_ENABLED_SQL)
            .bind(uuid.into_uuid())
            .bind(enabled)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PromotionUuid,
    ) -> Result<PromotionRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(GET_PROMOTION_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

/// Replace the promotion's scope join rows wholesale.
async fn replace_scope(
    tx: &mut Transaction<'_, Postgres>,
    promotion: PromotionUuid,
    games: &[GameUuid],
    categories: &[CategoryUuid],
) -> Result<(), sqlx::Error> {
    query(DELETE_PROMOTION_GAMES_SQL)
        .bind(promotion.into_uuid())
        .execute(&mut **tx)
        .await?;

    query(DELETE_PROMOTION_CATEGORIES_SQL)
        .bind(promotion.into_uuid())
        .execute(&mut **tx)
        .await?;

    if !games.is_empty() {
        let game_uuids: Vec<Uuid> = games.iter().copied().map(GameUuid::into_uuid).collect();

        query(CREATE_PROMOTION_GAMES_SQL)
            .bind(promotion.into_uuid())
            .bind(&game_uuids)
            .execute(&mut **tx)
            .await?;
    }

    if !categories.is_empty() {
        let category_uuids: Vec<Uuid> = categories
            .iter()
            .copied()
            .map(CategoryUuid::into_uuid)
            .collect();

        query(CREATE_PROMOTION_CATEGORIES_SQL)
            .bind(promotion.into_uuid())
            .bind(&category_uuids)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

fn discount_from_columns(kind: &str, value: Decimal) -> Result<DiscountData, sqlx::Error> {
    match kind {
        "percentage_off" => Ok(DiscountData::PercentageOff { percent: value }),
        "amount_off" => Ok(DiscountData::AmountOff { amount: value }),
        other => Err(sqlx::Error::ColumnDecode {
            index: "discount_kind".to_string(),
            source: format!("unknown discount kind: {other}").into(),
        }),
    }
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("discount_kind")?;
        let value: Decimal = row.try_get("discount_value")?;
        let games: Vec<Uuid> = row.try_get("game_uuids")?;
        let categories: Vec<Uuid> = row.try_get("category_uuids")?;

        Ok(Self {
            uuid: PromotionUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            discount: discount_from_columns(&kind, value)?,
            games: games.into_iter().map(GameUuid::from_uuid).collect(),
            categories: categories.into_iter().map(CategoryUuid::from_uuid).collect(),
            starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
            ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
            enabled: row.try_get("enabled")?,
            created_by: row.try_get("created_by")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
