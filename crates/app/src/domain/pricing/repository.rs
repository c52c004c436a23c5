//! Pricing Repository
//!
//! Read-only queries that feed the pricing resolver.

use gamevault::{
    discounts::DiscountRule,
    promotions::{ActiveWindow, Promotion, PromotionScope},
};
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    domain::games::records::{CategoryUuid, GameUuid},
    money::money_from_decimal,
};

const GET_GAME_PRICING_SQL: &str = include_str!("sql/get_game_pricing.sql");
const GET_CANDIDATE_PROMOTIONS_SQL: &str = include_str!("sql/get_candidate_promotions.sql");

/// The slice of a game the resolver needs.
#[derive(Debug, Clone)]
pub(crate) struct GamePricing {
    pub(crate) price: Decimal,
    pub(crate) category_uuid: Option<CategoryUuid>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCandidatesRepository;

impl PgCandidatesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_game_pricing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: GameUuid,
    ) -> Result<GamePricing, sqlx::Error> {
        query_as::<Postgres, GamePricing>(GET_GAME_PRICING_SQL)
            .bind(game.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Load every promotion that could discount the game at `at`: enabled,
    /// inside its window, and scoped to the game or its category.
    pub(crate) async fn get_candidate_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: GameUuid,
        category: Option<CategoryUuid>,
        at: Timestamp,
    ) -> Result<Vec<Promotion<'static>>, sqlx::Error> {
        let rows: Vec<CandidateRow> = query_as(GET_CANDIDATE_PROMOTIONS_SQL)
            .bind(game.into_uuid())
            .bind(category.map(CategoryUuid::into_uuid))
            .bind(SqlxTimestamp::from(at))
            .fetch_all(&mut **tx)
            .await?;

        rows.into_iter()
            .map(CandidateRow::try_into_promotion)
            .collect()
    }
}

/// One `promotions` row plus its scope arrays, before conversion into an
/// engine value.
#[derive(Debug)]
struct CandidateRow {
    uuid: Uuid,
    name: String,
    discount_kind: String,
    discount_value: Decimal,
    starts_at: Timestamp,
    ends_at: Timestamp,
    enabled: bool,
    created_at: Timestamp,
    game_uuids: Vec<Uuid>,
    category_uuids: Vec<Uuid>,
}

impl CandidateRow {
    fn try_into_promotion(self) -> Result<Promotion<'static>, sqlx::Error> {
        let discount = match self.discount_kind.as_str() {
            "percentage_off" => DiscountRule::percentage_off(self.discount_value)
                .map_err(|error| column_decode("discount_value", error))?,
            "amount_off" => {
                let Some(amount) = money_from_decimal(self.discount_value) else {
                    return Err(column_decode(
                        "discount_value",
                        "amount has sub-minor-unit precision",
                    ));
                };

                DiscountRule::amount_off(amount)
                    .map_err(|error| column_decode("discount_value", error))?
            }
            other => {
                return Err(column_decode(
                    "discount_kind",
                    format!("unknown discount kind: {other}"),
                ));
            }
        };

        let window = ActiveWindow::new(self.starts_at, self.ends_at)
            .map_err(|error| column_decode("starts_at", error))?;

        Ok(Promotion::new(
            self.uuid,
            self.name,
            discount,
            PromotionScope::new(self.game_uuids, self.category_uuids),
            window,
            self.enabled,
            self.created_at,
        ))
    }
}

impl<'r> FromRow<'r, PgRow> for CandidateRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            discount_kind: row.try_get("discount_kind")?,
            discount_value: row.try_get("discount_value")?,
            starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
            ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
            enabled: row.try_get("enabled")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            game_uuids: row.try_get("game_uuids")?,
            category_uuids: row.try_get("category_uuids")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for GamePricing {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            price: row.try_get("price")?,
            category_uuid: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(CategoryUuid::from_uuid),
        })
    }
}

pub(crate) fn column_decode(
    column: &str,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: source.into(),
    }
}
