//! Usage Repository

use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    checkout::records::TransactionUuid,
    games::records::GameUuid,
    promotions::records::PromotionUuid,
    usage::{
        data::NewUsageRecord,
        records::{DailyUsage, GameUsage, UsageRecord, UsageRecordUuid},
    },
};

const RECORD_USAGE_SQL: &str = include_str!("sql/record_usage.sql");
const GET_PERFORMANCE_TOTALS_SQL: &str = include_str!("sql/get_performance_totals.sql");
const GET_DAILY_USAGE_SQL: &str = include_str!("sql/get_daily_usage.sql");
const GET_TOP_GAMES_SQL: &str = include_str!("sql/get_top_games.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsageRepository;

impl PgUsageRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert one ledger row. The `(transaction, game)` uniqueness invariant
    /// is enforced by the schema; a second write for the same line item
    /// fails rather than overwriting.
    pub(crate) async fn record(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        usage: NewUsageRecord,
    ) -> Result<UsageRecord, sqlx::Error> {
        query_as::<Postgres, UsageRecord>(RECORD_USAGE_SQL)
            .bind(usage.uuid.into_uuid())
            .bind(usage.promotion_uuid.into_uuid())
            .bind(usage.transaction_uuid.into_uuid())
            .bind(usage.game_uuid.into_uuid())
            .bind(usage.discount_amount)
            .bind(SqlxTimestamp::from(usage.used_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn performance_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<(i64, Decimal, Decimal), sqlx::Error> {
        query_as(GET_PERFORMANCE_TOTALS_SQL)
            .bind(promotion.into_uuid())
            .bind(SqlxTimestamp::from(from))
            .bind(SqlxTimestamp::from(to))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn daily_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<DailyUsage>, sqlx::Error> {
        query_as::<Postgres, DailyUsage>(GET_DAILY_USAGE_SQL)
            .bind(promotion.into_uuid())
            .bind(SqlxTimestamp::from(from))
            .bind(SqlxTimestamp::from(to))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn top_games(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<GameUsage>, sqlx::Error> {
        query_as::<Postgres, GameUsage>(GET_TOP_GAMES_SQL)
            .bind(promotion.into_uuid())
            .bind(SqlxTimestamp::from(from))
            .bind(SqlxTimestamp::from(to))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UsageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UsageRecordUuid::from_uuid(row.try_get("uuid")?),
            promotion_uuid: PromotionUuid::from_uuid(row.try_get("promotion_uuid")?),
            transaction_uuid: TransactionUuid::from_uuid(row.try_get("transaction_uuid")?),
            game_uuid: GameUuid::from_uuid(row.try_get("game_uuid")?),
            discount_amount: row.try_get("discount_amount")?,
            used_at: row.try_get::<SqlxTimestamp, _>("used_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for DailyUsage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            day: row.try_get::<SqlxDate, _>("day")?.to_jiff(),
            uses: row.try_get("uses")?,
            revenue: row.try_get("revenue")?,
            savings: row.try_get("savings")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for GameUsage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            game_uuid: GameUuid::from_uuid(row.try_get("game_uuid")?),
            title: row.try_get("title")?,
            uses: row.try_get("uses")?,
            revenue: row.try_get("revenue")?,
            savings: row.try_get("savings")?,
        })
    }
}
