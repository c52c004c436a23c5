//! Transactions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    checkout::{
        data::NewTransactionItem,
        records::{TransactionItemRecord, TransactionItemUuid, TransactionRecord, TransactionUuid},
    },
    games::records::GameUuid,
};

const CREATE_TRANSACTION_SQL: &str = include_str!("sql/create_transaction.sql");
const CREATE_TRANSACTION_ITEM_SQL: &str = include_str!("sql/create_transaction_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTransactionsRepository;

impl PgTransactionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: TransactionUuid,
        buyer_uuid: Uuid,
        total_amount: Decimal,
    ) -> Result<TransactionRecord, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(CREATE_TRANSACTION_SQL)
            .bind(uuid.into_uuid())
            .bind(buyer_uuid)
            .bind(total_amount)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_transaction_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewTransactionItem,
    ) -> Result<TransactionItemRecord, sqlx::Error> {
        query_as::<Postgres, TransactionItemRecord>(CREATE_TRANSACTION_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.transaction_uuid.into_uuid())
            .bind(item.game_uuid.into_uuid())
            .bind(item.price)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TransactionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TransactionUuid::from_uuid(row.try_get("uuid")?),
            buyer_uuid: row.try_get("buyer_uuid")?,
            total_amount: row.try_get("total_amount")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TransactionItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TransactionItemUuid::from_uuid(row.try_get("uuid")?),
            transaction_uuid: TransactionUuid::from_uuid(row.try_get("transaction_uuid")?),
            game_uuid: GameUuid::from_uuid(row.try_get("game_uuid")?),
            price: row.try_get("price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
