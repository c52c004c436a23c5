//! Games Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::games::{
    data::{NewCategory, NewGame},
    records::{CategoryRecord, CategoryUuid, GameRecord, GameUuid},
};

const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const CREATE_GAME_SQL: &str = include_str!("sql/create_game.sql");
const GET_GAME_SQL: &str = include_str!("sql/get_game.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgGamesRepository;

impl PgGamesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(&category.name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: NewGame,
    ) -> Result<GameRecord, sqlx::Error> {
        query_as::<Postgres, GameRecord>(CREATE_GAME_SQL)
            .bind(game.uuid.into_uuid())
            .bind(&game.title)
            .bind(game.price)
            .bind(game.category_uuid.map(CategoryUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_game(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        game: GameUuid,
    ) -> Result<GameRecord, sqlx::Error> {
        query_as::<Postgres, GameRecord>(GET_GAME_SQL)
            .bind(game.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for GameRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: GameUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            category_uuid: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(CategoryUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
