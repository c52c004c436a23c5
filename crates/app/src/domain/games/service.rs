//! Games Service

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::games::{
        GamesServiceError,
        data::{NewCategory, NewGame},
        records::{CategoryRecord, GameRecord, GameUuid},
        repository::PgGamesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgGamesService {
    db: Db,
    repository: PgGamesRepository,
}

impl PgGamesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgGamesRepository::new(),
        }
    }
}

#[async_trait]
impl GamesService for PgGamesService {
    #[tracing::instrument(
        name = "games.service.create_category",
        skip(self, category),
        fields(category_uuid = %category.uuid),
        err
    )]
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, GamesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.create_category(&mut tx, category).await?;

        tx.commit().await?;

        info!(category_uuid = %record.uuid, "created category");

        Ok(record)
    }

    #[tracing::instrument(
        name = "games.service.create_game",
        skip(self, game),
        fields(game_uuid = %game.uuid),
        err
    )]
    async fn create_game(&self, game: NewGame) -> Result<GameRecord, GamesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.create_game(&mut tx, game).await?;

        tx.commit().await?;

        info!(game_uuid = %record.uuid, "created game");

        Ok(record)
    }

    async fn get_game(&self, uuid: GameUuid) -> Result<GameRecord, GamesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_game(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait GamesService: Send + Sync {
    /// Create a category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, GamesServiceError>;

    /// Create a game with its catalog price.
    async fn create_game(&self, game: NewGame) -> Result<GameRecord, GamesServiceError>;

    /// Retrieve a single game.
    async fn get_game(&self, uuid: GameUuid) -> Result<GameRecord, GamesServiceError>;
}
