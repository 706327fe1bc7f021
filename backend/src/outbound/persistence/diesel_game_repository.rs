//! SQLite-backed `GameRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GameRepository, GameRepositoryError};
use crate::domain::{Game, GameFields, GameId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{GameRow, GameUpdate, NewGameRow};
use super::pool::{DbPool, PoolError};
use super::schema::games;

/// Diesel-backed implementation of the game repository port.
#[derive(Clone)]
pub struct DieselGameRepository {
    pool: DbPool,
}

impl DieselGameRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GameRepositoryError {
    map_basic_pool_error(error, GameRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> GameRepositoryError {
    map_basic_diesel_error(
        error,
        GameRepositoryError::query,
        GameRepositoryError::connection,
    )
}

fn row_to_game(row: GameRow) -> Result<Game, GameRepositoryError> {
    let GameRow {
        id,
        title,
        genre,
        description,
        image,
        category,
        cta_text,
        created_at,
        updated_at,
    } = row;

    let id = GameId::new(id)
        .map_err(|err| GameRepositoryError::query(format!("stored game id {id}: {err}")))?;
    let fields = GameFields::new(&title, &genre, &description, &category, &cta_text)
        .map_err(|err| GameRepositoryError::query(format!("stored game {id}: {err}")))?;

    Ok(Game {
        id,
        fields,
        image,
        created_at: created_at.and_utc(),
        updated_at: updated_at.and_utc(),
    })
}

#[async_trait]
impl GameRepository for DieselGameRepository {
    async fn create(
        &self,
        fields: &GameFields,
        image: &str,
        now: DateTime<Utc>,
    ) -> Result<GameId, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGameRow {
            title: fields.title(),
            genre: fields.genre(),
            description: fields.description(),
            image,
            category: fields.category(),
            cta_text: fields.cta_text(),
            created_at: now.naive_utc(),
            updated_at: now.naive_utc(),
        };

        let id: i32 = diesel::insert_into(games::table)
            .values(&row)
            .returning(games::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        GameId::new(id).map_err(|err| GameRepositoryError::query(err.to_string()))
    }

    async fn update(
        &self,
        id: GameId,
        fields: &GameFields,
        image: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = GameUpdate {
            title: fields.title(),
            genre: fields.genre(),
            description: fields.description(),
            image,
            category: fields.category(),
            cta_text: fields.cta_text(),
            updated_at: now.naive_utc(),
        };

        let affected = diesel::update(games::table.find(id.get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: GameId) -> Result<bool, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(games::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn find_by_id(&self, id: GameId) -> Result<Option<Game>, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = games::table
            .find(id.get())
            .select(GameRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_game).transpose()
    }

    async fn list(&self) -> Result<Vec<Game>, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GameRow> = games::table
            .order((games::created_at.desc(), games::id.desc()))
            .select(GameRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_game).collect()
    }

    async fn count(&self) -> Result<i64, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        games::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn count_by_image(&self, image: &str) -> Result<i64, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        games::table
            .filter(games::image.eq(image))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
