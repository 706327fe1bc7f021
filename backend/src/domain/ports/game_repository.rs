//! Port abstraction for catalog (game) persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Game, GameFields, GameId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by game repository adapters.
    pub enum GameRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "game repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "game repository query failed: {message}",
    }
}

/// Port for reading and writing catalog entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Insert a game and return its store-assigned identifier.
    async fn create(
        &self,
        fields: &GameFields,
        image: &str,
        now: DateTime<Utc>,
    ) -> Result<GameId, GameRepositoryError>;

    /// Overwrite every mutable column. Returns `false` when no row matched.
    async fn update(
        &self,
        id: GameId,
        fields: &GameFields,
        image: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, GameRepositoryError>;

    /// Remove a game. Returns `false` when no row matched.
    async fn delete(&self, id: GameId) -> Result<bool, GameRepositoryError>;

    /// Look up one game; `None` when no row has this id.
    async fn find_by_id(&self, id: GameId) -> Result<Option<Game>, GameRepositoryError>;

    /// All games, newest `created_at` first, ties broken by higher id first.
    async fn list(&self) -> Result<Vec<Game>, GameRepositoryError>;

    /// Number of stored games.
    async fn count(&self) -> Result<i64, GameRepositoryError>;

    /// Number of games whose stored `image` equals `image` exactly.
    async fn count_by_image(&self, image: &str) -> Result<i64, GameRepositoryError>;
}
