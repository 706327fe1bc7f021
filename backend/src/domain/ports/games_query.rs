//! Driving port for catalog reads.

use async_trait::async_trait;

use crate::domain::{Error, Game, GameId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GamesQuery: Send + Sync {
    /// Every game, newest first.
    async fn list_games(&self) -> Result<Vec<Game>, Error>;

    /// A single game; `not_found` when absent.
    async fn get_game(&self, id: GameId) -> Result<Game, Error>;
}
