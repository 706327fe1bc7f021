//! Driving port for catalog mutations.
//!
//! Requests carry validated text fields plus the raw image inputs; the
//! implementation owns image resolution, file writes and reclamation.

use async_trait::async_trait;

use crate::domain::{Error, GameFields, GameId, ImageUpload};

/// Create a game from validated fields and image inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGameRequest {
    pub fields: GameFields,
    /// Client-supplied reference; `None` when absent or empty.
    pub existing_image: Option<String>,
    pub upload: Option<ImageUpload>,
}

/// Replace every mutable field of an existing game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGameRequest {
    pub id: GameId,
    pub fields: GameFields,
    pub existing_image: Option<String>,
    pub upload: Option<ImageUpload>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GamesCommand: Send + Sync {
    /// Store a new game, writing its fresh upload first when one is given.
    async fn create_game(&self, request: CreateGameRequest) -> Result<GameId, Error>;

    /// Replace a game and reclaim the upload it no longer uses.
    async fn update_game(&self, request: UpdateGameRequest) -> Result<(), Error>;

    /// Remove a game and reclaim its upload; `not_found` when absent.
    async fn delete_game(&self, id: GameId) -> Result<(), Error>;
}
