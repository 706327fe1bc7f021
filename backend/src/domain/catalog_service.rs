//! Catalog domain service: game reads, writes and the image lifecycle.
//!
//! Writes follow a fixed order: validate every input (fields, image format,
//! `existing_image` classification), then write a fresh upload, then write the
//! store row, then reclaim the superseded uploaded file. A store failure after
//! a fresh upload was written removes that upload again.
//!
//! Each uploaded file has one owning game: a reference to an upload another
//! row already stores is refused, and a superseded file is only removed once
//! no row points at it.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CreateGameRequest, GameRepository, GameRepositoryError, GamesCommand, GamesQuery,
    UpdateGameRequest, UploadStore, UploadStoreError,
};
use crate::domain::{
    CandidateImage, Error, Game, GameId, ImageReference, ImageRejection, ImageResolutionError,
    ImageUpload, ResolvedImage, UploadNameSuffix, UploadedFileName, WriteIntent, owned_upload,
    resolve_image, superseded_upload,
};

fn map_repository_error(err: GameRepositoryError) -> Error {
    error!(error = %err, "game repository failure");
    Error::internal(format!("game repository error: {err}"))
}

fn map_upload_error(err: UploadStoreError) -> Error {
    error!(error = %err, "upload store failure");
    Error::internal(format!("upload store error: {err}"))
}

fn map_resolution_error(err: ImageResolutionError) -> Error {
    let (field, code) = match &err {
        ImageResolutionError::MissingImage => ("image", "missing_image"),
        ImageResolutionError::InvalidReference { .. } => {
            ("existing_image", "invalid_image_reference")
        }
    };
    Error::invalid_field(field, code, err.to_string())
}

fn game_not_found(id: GameId) -> Error {
    Error::not_found(format!("game {id} not found"))
}

/// Image decided for a write, before any file is touched.
enum ImagePlan {
    /// Store the upload under `name`, then persist its public path.
    Fresh {
        name: UploadedFileName,
        bytes: Vec<u8>,
    },
    /// Persist this value as-is.
    Existing(String),
}

/// Catalog service implementing the game driving ports.
#[derive(Clone)]
pub struct CatalogService<G, U> {
    games: Arc<G>,
    uploads: Arc<U>,
    clock: Arc<dyn Clock>,
    suffixes: Arc<dyn UploadNameSuffix>,
}

impl<G, U> CatalogService<G, U>
where
    G: GameRepository,
    U: UploadStore,
{
    pub fn new(
        games: Arc<G>,
        uploads: Arc<U>,
        clock: Arc<dyn Clock>,
        suffixes: Arc<dyn UploadNameSuffix>,
    ) -> Self {
        Self {
            games,
            uploads,
            clock,
            suffixes,
        }
    }

    /// Classify a client-supplied reference. An uploaded file is only usable
    /// while it exists and no stored game references it yet, so every file
    /// has exactly one owner.
    async fn classify(&self, raw: String) -> Result<CandidateImage, Error> {
        let name = match ImageReference::parse(&raw) {
            Err(err) => return Ok(CandidateImage::rejected(raw, err.into())),
            Ok(ImageReference::UploadedFile(name)) => name,
            Ok(reference) => return Ok(CandidateImage::usable(raw, reference)),
        };

        if !self.uploads.exists(&name).await.map_err(map_upload_error)? {
            return Ok(CandidateImage::rejected(raw, ImageRejection::MissingUpload(name)));
        }
        let stored = ImageReference::uploaded(name.clone()).to_stored();
        let owners = self
            .games
            .count_by_image(&stored)
            .await
            .map_err(map_repository_error)?;
        if owners > 0 {
            return Ok(CandidateImage::rejected(raw, ImageRejection::ClaimedUpload(name)));
        }
        Ok(CandidateImage::usable(raw, ImageReference::UploadedFile(name)))
    }

    async fn plan_image(
        &self,
        intent: WriteIntent<'_>,
        upload: Option<ImageUpload>,
        existing_image: Option<String>,
    ) -> Result<ImagePlan, Error> {
        // A fresh upload wins, so the candidate is only classified without one.
        let candidate = match existing_image {
            Some(raw) if upload.is_none() => Some(self.classify(raw).await?),
            _ => None,
        };

        let resolved =
            resolve_image(intent, upload.is_some(), candidate).map_err(map_resolution_error)?;
        match (resolved, upload, intent) {
            (ResolvedImage::FreshUpload, Some(upload), _) => {
                let name = self.fresh_name(upload.declared().extension())?;
                Ok(ImagePlan::Fresh {
                    name,
                    bytes: upload.into_bytes(),
                })
            }
            (ResolvedImage::Reference(reference), _, _) => {
                Ok(ImagePlan::Existing(reference.to_stored()))
            }
            (ResolvedImage::Unchanged, _, WriteIntent::Update { current }) => {
                Ok(ImagePlan::Existing(current.to_owned()))
            }
            (ResolvedImage::FreshUpload, None, _)
            | (ResolvedImage::Unchanged, _, WriteIntent::Create) => {
                Err(Error::internal("image resolution produced an impossible plan"))
            }
        }
    }

    fn fresh_name(&self, extension: &str) -> Result<UploadedFileName, Error> {
        let millis = self.clock.utc().timestamp_millis();
        UploadedFileName::generated(millis, self.suffixes.next_suffix(), extension)
            .map_err(|err| Error::internal(format!("generated upload name rejected: {err}")))
    }

    /// Execute the file side of a plan; returns the value to persist and the
    /// freshly written file, if any.
    async fn materialise(
        &self,
        plan: ImagePlan,
    ) -> Result<(String, Option<UploadedFileName>), Error> {
        match plan {
            ImagePlan::Fresh { name, bytes } => {
                self.uploads
                    .write(&name, bytes)
                    .await
                    .map_err(map_upload_error)?;
                info!(file = %name, "stored fresh upload");
                Ok((ImageReference::uploaded(name.clone()).to_stored(), Some(name)))
            }
            ImagePlan::Existing(value) => Ok((value, None)),
        }
    }

    /// Best-effort removal of a file no record references any more.
    async fn reclaim(&self, name: &UploadedFileName, reason: &'static str) {
        match self.uploads.remove(name).await {
            Ok(()) => info!(file = %name, reason, "reclaimed upload"),
            Err(err) => warn!(file = %name, reason, error = %err, "failed to reclaim upload"),
        }
    }

    /// Reclaim a file dropped by a store write, unless some row still points
    /// at it. Rows written before uploads had single owners may share one.
    async fn reclaim_if_orphaned(&self, name: &UploadedFileName, reason: &'static str) {
        let stored = ImageReference::uploaded(name.clone()).to_stored();
        match self.games.count_by_image(&stored).await {
            Ok(0) => self.reclaim(name, reason).await,
            Ok(owners) => info!(file = %name, owners, reason, "upload still referenced; kept"),
            Err(err) => {
                warn!(file = %name, reason, error = %err, "could not count upload owners; kept")
            }
        }
    }

    async fn find_existing(&self, id: GameId) -> Result<Game, Error> {
        self.games
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| game_not_found(id))
    }
}

#[async_trait]
impl<G, U> GamesCommand for CatalogService<G, U>
where
    G: GameRepository,
    U: UploadStore,
{
    async fn create_game(&self, request: CreateGameRequest) -> Result<GameId, Error> {
        let CreateGameRequest {
            fields,
            existing_image,
            upload,
        } = request;

        let plan = self
            .plan_image(WriteIntent::Create, upload, existing_image)
            .await?;
        let (image, fresh) = self.materialise(plan).await?;

        match self.games.create(&fields, &image, self.clock.utc()).await {
            Ok(id) => {
                info!(game_id = %id, image = %image, "game created");
                Ok(id)
            }
            Err(err) => {
                if let Some(name) = fresh {
                    self.reclaim(&name, "store write failed").await;
                }
                Err(map_repository_error(err))
            }
        }
    }

    async fn update_game(&self, request: UpdateGameRequest) -> Result<(), Error> {
        let UpdateGameRequest {
            id,
            fields,
            existing_image,
            upload,
        } = request;

        let current = self.find_existing(id).await?;
        let plan = self
            .plan_image(
                WriteIntent::Update {
                    current: &current.image,
                },
                upload,
                existing_image,
            )
            .await?;
        let (image, fresh) = self.materialise(plan).await?;

        let outcome = self.games.update(id, &fields, &image, self.clock.utc()).await;
        match outcome {
            Ok(true) => {
                info!(game_id = %id, image = %image, "game updated");
                if let Some(stale) = superseded_upload(&current.image, &image) {
                    self.reclaim_if_orphaned(&stale, "image replaced").await;
                }
                Ok(())
            }
            Ok(false) => {
                if let Some(name) = fresh {
                    self.reclaim(&name, "game vanished during update").await;
                }
                Err(game_not_found(id))
            }
            Err(err) => {
                if let Some(name) = fresh {
                    self.reclaim(&name, "store write failed").await;
                }
                Err(map_repository_error(err))
            }
        }
    }

    async fn delete_game(&self, id: GameId) -> Result<(), Error> {
        let current = self.find_existing(id).await?;
        let deleted = self.games.delete(id).await.map_err(map_repository_error)?;
        if !deleted {
            return Err(game_not_found(id));
        }

        info!(game_id = %id, "game deleted");
        if let Some(owned) = owned_upload(&current.image) {
            self.reclaim_if_orphaned(&owned, "game deleted").await;
        }
        Ok(())
    }
}

#[async_trait]
impl<G, U> GamesQuery for CatalogService<G, U>
where
    G: GameRepository,
    U: UploadStore,
{
    async fn list_games(&self) -> Result<Vec<Game>, Error> {
        self.games.list().await.map_err(map_repository_error)
    }

    async fn get_game(&self, id: GameId) -> Result<Game, Error> {
        self.find_existing(id).await
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
