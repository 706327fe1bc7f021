//! Builders wiring repository-backed services into the HTTP state.

use std::path::Path;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{PasswordHasher, UploadStoreError};
use crate::domain::{AdminLoginService, CatalogService, RandomSuffix, SiteContentService};
use crate::inbound::http::game_form::UploadLimits;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::persistence::{
    DbPool, DieselAdminRepository, DieselGameRepository, DieselSiteContentRepository,
};
use crate::outbound::security::Argon2PasswordHasher;
use crate::outbound::uploads::CapStdUploadStore;

/// Build the shared HTTP state over SQLite and the uploads directory.
///
/// The uploads directory is created when missing.
///
/// # Errors
///
/// Returns [`UploadStoreError`] when the uploads directory cannot be opened.
pub fn build_http_state(
    pool: &DbPool,
    uploads_dir: &Path,
    upload_limits: UploadLimits,
) -> Result<HttpState, UploadStoreError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let uploads = Arc::new(CapStdUploadStore::open(uploads_dir)?);

    let catalog = Arc::new(CatalogService::new(
        Arc::new(DieselGameRepository::new(pool.clone())),
        uploads,
        clock.clone(),
        Arc::new(RandomSuffix),
    ));
    let content = Arc::new(SiteContentService::new(
        Arc::new(DieselSiteContentRepository::new(pool.clone())),
        clock,
    ));
    let login = Arc::new(AdminLoginService::new(
        Arc::new(DieselAdminRepository::new(pool.clone())),
        hasher,
    ));

    Ok(HttpState::new(
        HttpStatePorts {
            login,
            games: catalog.clone(),
            games_query: catalog,
            content: content.clone(),
            content_query: content,
        },
        upload_limits,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::GamesQuery;
    use crate::outbound::persistence::test_pool;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn creates_missing_uploads_directory() {
        let (db_dir, pool) = test_pool().await;
        let uploads = db_dir.path().join("nested").join("uploads");

        let state = build_http_state(&pool, &uploads, UploadLimits::default())
            .expect("state builds");

        assert!(uploads.is_dir());
        assert_eq!(state.upload_limits, UploadLimits::default());
        let games = state.games_query.list_games().await.expect("list games");
        assert!(games.is_empty());
    }
}
