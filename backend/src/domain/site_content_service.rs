//! Site content domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    SiteContentCommand, SiteContentQuery, SiteContentRepository, SiteContentRepositoryError,
};
use crate::domain::{ContentKey, Error, SiteContentEntry};

fn map_repository_error(err: SiteContentRepositoryError) -> Error {
    error!(error = %err, "site content repository failure");
    Error::internal(format!("site content repository error: {err}"))
}

/// Implements the site content driving ports over a repository.
#[derive(Clone)]
pub struct SiteContentService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> SiteContentService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> SiteContentQuery for SiteContentService<R>
where
    R: SiteContentRepository,
{
    async fn all_content(&self) -> Result<Vec<SiteContentEntry>, Error> {
        self.repo.list().await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> SiteContentCommand for SiteContentService<R>
where
    R: SiteContentRepository,
{
    async fn update_content(&self, key: ContentKey, value: String) -> Result<(), Error> {
        let updated = self
            .repo
            .update_value(&key, &value, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(Error::not_found(format!("content key {key} not found")));
        }
        info!(key = %key, "site content updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockSiteContentRepository;
    use mockable::DefaultClock;
    use rstest::rstest;

    fn service(repo: MockSiteContentRepository) -> SiteContentService<MockSiteContentRepository> {
        SiteContentService::new(Arc::new(repo), Arc::new(DefaultClock))
    }

    fn key(raw: &str) -> ContentKey {
        ContentKey::new(raw).expect("valid key")
    }

    #[rstest]
    #[tokio::test]
    async fn updates_known_keys() {
        let mut repo = MockSiteContentRepository::new();
        repo.expect_update_value()
            .withf(|key, value, _| key.as_str() == "hero_title" && value == "Play more")
            .times(1)
            .returning(|_, _, _| Ok(true));

        service(repo)
            .update_content(key("hero_title"), "Play more".into())
            .await
            .expect("update succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_keys_are_not_found() {
        let mut repo = MockSiteContentRepository::new();
        repo.expect_update_value().returning(|_, _, _| Ok(false));

        let err = service(repo)
            .update_content(key("footer_text"), "x".into())
            .await
            .expect_err("unknown key");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn lists_all_entries() {
        let mut repo = MockSiteContentRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![SiteContentEntry::text(
                ContentKey::new("countdown_days").expect("key"),
                "10",
            )])
        });

        let entries = service(repo).all_content().await.expect("list succeeds");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, "10");
    }

    #[rstest]
    #[tokio::test]
    async fn repository_failures_are_internal() {
        let mut repo = MockSiteContentRepository::new();
        repo.expect_list()
            .returning(|| Err(SiteContentRepositoryError::query("locked")));

        let err = service(repo).all_content().await.expect_err("list fails");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
