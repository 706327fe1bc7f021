//! Port abstraction for site content persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ContentKey, SiteContentEntry};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by site content adapters.
    pub enum SiteContentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "site content repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "site content repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteContentRepository: Send + Sync {
    /// All entries, oldest first.
    async fn list(&self) -> Result<Vec<SiteContentEntry>, SiteContentRepositoryError>;

    /// Set the value of an existing entry. Returns `false` for unknown keys.
    async fn update_value(
        &self,
        key: &ContentKey,
        value: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, SiteContentRepositoryError>;

    /// Insert entries, leaving existing keys untouched.
    async fn insert_missing(
        &self,
        entries: &[SiteContentEntry],
        now: DateTime<Utc>,
    ) -> Result<(), SiteContentRepositoryError>;

    /// Number of stored entries.
    async fn count(&self) -> Result<i64, SiteContentRepositoryError>;
}
