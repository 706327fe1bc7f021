//! Driving ports for editable site text.

use async_trait::async_trait;

use crate::domain::{ContentKey, Error, SiteContentEntry};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteContentQuery: Send + Sync {
    /// Every content entry in insertion order.
    async fn all_content(&self) -> Result<Vec<SiteContentEntry>, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteContentCommand: Send + Sync {
    /// Replace the value of an existing key; `not_found` for unknown keys.
    async fn update_content(&self, key: ContentKey, value: String) -> Result<(), Error>;
}
