//! Driving port for admin authentication.
//!
//! Inbound adapters call this port to check credentials without importing
//! persistence or hashing concerns.

use async_trait::async_trait;

use crate::domain::{AdminIdentity, Error, LoginCredentials};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the authenticated admin.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminIdentity, Error>;
}
