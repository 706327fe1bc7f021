//! Port abstraction for admin account persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AdminAccount, AdminId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by admin account adapters.
    pub enum AdminRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "admin repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "admin repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Account with exactly this username, if any.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AdminRepositoryError>;

    /// Create the account or replace its password hash.
    async fn upsert(
        &self,
        username: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<AdminId, AdminRepositoryError>;

    /// Number of admin accounts.
    async fn count(&self) -> Result<i64, AdminRepositoryError>;
}
