//! Admin login backed by stored accounts and password hashes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{AdminRepository, LoginService, PasswordHasher};
use crate::domain::{AdminIdentity, Error, LoginCredentials};

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

/// Verifies credentials against `admin_users`.
///
/// Unknown usernames and wrong passwords produce the same error.
#[derive(Clone)]
pub struct AdminLoginService<R> {
    admins: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<R> AdminLoginService<R> {
    pub fn new(admins: Arc<R>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { admins, hasher }
    }
}

#[async_trait]
impl<R> LoginService for AdminLoginService<R>
where
    R: AdminRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminIdentity, Error> {
        let account = self
            .admins
            .find_by_username(credentials.username())
            .await
            .map_err(|err| {
                error!(error = %err, "admin repository failure");
                Error::internal(format!("admin repository error: {err}"))
            })?;

        let Some(account) = account else {
            warn!(username = credentials.username(), "login for unknown admin");
            return Err(invalid_credentials());
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .map_err(|err| {
                error!(error = %err, username = %account.username, "password verification failed");
                Error::internal(format!("password verification error: {err}"))
            })?;
        if !verified {
            warn!(username = %account.username, "login with wrong password");
            return Err(invalid_credentials());
        }

        info!(admin_id = %account.id, username = %account.username, "admin logged in");
        Ok(AdminIdentity::new(account.id, account.username))
    }
}
