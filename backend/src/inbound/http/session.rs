//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The admin session stores the account id and username. Handlers only see
//! [`AdminIdentity`] values.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AdminId, AdminIdentity, Error};

pub(crate) const ADMIN_ID_KEY: &str = "admin_id";
pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record a successful login. The session id is renewed first.
    pub fn persist_admin(&self, admin: &AdminIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ADMIN_ID_KEY, admin.id().get())
            .and_then(|()| self.0.insert(USERNAME_KEY, admin.username()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the signed-in admin, if any.
    ///
    /// A half-populated or malformed session counts as signed out.
    pub fn admin(&self) -> Result<Option<AdminIdentity>, Error> {
        let id = self.0.get::<i32>(ADMIN_ID_KEY).map_err(read_error)?;
        let username = self.0.get::<String>(USERNAME_KEY).map_err(read_error)?;
        match (id, username) {
            (Some(id), Some(username)) if !username.trim().is_empty() => {
                Ok(Some(AdminIdentity::new(AdminId::new(id), username)))
            }
            (None, None) => Ok(None),
            _ => {
                tracing::warn!("incomplete admin session; treating as signed out");
                Ok(None)
            }
        }
    }

    /// Require a signed-in admin or return `401 Unauthorized`.
    pub fn require_admin(&self) -> Result<AdminIdentity, Error> {
        self.admin()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
