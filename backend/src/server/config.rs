//! HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::inbound::http::game_form::UploadLimits;
use crate::inbound::http::session_config::SessionSettings;
use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) uploads_dir: PathBuf,
    pub(crate) upload_limits: UploadLimits,
}

impl ServerConfig {
    /// Construct a server configuration over an already migrated pool.
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        db_pool: DbPool,
        uploads_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            session,
            bind_addr,
            db_pool,
            uploads_dir: uploads_dir.into(),
            upload_limits: UploadLimits::default(),
        }
    }

    /// Override the multipart limits applied to game writes.
    #[must_use]
    pub fn with_upload_limits(mut self, limits: UploadLimits) -> Self {
        self.upload_limits = limits;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
