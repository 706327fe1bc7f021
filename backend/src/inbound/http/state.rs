//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    GamesCommand, GamesQuery, LoginService, SiteContentCommand, SiteContentQuery,
};
use crate::inbound::http::game_form::UploadLimits;

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub games: Arc<dyn GamesCommand>,
    pub games_query: Arc<dyn GamesQuery>,
    pub content: Arc<dyn SiteContentCommand>,
    pub content_query: Arc<dyn SiteContentQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub games: Arc<dyn GamesCommand>,
    pub games_query: Arc<dyn GamesQuery>,
    pub content: Arc<dyn SiteContentCommand>,
    pub content_query: Arc<dyn SiteContentQuery>,
    pub upload_limits: UploadLimits,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports, UploadLimits::default())
    }
}

impl HttpState {
    pub fn new(ports: HttpStatePorts, upload_limits: UploadLimits) -> Self {
        let HttpStatePorts {
            login,
            games,
            games_query,
            content,
            content_query,
        } = ports;
        Self {
            login,
            games,
            games_query,
            content,
            content_query,
            upload_limits,
        }
    }
}
