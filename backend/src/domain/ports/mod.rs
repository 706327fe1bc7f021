//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`UploadStore`], [`PasswordHasher`]) expose
//! strongly typed errors so adapters map failures into predictable variants.
//! Driving ports return the domain [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod admin_repository;
mod game_repository;
mod games_command;
mod games_query;
mod login_service;
mod password_hasher;
mod site_content;
mod site_content_repository;
mod upload_store;

#[cfg(test)]
pub use admin_repository::MockAdminRepository;
pub use admin_repository::{AdminRepository, AdminRepositoryError};
#[cfg(test)]
pub use game_repository::MockGameRepository;
pub use game_repository::{GameRepository, GameRepositoryError};
#[cfg(test)]
pub use games_command::MockGamesCommand;
pub use games_command::{CreateGameRequest, GamesCommand, UpdateGameRequest};
#[cfg(test)]
pub use games_query::MockGamesQuery;
pub use games_query::GamesQuery;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use site_content::{MockSiteContentCommand, MockSiteContentQuery};
pub use site_content::{SiteContentCommand, SiteContentQuery};
#[cfg(test)]
pub use site_content_repository::MockSiteContentRepository;
pub use site_content_repository::{SiteContentRepository, SiteContentRepositoryError};
#[cfg(test)]
pub use upload_store::MockUploadStore;
pub use upload_store::{UploadStore, UploadStoreError};
