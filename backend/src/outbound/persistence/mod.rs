//! SQLite persistence adapters using Diesel.
//!
//! Repository implementations translate between Diesel rows and domain types
//! and nothing more. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use gamics::outbound::persistence::{DbPool, DieselGameRepository, PoolConfig};
//!
//! run_pending_migrations("gamics.db").await?;
//! let pool = DbPool::new(PoolConfig::new("gamics.db")).await?;
//! let games = DieselGameRepository::new(pool);
//! ```

mod diesel_admin_repository;
mod diesel_basic_error_mapping;
mod diesel_game_repository;
mod diesel_site_content_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_admin_repository::DieselAdminRepository;
pub use diesel_game_repository::DieselGameRepository;
pub use diesel_site_content_repository::DieselSiteContentRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_blocking,
};
pub use pool::{DbPool, PoolConfig, PoolError, SqliteConn};

/// Migrated database in a fresh temporary directory.
#[cfg(test)]
pub(crate) async fn test_pool() -> (tempfile::TempDir, DbPool) {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = dir.path().join("test.db").to_string_lossy().into_owned();
    run_pending_migrations(&url).await.expect("migrations apply");
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("pool builds");
    (dir, pool)
}
