//! Embedded schema migrations.
//!
//! Migrations run over a plain synchronous connection on a blocking thread
//! before the pool is used.

use diesel::{Connection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to open database `{path}`: {message}")]
    Connection { path: String, message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    #[error("migration task aborted: {message}")]
    Join { message: String },
}

/// Apply pending migrations synchronously. Returns how many were applied.
pub fn run_pending_migrations_blocking(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn =
        SqliteConnection::establish(database_url).map_err(|err| MigrationError::Connection {
            path: database_url.to_owned(),
            message: err.to_string(),
        })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}

/// Apply pending migrations on a blocking thread.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations_blocking(&url))
        .await
        .map_err(|err| MigrationError::Join {
            message: err.to_string(),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_apply_once() {
        let dir = tempfile::tempdir().expect("temp dir");
        let url = dir.path().join("migrate.db").to_string_lossy().into_owned();

        let first = run_pending_migrations(&url).await.expect("first run");
        let second = run_pending_migrations(&url).await.expect("second run");

        assert_eq!(first, 1);
        assert_eq!(second, 0);
    }
}
