//! SQLite-backed `AdminRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AdminRepository, AdminRepositoryError};
use crate::domain::{AdminAccount, AdminId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AdminUserRow, NewAdminUserRow};
use super::pool::{DbPool, PoolError};
use super::schema::admin_users;

#[derive(Clone)]
pub struct DieselAdminRepository {
    pool: DbPool,
}

impl DieselAdminRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AdminRepositoryError {
    map_basic_pool_error(error, AdminRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AdminRepositoryError {
    map_basic_diesel_error(
        error,
        AdminRepositoryError::query,
        AdminRepositoryError::connection,
    )
}

#[async_trait]
impl AdminRepository for DieselAdminRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AdminRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = admin_users::table
            .filter(admin_users::username.eq(username))
            .select(AdminUserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|row| AdminAccount {
            id: AdminId::new(row.id),
            username: row.username,
            password_hash: row.password_hash,
        }))
    }

    async fn upsert(
        &self,
        username: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<AdminId, AdminRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAdminUserRow {
            username,
            password_hash,
            created_at: now.naive_utc(),
        };

        let id: i32 = diesel::insert_into(admin_users::table)
            .values(&row)
            .on_conflict(admin_users::username)
            .do_update()
            .set(admin_users::password_hash.eq(excluded(admin_users::password_hash)))
            .returning(admin_users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(AdminId::new(id))
    }

    async fn count(&self) -> Result<i64, AdminRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        admin_users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::test_pool;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn upsert_replaces_password_hash_for_same_username() {
        let (_dir, pool) = test_pool().await;
        let repo = DieselAdminRepository::new(pool);
        let now = Utc::now();

        let first = repo.upsert("admin", "$hash-1", now).await.expect("insert");
        let second = repo.upsert("admin", "$hash-2", now).await.expect("reset");

        assert_eq!(first, second);
        assert_eq!(repo.count().await.expect("count"), 1);
        let account = repo
            .find_by_username("admin")
            .await
            .expect("find")
            .expect("present");
        assert_eq!(account.password_hash, "$hash-2");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_username_is_none() {
        let (_dir, pool) = test_pool().await;
        let repo = DieselAdminRepository::new(pool);
        assert!(repo.find_by_username("ghost").await.expect("find").is_none());
    }
}
