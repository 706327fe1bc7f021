//! SQLite-backed `SiteContentRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SiteContentRepository, SiteContentRepositoryError};
use crate::domain::{ContentKey, SiteContentEntry};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewSiteContentRow, SiteContentRow};
use super::pool::{DbPool, PoolError};
use super::schema::site_content;

#[derive(Clone)]
pub struct DieselSiteContentRepository {
    pool: DbPool,
}

impl DieselSiteContentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SiteContentRepositoryError {
    map_basic_pool_error(error, SiteContentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SiteContentRepositoryError {
    map_basic_diesel_error(
        error,
        SiteContentRepositoryError::query,
        SiteContentRepositoryError::connection,
    )
}

fn row_to_entry(row: SiteContentRow) -> Result<SiteContentEntry, SiteContentRepositoryError> {
    let key = ContentKey::new(&row.content_key)
        .map_err(|err| SiteContentRepositoryError::query(err.to_string()))?;
    Ok(SiteContentEntry {
        key,
        value: row.content_value,
        content_type: row.content_type,
    })
}

#[async_trait]
impl SiteContentRepository for DieselSiteContentRepository {
    async fn list(&self) -> Result<Vec<SiteContentEntry>, SiteContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SiteContentRow> = site_content::table
            .order(site_content::id.asc())
            .select(SiteContentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_entry).collect()
    }

    async fn update_value(
        &self,
        key: &ContentKey,
        value: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, SiteContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(
            site_content::table.filter(site_content::content_key.eq(key.as_str())),
        )
        .set((
            site_content::content_value.eq(value),
            site_content::updated_at.eq(now.naive_utc()),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn insert_missing(
        &self,
        entries: &[SiteContentEntry],
        now: DateTime<Utc>,
    ) -> Result<(), SiteContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewSiteContentRow<'_>> = entries
            .iter()
            .map(|entry| NewSiteContentRow {
                content_key: entry.key.as_str(),
                content_value: &entry.value,
                content_type: &entry.content_type,
                updated_at: now.naive_utc(),
            })
            .collect();

        // `INSERT OR IGNORE` leaves keys that already exist untouched.
        for row in &rows {
            diesel::insert_or_ignore_into(site_content::table)
                .values(row)
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, SiteContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        site_content::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
