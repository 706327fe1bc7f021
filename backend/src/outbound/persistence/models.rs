//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain types.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{admin_users, games, site_content};

/// Row read from `games`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct GameRow {
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub cta_text: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable struct for new `games` rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = games)]
pub(crate) struct NewGameRow<'a> {
    pub title: &'a str,
    pub genre: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub category: &'a str,
    pub cta_text: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full-row changeset applied by updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = games)]
pub(crate) struct GameUpdate<'a> {
    pub title: &'a str,
    pub genre: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub category: &'a str,
    pub cta_text: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = site_content)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct SiteContentRow {
    pub content_key: String,
    pub content_value: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = site_content)]
pub(crate) struct NewSiteContentRow<'a> {
    pub content_key: &'a str,
    pub content_value: &'a str,
    pub content_type: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admin_users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct AdminUserRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = admin_users)]
pub(crate) struct NewAdminUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub created_at: NaiveDateTime,
}
