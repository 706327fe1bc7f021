//! Backend entry-point: loads settings, migrates and seeds the database, then
//! serves the catalog API.

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gamics::domain::CatalogSeeder;
use gamics::inbound::http::health::HealthState;
use gamics::inbound::http::session_config::fingerprint::key_fingerprint;
use gamics::inbound::http::session_config::{BuildMode, session_settings_from_env};
use gamics::outbound::persistence::{
    DbPool, DieselAdminRepository, DieselGameRepository, DieselSiteContentRepository, PoolConfig,
    run_pending_migrations,
};
use gamics::outbound::security::Argon2PasswordHasher;
use gamics::server::{ServerConfig, create_server};
use gamics::settings::AppSettings;

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

async fn seed_defaults(
    pool: &DbPool,
    settings: &AppSettings,
    mode: BuildMode,
) -> std::io::Result<()> {
    let admin = settings
        .bootstrap_admin(mode)
        .map_err(|err| io_error("bootstrap admin", err))?;
    let seeder = CatalogSeeder::new(
        Arc::new(DieselGameRepository::new(pool.clone())),
        Arc::new(DieselSiteContentRepository::new(pool.clone())),
        Arc::new(DieselAdminRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(DefaultClock),
    );
    seeder
        .seed(Some(&admin))
        .await
        .map_err(|err| io_error("seeding failed", err))?;
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io_error("failed to load settings", err))?;
    let mode = BuildMode::from_debug_assertions();
    let session = session_settings_from_env(&DefaultEnv::new(), mode)
        .map_err(|err| io_error("invalid session configuration", err))?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        same_site = ?session.same_site,
        ttl_hours = session.ttl.whole_hours(),
        "session settings loaded"
    );

    let database_url = settings.database_url();
    let applied = run_pending_migrations(&database_url)
        .await
        .map_err(|err| io_error("migrations failed", err))?;
    info!(database = %database_url, applied, "database ready");

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| io_error("database pool", err))?;

    if settings.seed_defaults() {
        seed_defaults(&pool, &settings, mode).await?;
    }

    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io_error("invalid bind address", err))?;
    let config = ServerConfig::new(session, bind_addr, pool, settings.uploads_dir())
        .with_upload_limits(settings.upload_limits());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
