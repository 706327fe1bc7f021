//! Application settings loaded via OrthoConfig.
//!
//! Every field can be set through `GAMICS_*` environment variables, a
//! configuration file or command-line flags. Session cookie toggles are read
//! separately by [`crate::inbound::http::session_config`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::BootstrapAdmin;
use crate::inbound::http::game_form::{DEFAULT_MAX_UPLOAD_BYTES, UploadLimits};
use crate::inbound::http::session_config::BuildMode;

const DEV_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_PATH: &str = "gamics.db";
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Runtime configuration for the catalog server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GAMICS")]
pub struct AppSettings {
    /// Interface the HTTP server binds to.
    pub bind_host: Option<String>,
    /// TCP port the HTTP server listens on.
    pub port: Option<u16>,
    /// SQLite database file.
    pub database_path: Option<PathBuf>,
    /// Directory holding uploaded game images.
    pub uploads_dir: Option<PathBuf>,
    /// Largest accepted image upload in bytes.
    pub max_upload_bytes: Option<usize>,
    /// Seed empty tables with the default catalog on startup.
    pub seed_defaults: Option<bool>,
    /// Username of the bootstrap admin account.
    pub admin_username: Option<String>,
    /// Password of the bootstrap admin account.
    pub admin_password: Option<String>,
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind host `{host}`: {message}")]
    InvalidBindHost { host: String, message: String },
    #[error("GAMICS_ADMIN_PASSWORD must be set in release builds")]
    MissingAdminPassword,
    #[error("GAMICS_ADMIN_USERNAME must not be empty")]
    EmptyAdminUsername,
}

impl AppSettings {
    pub fn bind_host(&self) -> &str {
        self.bind_host.as_deref().unwrap_or(DEFAULT_BIND_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.uploads_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// Seeding is on unless explicitly disabled.
    pub fn seed_defaults(&self) -> bool {
        self.seed_defaults.unwrap_or(true)
    }

    pub fn admin_username(&self) -> &str {
        self.admin_username
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_USERNAME)
    }

    /// Socket address assembled from `bind_host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.bind_host().trim();
        let ip: IpAddr = if host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            host.parse().map_err(|err: std::net::AddrParseError| {
                SettingsError::InvalidBindHost {
                    host: host.to_owned(),
                    message: err.to_string(),
                }
            })?
        };
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Database URL understood by Diesel's SQLite backend.
    pub fn database_url(&self) -> String {
        self.database_path().to_string_lossy().into_owned()
    }

    pub fn upload_limits(&self) -> UploadLimits {
        UploadLimits::default().with_max_file_bytes(self.max_upload_bytes())
    }

    /// Credentials for the account seeded when no admin exists.
    ///
    /// Debug builds fall back to a well-known development password; release
    /// builds refuse to start without an explicit one.
    pub fn bootstrap_admin(&self, mode: BuildMode) -> Result<BootstrapAdmin, SettingsError> {
        let username = self.admin_username().trim();
        if username.is_empty() {
            return Err(SettingsError::EmptyAdminUsername);
        }
        let password = match self.admin_password.as_deref() {
            Some(password) if !password.is_empty() => password.to_owned(),
            _ if mode == BuildMode::Debug => {
                warn!(
                    username,
                    "GAMICS_ADMIN_PASSWORD not set; using the development password"
                );
                DEV_ADMIN_PASSWORD.to_owned()
            }
            _ => return Err(SettingsError::MissingAdminPassword),
        };
        Ok(BootstrapAdmin {
            username: username.to_owned(),
            password: Zeroizing::new(password),
        })
    }
}
