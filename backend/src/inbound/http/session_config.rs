//! Cookie settings for the admin session.
//!
//! | Variable                  | Meaning                                  |
//! |---------------------------|------------------------------------------|
//! | `SESSION_KEY_FILE`        | key material, at least 64 bytes          |
//! | `SESSION_COOKIE_SECURE`   | mark the cookie `Secure`                 |
//! | `SESSION_SAMESITE`        | `Strict`, `Lax` or `None`                |
//! | `SESSION_ALLOW_EPHEMERAL` | permit a generated key (debug only)      |
//! | `SESSION_TTL_HOURS`       | cookie lifetime, 1 to 720, default 24    |
//!
//! Release builds insist on every toggle but the TTL; debug builds fall back
//! to defaults with a warning.

pub mod fingerprint;
mod parsing;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use std::path::PathBuf;
use tracing::warn;
use zeroize::Zeroizing;

use parsing::EnvReader;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/gamics_session_key";
pub(crate) const SESSION_KEY_MIN_LEN: usize = 64;
pub(crate) const DEFAULT_TTL_HOURS: i64 = 24;
pub(crate) const MAX_TTL_HOURS: i64 = 24 * 30;
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const TTL_HOURS_ENV: &str = "SESSION_TTL_HOURS";

/// How strictly configuration is checked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// `Debug` when compiled with debug assertions.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Resolved cookie settings for the session middleware.
#[derive(Clone)]
pub struct SessionSettings {
    /// Encrypts the private `session` cookie.
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    /// Max-Age of the persistent cookie.
    pub ttl: Duration,
}

/// Why the session settings could not be built.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("{name} must be set")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("cannot read session key {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key {path} holds {length} bytes; at least {min_len} required")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("generated session keys are refused in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// `SESSION_TTL_HOURS` is optional in every mode and defaults to 24 hours.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let reader = EnvReader::new(env, mode);
    let cookie_secure = reader.flag(COOKIE_SECURE_ENV, true)?;
    let default_same_site = match mode {
        BuildMode::Debug => SameSite::Lax,
        BuildMode::Release => SameSite::Strict,
    };
    let same_site = reader.same_site(SAMESITE_ENV, default_same_site, cookie_secure)?;
    let allow_ephemeral = reader.flag(ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let ttl_hours = reader.ttl_hours(TTL_HOURS_ENV)?;
    let key = load_key(&reader, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl: Duration::hours(ttl_hours),
    })
}

/// Read the cookie key file; the raw bytes are wiped once the key is derived.
fn load_key<E: Env>(
    reader: &EnvReader<'_, E>,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = reader
        .raw(KEY_FILE_ENV)
        .map_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH), PathBuf::from);

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(source) if reader.mode().is_debug() || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "session key unreadable; generating a throwaway key");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    let length = bytes.len();
    if reader.mode() == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
        return Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    Ok(Key::derive_from(&bytes))
}

#[cfg(test)]
mod tests;
