//! Typed reads of the `SESSION_*` variables.
//!
//! Debug builds tolerate absent or malformed values: the problem is logged and
//! a default is used. Release builds turn the same problem into an error.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, DEFAULT_TTL_HOURS, MAX_TTL_HOURS, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const TTL_EXPECTED: &str = "a whole number of hours between 1 and 720";

/// Environment view bound to one build mode.
pub(super) struct EnvReader<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<'a, E: Env> EnvReader<'a, E> {
    pub(super) fn new(env: &'a E, mode: BuildMode) -> Self {
        Self { env, mode }
    }

    pub(super) fn mode(&self) -> BuildMode {
        self.mode
    }

    pub(super) fn raw(&self, name: &str) -> Option<String> {
        self.env.string(name)
    }

    /// Use `fallback` in debug builds, fail with `problem` otherwise.
    pub(super) fn tolerate<T: std::fmt::Debug>(
        &self,
        fallback: T,
        problem: SessionConfigError,
    ) -> Result<T, SessionConfigError> {
        if self.mode.is_debug() {
            warn!(problem = %problem, fallback = ?fallback, "session setting defaulted");
            Ok(fallback)
        } else {
            Err(problem)
        }
    }

    /// Required boolean toggle.
    pub(super) fn flag(&self, name: &'static str, default: bool) -> Result<bool, SessionConfigError> {
        let Some(value) = self.raw(name) else {
            return self.tolerate(default, SessionConfigError::MissingEnv { name });
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" => Ok(true),
            "0" | "false" | "no" | "n" => Ok(false),
            _ => self.tolerate(default, invalid(name, value, BOOL_EXPECTED)),
        }
    }

    /// Required `SameSite` policy. `None` needs a secure cookie.
    pub(super) fn same_site(
        &self,
        name: &'static str,
        default: SameSite,
        cookie_secure: bool,
    ) -> Result<SameSite, SessionConfigError> {
        let Some(value) = self.raw(name) else {
            return self.tolerate(default, SessionConfigError::MissingEnv { name });
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" if cookie_secure => Ok(SameSite::None),
            "none" => self.tolerate(SameSite::None, SessionConfigError::InsecureSameSiteNone),
            _ => self.tolerate(default, invalid(name, value, SAMESITE_EXPECTED)),
        }
    }

    /// Optional session lifetime in hours; absent means the default.
    pub(super) fn ttl_hours(&self, name: &'static str) -> Result<i64, SessionConfigError> {
        let Some(value) = self.raw(name) else {
            return Ok(DEFAULT_TTL_HOURS);
        };
        match value.trim().parse::<i64>() {
            Ok(hours) if (1..=MAX_TTL_HOURS).contains(&hours) => Ok(hours),
            _ => self.tolerate(DEFAULT_TTL_HOURS, invalid(name, value, TTL_EXPECTED)),
        }
    }
}

fn invalid(name: &'static str, value: String, expected: &'static str) -> SessionConfigError {
    SessionConfigError::InvalidEnv {
        name,
        value,
        expected,
    }
}
