//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

#[fixture]
fn full_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(err) => err,
    }
}

#[rstest]
fn release_valid_settings_succeed(full_key: NamedTempFile) {
    let settings = session_settings_from_env(&mock_env(release_vars(&full_key)), BuildMode::Release)
        .expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.ttl, Duration::hours(DEFAULT_TTL_HOURS));
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(full_key: NamedTempFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&full_key);
    vars.remove(missing);
    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sometimes")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
#[case(TTL_HOURS_ENV, "0")]
#[case(TTL_HOURS_ENV, "721")]
#[case(TTL_HOURS_ENV, "a day")]
fn release_rejects_invalid_values(
    full_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&full_key);
    vars.insert(name, value.to_owned());
    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_rejects_ephemeral_keys(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_missing_key_file(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars.insert(KEY_FILE_ENV, "/nonexistent/gamics/session_key".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = key_file(32);
    assert!(matches!(
        release_error(release_vars(&short)),
        SessionConfigError::KeyTooShort { length: 32, .. }
    ));
}

#[rstest]
fn release_rejects_insecure_same_site_none(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn explicit_ttl_is_honoured(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars.insert(TTL_HOURS_ENV, " 12 ".to_owned());
    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Release).expect("valid settings");
    assert_eq!(settings.ttl, Duration::hours(12));
}

#[rstest]
fn debug_defaults_allow_ephemeral_key() {
    let settings = session_settings_from_env(&mock_env(HashMap::new()), BuildMode::Debug)
        .expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
    assert_eq!(settings.ttl, Duration::hours(DEFAULT_TTL_HOURS));
}

#[rstest]
#[case(SAMESITE_ENV, "unexpected", SameSite::Lax)]
#[case(TTL_HOURS_ENV, "-3", SameSite::Strict)]
fn debug_falls_back_on_invalid_values(
    full_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &str,
    #[case] same_site: SameSite,
) {
    let mut vars = release_vars(&full_key);
    vars.insert(name, value.to_owned());
    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug fallback");
    assert_eq!(settings.same_site, same_site);
    assert_eq!(settings.ttl, Duration::hours(DEFAULT_TTL_HOURS));
}

#[rstest]
fn process_environment_feeds_release_settings(full_key: NamedTempFile) {
    let _guard = env_lock::lock_env([
        (
            KEY_FILE_ENV,
            Some(full_key.path().to_string_lossy().into_owned()),
        ),
        (COOKIE_SECURE_ENV, Some("1".to_owned())),
        (SAMESITE_ENV, Some("Strict".to_owned())),
        (ALLOW_EPHEMERAL_ENV, Some("0".to_owned())),
        (TTL_HOURS_ENV, Some("4".to_owned())),
    ]);

    let settings = session_settings_from_env(&mockable::DefaultEnv::new(), BuildMode::Release)
        .expect("settings from the process environment");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.ttl, Duration::hours(4));
}
