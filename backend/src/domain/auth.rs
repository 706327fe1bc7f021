//! Admin accounts, login input and the signed-in identity.

use std::fmt;

use zeroize::Zeroizing;

/// Why a login form was rejected before any lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Username and password as typed into the admin login form.
///
/// The username is trimmed; the password is kept byte for byte and wiped on
/// drop.
///
/// # Examples
/// ```
/// use gamics::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "admin123").expect("valid");
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        match (username.trim(), password) {
            ("", _) => Err(LoginValidationError::EmptyUsername),
            (_, "") => Err(LoginValidationError::EmptyPassword),
            (username, password) => Ok(Self {
                username: username.to_owned(),
                password: Zeroizing::new(password.to_owned()),
            }),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Row id of an admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AdminId(i32);

impl AdminId {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Who the current session belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    id: AdminId,
    username: String,
}

impl AdminIdentity {
    pub fn new(id: AdminId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    pub fn id(&self) -> AdminId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// An admin account row with its stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub id: AdminId,
    pub username: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("admin", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn debug_output_hides_the_password() {
        let creds = LoginCredentials::try_from_parts("admin", "hunter2").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }

    #[rstest]
    #[case("  admin  ", "admin123")]
    #[case("editor", " spaced password ")]
    fn valid_credentials_trim_username_only(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("valid inputs");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }
}
