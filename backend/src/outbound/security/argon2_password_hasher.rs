//! Argon2id implementation of the [`PasswordHasher`] port.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Hashes passwords into PHC strings with the crate's default Argon2id
/// parameters and a random salt.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let parsed =
            PasswordHash::new(hash).map_err(|err| PasswordHashError::malformed(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn verifies_its_own_hashes() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("admin123").expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("admin123", &hash).expect("verify"));
        assert!(!hasher.verify("admin124", &hash).expect("verify"));
    }

    #[rstest]
    fn salts_every_hash() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("same").expect("hash");
        let second = hasher.hash("same").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("")]
    #[case("plaintext")]
    fn malformed_hashes_are_errors(#[case] stored: &str) {
        let err = Argon2PasswordHasher::new()
            .verify("anything", stored)
            .expect_err("malformed hash");
        assert!(matches!(err, PasswordHashError::Malformed { .. }));
    }
}
