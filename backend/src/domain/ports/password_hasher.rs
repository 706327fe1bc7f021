//! Port abstraction for password hashing.
use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Deriving a new hash failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        Malformed { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Produces and checks PHC-formatted password hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` under a freshly generated salt.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Returns `Ok(false)` for a well-formed hash that does not match.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
