//! Driven port for password hashing.
//!
//! The hashing scheme is opaque to the domain: services only ask for a hash
//! of a new password or whether a candidate matches a stored hash.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Computing a new hash failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hash and verify passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash suitable for storage.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against `stored`; a mismatch is `Ok(false)`.
    fn verify(&self, password: &str, stored: &PasswordHash) -> Result<bool, PasswordHashError>;
}
