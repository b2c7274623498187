//! Deterministic password hasher for tests.

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

const PREFIX: &str = "fixture$";

/// Stores passwords as `fixture$<password>` so tests stay fast.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixturePasswordHasher;

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("{PREFIX}{password}")))
    }

    fn verify(&self, password: &str, stored: &PasswordHash) -> Result<bool, PasswordHashError> {
        stored
            .as_str()
            .strip_prefix(PREFIX)
            .map(|expected| expected == password)
            .ok_or_else(|| PasswordHashError::malformed_hash("missing fixture prefix"))
    }
}
