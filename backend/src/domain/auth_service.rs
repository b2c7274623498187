//! Password login backed by the user repository and a password hasher.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{LoginService, PasswordHasher, UserRepository};
use super::service_support::persistence_failure;
use super::{Error, LoginCredentials, User};

const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// [`LoginService`] that checks a stored password hash.
#[derive(Clone)]
pub struct PasswordLoginService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> PasswordLoginService<U, H> {
    /// Create a login service from its collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> LoginService for PasswordLoginService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let record = self
            .users
            .find_credentials(credentials.username())
            .await
            .map_err(|err| persistence_failure("load credentials", &err))?;

        let Some(record) = record else {
            info!("login rejected: unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &record.password_hash)
            .map_err(|err| {
                warn!(user_id = %record.user.id(), error = %err, "password verification failed");
                Error::internal("credential check failed")
            })?;
        if !matches {
            info!(user_id = %record.user.id(), "login rejected: wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %record.user.id(), role = %record.user.role(), "login succeeded");
        Ok(record.user)
    }
}
