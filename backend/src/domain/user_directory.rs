//! Read-only user lookups exposed to inbound adapters.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ports::{UserRepository, UsersQuery};
use super::service_support::persistence_failure;
use super::{Error, Role, User};

/// [`UsersQuery`] backed by the user repository.
#[derive(Clone)]
pub struct UserDirectory<U> {
    users: Arc<U>,
}

impl<U> UserDirectory<U> {
    /// Create a directory over `users`.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UsersQuery for UserDirectory<U>
where
    U: UserRepository,
{
    async fn list_technicians(&self, actor: &User) -> Result<Vec<User>, Error> {
        if !actor.is_admin() {
            return Err(Error::forbidden("Only admins can list technicians."));
        }
        let technicians = self
            .users
            .list_by_role(Role::Tech)
            .await
            .map_err(|err| persistence_failure("list technicians", &err))?;
        debug!(count = technicians.len(), "listed technicians");
        Ok(technicians)
    }
}
