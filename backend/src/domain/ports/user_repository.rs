//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{PasswordHash, Role, User, UserCredentials, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Result of provisioning a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// No account existed; one was inserted.
    Created(UserId),
    /// The account existed; its role (and possibly hash) was refreshed.
    Updated(UserId),
}

impl ProvisionOutcome {
    /// Identifier of the provisioned account.
    #[must_use]
    pub const fn user_id(self) -> UserId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

/// Values written when provisioning an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    /// Unique login name.
    pub username: Username,
    /// Role enforced on the account.
    pub role: Role,
    /// Freshly computed hash.
    pub password_hash: PasswordHash,
    /// Whether an existing account's hash is replaced.
    pub overwrite_password: bool,
}

/// Storage operations over users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the identity and stored hash for a username.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// List users holding `role`, ordered by username.
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserPersistenceError>;

    /// Insert the account, or refresh role (and optionally hash) when present.
    async fn provision(
        &self,
        account: &AccountRecord,
    ) -> Result<ProvisionOutcome, UserPersistenceError>;
}
