//! Provisioning of the default admin and technician accounts.
//!
//! Runs at startup when seeding is enabled and from the `provision-users`
//! binary. Existing accounts keep their password unless a reset is requested;
//! their role is always brought back in line.

use std::sync::Arc;

use tracing::info;
use zeroize::Zeroizing;

use super::ports::{AccountRecord, PasswordHasher, ProvisionOutcome, UserRepository};
use super::service_support::persistence_failure;
use super::{AccountSpec, Error, Role, Username};

/// Default admin login name.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Default technician login name.
pub const DEFAULT_TECH_USERNAME: &str = "tech1";

/// Passwords and policy for the default accounts.
#[derive(Clone)]
pub struct SeedAccounts {
    /// Password for [`DEFAULT_ADMIN_USERNAME`].
    pub admin_password: Zeroizing<String>,
    /// Password for [`DEFAULT_TECH_USERNAME`].
    pub tech_password: Zeroizing<String>,
    /// Replace the hash of accounts that already exist.
    pub reset_passwords: bool,
}

impl SeedAccounts {
    /// Expand into one spec per default account.
    pub fn accounts(&self) -> Result<Vec<AccountSpec>, Error> {
        let spec = |username: &str, role: Role, password: &Zeroizing<String>| {
            let username = Username::new(username)
                .map_err(|err| Error::internal(format!("invalid seed username: {err}")))?;
            Ok::<_, Error>(AccountSpec {
                username,
                role,
                password: password.clone(),
            })
        };
        Ok(vec![
            spec(DEFAULT_ADMIN_USERNAME, Role::Admin, &self.admin_password)?,
            spec(DEFAULT_TECH_USERNAME, Role::Tech, &self.tech_password)?,
        ])
    }
}

impl std::fmt::Debug for SeedAccounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAccounts")
            .field("reset_passwords", &self.reset_passwords)
            .finish_non_exhaustive()
    }
}

/// Per-account result of a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Login name.
    pub username: Username,
    /// Whether the account was created or refreshed.
    pub outcome: ProvisionOutcome,
}

/// Creates or refreshes accounts through the user repository.
#[derive(Clone)]
pub struct UserProvisioner<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserProvisioner<U, H> {
    /// Create a provisioner from its collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> UserProvisioner<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Ensure the default admin and technician accounts exist.
    pub async fn provision_defaults(
        &self,
        seed: &SeedAccounts,
    ) -> Result<Vec<ProvisionReport>, Error> {
        let mut reports = Vec::new();
        for account in seed.accounts()? {
            reports.push(self.provision(&account, seed.reset_passwords).await?);
        }
        Ok(reports)
    }

    /// Create or refresh one account.
    pub async fn provision(
        &self,
        account: &AccountSpec,
        overwrite_password: bool,
    ) -> Result<ProvisionReport, Error> {
        let password_hash = self
            .hasher
            .hash(account.password.as_str())
            .map_err(|err| Error::internal(format!("failed to hash password: {err}")))?;
        let record = AccountRecord {
            username: account.username.clone(),
            role: account.role,
            password_hash,
            overwrite_password,
        };
        let outcome = self
            .users
            .provision(&record)
            .await
            .map_err(|err| persistence_failure("provision user", &err))?;
        info!(
            username = %account.username,
            role = %account.role,
            user_id = %outcome.user_id(),
            ?outcome,
            "account provisioned"
        );
        Ok(ProvisionReport {
            username: account.username.clone(),
            outcome,
        })
    }
}
