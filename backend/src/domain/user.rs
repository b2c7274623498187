//! User identity and credential records.
//!
//! A [`User`] is the identity attached to every service call. It carries the
//! role used for authorization checks and is what the session cookie stores
//! after login.

use std::fmt;

use zeroize::Zeroizing;

use super::record_id::define_record_id;
use super::validation::{ValidationFailure, validate_string};
use super::wire_enum::define_wire_enum;

define_record_id! {
    /// Stable identifier of a persisted user.
    UserId
}

define_wire_enum! {
    /// Authorization role held by a user.
    pub enum Role {
        /// Full access including assignment and asset management.
        Admin => "admin",
        /// Technician working tickets.
        Tech => "tech",
    }
}

impl Role {
    /// Whether this role may perform admin-only operations.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 1;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 255;

/// Validated login name, unique across users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    ///
    /// # Examples
    /// ```
    /// use service_desk::domain::Username;
    ///
    /// let name = Username::new("  tech1 ").expect("valid username");
    /// assert_eq!(name.as_ref(), "tech1");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationFailure> {
        validate_string(raw.as_ref(), USERNAME_MIN, USERNAME_MAX).map(Self)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValidationFailure;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authenticated identity passed explicitly into service operations.
///
/// # Examples
/// ```
/// use service_desk::domain::{Role, User, UserId, Username};
///
/// let user = User::new(
///     UserId::new(1).expect("positive id"),
///     Username::new("admin").expect("valid username"),
///     Role::Admin,
/// );
/// assert!(user.role().is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    role: Role,
}

impl User {
    /// Build a user from validated components.
    #[must_use]
    pub const fn new(id: UserId, username: Username, role: Role) -> Self {
        Self { id, username, role }
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Authorization role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether the user holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Opaque stored password hash.
///
/// The format belongs to the configured
/// [`PasswordHasher`](crate::domain::ports::PasswordHasher).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a stored hash string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the stored representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}

/// User plus stored hash, as loaded for credential checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// Identity returned after a successful check.
    pub user: User,
    /// Hash the supplied password is verified against.
    pub password_hash: PasswordHash,
}

/// Account that provisioning should create or refresh.
#[derive(Clone)]
pub struct AccountSpec {
    /// Login name.
    pub username: Username,
    /// Role to enforce on the account.
    pub role: Role,
    /// Plain-text password hashed before it reaches storage.
    pub password: Zeroizing<String>,
}

impl fmt::Debug for AccountSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountSpec")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
