//! Domain primitives, services, and ports.
//!
//! Purpose: define the service-desk entities (users, tickets, assets), the
//! validation rules applied to raw caller input, and the services that
//! enforce authorization before touching persistence. Everything here is
//! transport agnostic; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: typed failures shared by every adapter.
//! - [`TicketService`], [`AssetService`]: the ticket and asset use-cases.
//! - [`PasswordLoginService`], [`UserDirectory`], [`UserProvisioner`]:
//!   authentication, user lookups, and account seeding.
//! - [`ports`]: driving and driven port traits.

pub mod asset;
pub mod asset_service;
pub mod auth;
pub mod auth_service;
pub mod error;
pub mod ports;
mod record_id;
pub mod service_support;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod ticket;
pub mod ticket_service;
pub mod trace_id;
pub mod user;
pub mod user_directory;
pub mod user_provisioning;
pub mod validation;
mod wire_enum;

pub use self::asset::{
    ASSET_NAME_MAX, ASSET_NAME_MIN, ASSET_OPTIONAL_FIELD_MAX, ASSET_OPTIONAL_FIELD_MIN,
    ASSET_TYPE_MAX, ASSET_TYPE_MIN, Asset, AssetId, AssetListFilter, AssetStatus, NewAsset,
};
pub use self::asset_service::AssetService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::auth_service::PasswordLoginService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::record_id::{NonPositiveId, RecordIdParseError};
pub use self::ticket::{
    NewTicket, TICKET_DESCRIPTION_MAX, TICKET_TITLE_MAX, TICKET_TITLE_MIN, TicketDetail,
    TicketId, TicketListFilter, TicketPriority, TicketStatus, TicketSummary,
};
pub use self::ticket_service::TicketService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AccountSpec, PasswordHash, Role, USERNAME_MAX, USERNAME_MIN, User, UserCredentials, UserId,
    Username,
};
pub use self::user_directory::UserDirectory;
pub use self::user_provisioning::{
    DEFAULT_ADMIN_USERNAME, DEFAULT_TECH_USERNAME, ProvisionReport, SeedAccounts,
    UserProvisioner,
};
pub use self::validation::ValidationFailure;

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use service_desk::domain::{DomainResult, Error};
///
/// fn deny() -> DomainResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(deny().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
