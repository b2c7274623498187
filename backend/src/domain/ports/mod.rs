//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`], [`UsersQuery`]) are
//! called by inbound adapters. Driven ports (`*Repository`,
//! [`PasswordHasher`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod asset_command;
mod asset_query;
mod asset_repository;
mod login_service;
mod password_hasher;
mod ticket_command;
mod ticket_query;
mod ticket_repository;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use asset_command::MockAssetCommand;
pub use asset_command::{AssetCommand, CreateAssetRequest};
#[cfg(test)]
pub use asset_query::MockAssetQuery;
pub use asset_query::{AssetQuery, ListAssetsRequest};
#[cfg(test)]
pub use asset_repository::MockAssetRepository;
pub use asset_repository::{AssetRepository, AssetRepositoryError};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use ticket_command::MockTicketCommand;
pub use ticket_command::{
    AssignTicketRequest, CreateTicketRequest, TicketCommand, UpdateTicketStatusRequest,
};
#[cfg(test)]
pub use ticket_query::MockTicketQuery;
pub use ticket_query::{ListTicketsRequest, TicketQuery};
#[cfg(test)]
pub use ticket_repository::MockTicketRepository;
pub use ticket_repository::{TicketRepository, TicketRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{AccountRecord, ProvisionOutcome, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
