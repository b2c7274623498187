//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to fetch assignment candidates without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Technicians a ticket can be assigned to. Admin only.
    async fn list_technicians(&self, actor: &User) -> Result<Vec<User>, Error>;
}
