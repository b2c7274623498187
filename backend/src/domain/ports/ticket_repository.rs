//! Driven port for ticket persistence.
//!
//! Writes are single auto-committed statements. Updates report the number of
//! affected rows so services can tell a no-op from a change without an extra
//! lookup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    NewTicket, TicketDetail, TicketId, TicketListFilter, TicketStatus, TicketSummary, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ticket repository adapters.
    pub enum TicketRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ticket repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ticket repository query failed: {message}",
    }
}

/// Storage operations over tickets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert a ticket and return its assigned identifier.
    async fn insert(&self, ticket: &NewTicket) -> Result<TicketId, TicketRepositoryError>;

    /// Set the status and refresh `updated_at`; returns affected rows.
    async fn update_status(
        &self,
        id: TicketId,
        status: TicketStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, TicketRepositoryError>;

    /// Set or clear the assignee and refresh `updated_at`; returns affected rows.
    async fn update_assignee(
        &self,
        id: TicketId,
        assigned_to: Option<UserId>,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, TicketRepositoryError>;

    /// List tickets newest first, applying the equality filters.
    async fn list(
        &self,
        filter: &TicketListFilter,
    ) -> Result<Vec<TicketSummary>, TicketRepositoryError>;

    /// Load one ticket with the names of its creator, assignee, and asset.
    async fn find_detail(&self, id: TicketId)
    -> Result<Option<TicketDetail>, TicketRepositoryError>;
}
