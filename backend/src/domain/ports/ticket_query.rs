//! Driving port for ticket reads.

use async_trait::async_trait;

use crate::domain::{Error, TicketDetail, TicketSummary, User};

/// Raw list filters; values that fail validation are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTicketsRequest {
    /// Status wire name.
    pub status: Option<String>,
    /// Assignee identifier.
    pub assigned_to: Option<String>,
}

/// Ticket use-cases that only read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketQuery: Send + Sync {
    /// List tickets newest first.
    async fn list(
        &self,
        actor: &User,
        request: ListTicketsRequest,
    ) -> Result<Vec<TicketSummary>, Error>;

    /// Load one ticket; fails `not_found` when it does not exist.
    async fn get(&self, actor: &User, ticket_id: &str) -> Result<TicketDetail, Error>;
}
