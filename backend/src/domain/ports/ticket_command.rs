//! Driving port for ticket mutations.
//!
//! Requests carry raw caller input plus the acting user. Validation and the
//! role checks happen behind the port so every inbound surface applies the
//! same rules.

use async_trait::async_trait;

use crate::domain::{Error, TicketId, User};

/// Raw input for opening a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTicketRequest {
    /// Acting user; `None` when the caller is unauthenticated.
    pub actor: Option<User>,
    /// Title, 5–255 characters after trimming.
    pub title: String,
    /// Optional description, at most 5000 characters.
    pub description: Option<String>,
    /// Priority wire name.
    pub priority: String,
    /// Optional affected asset identifier; blank means none.
    pub asset_id: Option<String>,
}

/// Raw input for changing a ticket's status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTicketStatusRequest {
    /// Acting user; `None` when the caller is unauthenticated.
    pub actor: Option<User>,
    /// Target ticket identifier.
    pub ticket_id: String,
    /// Status wire name.
    pub status: String,
}

/// Raw input for assigning or unassigning a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignTicketRequest {
    /// Acting user; must hold the admin role.
    pub actor: Option<User>,
    /// Target ticket identifier.
    pub ticket_id: String,
    /// New assignee; `None` or blank clears the assignment.
    pub assigned_to: Option<String>,
}

/// Ticket use-cases that change state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketCommand: Send + Sync {
    /// Open a ticket in the `open` state and return its identifier.
    async fn create(&self, request: CreateTicketRequest) -> Result<TicketId, Error>;

    /// Change a ticket's status. Unknown tickets are a successful no-op.
    async fn update_status(&self, request: UpdateTicketStatusRequest) -> Result<(), Error>;

    /// Change a ticket's assignee. Admin only; unknown tickets are a no-op.
    async fn assign(&self, request: AssignTicketRequest) -> Result<(), Error>;
}
