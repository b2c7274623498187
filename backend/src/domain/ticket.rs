//! Support ticket entity and its read models.
//!
//! Status accepts any enumerated value from any other; there is no
//! transition graph.

use chrono::{DateTime, Utc};

use super::asset::AssetId;
use super::record_id::define_record_id;
use super::user::UserId;
use super::wire_enum::define_wire_enum;

/// Minimum title length accepted when a ticket is created.
pub const TICKET_TITLE_MIN: usize = 5;
/// Maximum title length.
pub const TICKET_TITLE_MAX: usize = 255;
/// Maximum description length.
pub const TICKET_DESCRIPTION_MAX: usize = 5000;

define_record_id! {
    /// Stable identifier of a ticket.
    TicketId
}

define_wire_enum! {
    /// Urgency assigned by the reporter.
    pub enum TicketPriority {
        /// Can wait.
        Low => "low",
        /// Default urgency.
        Medium => "medium",
        /// Needs attention soon.
        High => "high",
        /// Service is down.
        Critical => "critical",
    }
}

define_wire_enum! {
    /// Workflow state of a ticket.
    pub enum TicketStatus {
        /// Newly reported.
        Open => "open",
        /// Being worked on.
        InProgress => "in_progress",
        /// Fix applied, awaiting confirmation.
        Resolved => "resolved",
        /// Done.
        Closed => "closed",
    }
}

/// Values required to insert a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    /// Trimmed title, 5–255 characters.
    pub title: String,
    /// Trimmed description, possibly empty.
    pub description: String,
    /// Reporter-chosen priority.
    pub priority: TicketPriority,
    /// Always [`TicketStatus::Open`] for new tickets.
    pub status: TicketStatus,
    /// Optional affected asset.
    pub asset_id: Option<AssetId>,
    /// Reporter.
    pub created_by: UserId,
    /// Creation time; also the initial `updated_at`.
    pub created_at: DateTime<Utc>,
}

/// Equality filters applied to the ticket list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketListFilter {
    /// Only tickets in this status.
    pub status: Option<TicketStatus>,
    /// Only tickets assigned to this user.
    pub assigned_to: Option<UserId>,
}

/// Row of the ticket list, joined with assignee and asset names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSummary {
    /// Ticket identifier.
    pub id: TicketId,
    /// Title.
    pub title: String,
    /// Priority.
    pub priority: TicketPriority,
    /// Status.
    pub status: TicketStatus,
    /// Assignee username, when assigned.
    pub assigned_to_name: Option<String>,
    /// Asset name, when linked.
    pub asset_name: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Full ticket record with the names of every referenced entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDetail {
    /// Ticket identifier.
    pub id: TicketId,
    /// Title.
    pub title: String,
    /// Description, possibly empty.
    pub description: String,
    /// Priority.
    pub priority: TicketPriority,
    /// Status.
    pub status: TicketStatus,
    /// Linked asset.
    pub asset_id: Option<AssetId>,
    /// Linked asset name.
    pub asset_name: Option<String>,
    /// Reporter.
    pub created_by: UserId,
    /// Reporter username.
    pub created_by_name: String,
    /// Assignee.
    pub assigned_to: Option<UserId>,
    /// Assignee username.
    pub assigned_to_name: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}
