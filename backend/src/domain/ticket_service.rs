//! Ticket domain service.
//!
//! Implements [`TicketCommand`] and [`TicketQuery`] over a
//! [`TicketRepository`]. Raw caller input is validated here, role checks run
//! before anything else is inspected, and store failures collapse into the
//! generic persistence error.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use super::ports::{
    AssignTicketRequest, CreateTicketRequest, ListTicketsRequest, TicketCommand, TicketQuery,
    TicketRepository, TicketRepositoryError, UpdateTicketStatusRequest,
};
use super::service_support::{invalid_field, persistence_failure, present};
use super::validation::{TEXT_MIN_LEN, validate_string, validate_text};
use super::{
    AssetId, Error, NewTicket, TICKET_DESCRIPTION_MAX, TICKET_TITLE_MAX, TICKET_TITLE_MIN,
    TicketDetail, TicketId, TicketListFilter, TicketPriority, TicketStatus, TicketSummary, User,
    UserId,
};

const CREATE_INVALID: &str = "Invalid input data.";
const UPDATE_INVALID: &str = "Invalid input.";
const INVALID_TICKET_ID: &str = "Invalid ticket ID.";
const ASSIGN_FORBIDDEN: &str = "Only admins can assign tickets.";
const TICKET_NOT_FOUND: &str = "Ticket not found.";

/// Ticket service implementing the ticket driving ports.
#[derive(Clone)]
pub struct TicketService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TicketService<R> {
    /// Create a new service over `repo`, stamping mutations with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> TicketService<R>
where
    R: TicketRepository,
{
    fn map_repository_error(operation: &'static str, error: &TicketRepositoryError) -> Error {
        match error {
            TicketRepositoryError::Connection { .. } => {
                persistence_failure(operation, &format!("ticket store unavailable: {error}"))
            }
            TicketRepositoryError::Query { .. } => persistence_failure(operation, error),
        }
    }

    fn new_ticket(&self, request: CreateTicketRequest) -> Result<NewTicket, Error> {
        let Some(actor) = request.actor else {
            return Err(invalid_field(CREATE_INVALID, "actor", "missing"));
        };
        let title = validate_string(&request.title, TICKET_TITLE_MIN, TICKET_TITLE_MAX)
            .map_err(|failure| invalid_field(CREATE_INVALID, "title", failure.code()))?;
        let description = validate_text(
            request.description.as_deref().unwrap_or_default(),
            TEXT_MIN_LEN,
            TICKET_DESCRIPTION_MAX,
        )
        .map_err(|failure| invalid_field(CREATE_INVALID, "description", failure.code()))?;
        let priority = TicketPriority::from_str(&request.priority)
            .map_err(|failure| invalid_field(CREATE_INVALID, "priority", failure.code()))?;
        let asset_id = AssetId::parse_reference(request.asset_id.as_deref())
            .map_err(|err| invalid_field(CREATE_INVALID, "asset_id", err.code()))?;

        Ok(NewTicket {
            title,
            description,
            priority,
            status: TicketStatus::Open,
            asset_id,
            created_by: actor.id(),
            created_at: self.clock.utc(),
        })
    }

    fn list_filter(request: &ListTicketsRequest) -> TicketListFilter {
        let status = request
            .status
            .as_deref()
            .and_then(|raw| match TicketStatus::from_str(raw) {
                Ok(status) => Some(status),
                Err(failure) => {
                    debug!(value = raw, reason = %failure, "ignoring status filter");
                    None
                }
            });
        let assigned_to = present(request.assigned_to.as_deref()).and_then(|raw| {
            match UserId::parse(raw) {
                Ok(id) => Some(id),
                Err(err) => {
                    debug!(value = raw, reason = %err, "ignoring assignee filter");
                    None
                }
            }
        });
        TicketListFilter {
            status,
            assigned_to,
        }
    }
}

#[async_trait]
impl<R> TicketCommand for TicketService<R>
where
    R: TicketRepository,
{
    async fn create(&self, request: CreateTicketRequest) -> Result<TicketId, Error> {
        let ticket = self.new_ticket(request)?;
        let id = self
            .repo
            .insert(&ticket)
            .await
            .map_err(|err| Self::map_repository_error("insert ticket", &err))?;
        info!(ticket_id = %id, created_by = %ticket.created_by, "ticket created");
        Ok(id)
    }

    async fn update_status(&self, request: UpdateTicketStatusRequest) -> Result<(), Error> {
        let Some(actor) = request.actor else {
            return Err(Error::unauthorized("login required"));
        };
        let id = TicketId::parse(&request.ticket_id)
            .map_err(|err| invalid_field(UPDATE_INVALID, "ticket_id", err.code()))?;
        let status = TicketStatus::from_str(&request.status)
            .map_err(|failure| invalid_field(UPDATE_INVALID, "status", failure.code()))?;

        let affected = self
            .repo
            .update_status(id, status, self.clock.utc())
            .await
            .map_err(|err| Self::map_repository_error("update ticket status", &err))?;
        if affected == 0 {
            debug!(ticket_id = %id, "status update matched no ticket");
        } else {
            info!(ticket_id = %id, %status, actor = %actor.id(), "ticket status updated");
        }
        Ok(())
    }

    async fn assign(&self, request: AssignTicketRequest) -> Result<(), Error> {
        let actor = match request.actor {
            Some(actor) if actor.is_admin() => actor,
            _ => return Err(Error::forbidden(ASSIGN_FORBIDDEN)),
        };
        let id = TicketId::parse(&request.ticket_id)
            .map_err(|err| invalid_field(INVALID_TICKET_ID, "ticket_id", err.code()))?;
        let assignee = UserId::parse_reference(request.assigned_to.as_deref())
            .map_err(|err| invalid_field(UPDATE_INVALID, "assigned_to", err.code()))?;

        let affected = self
            .repo
            .update_assignee(id, assignee, self.clock.utc())
            .await
            .map_err(|err| Self::map_repository_error("assign ticket", &err))?;
        if affected == 0 {
            debug!(ticket_id = %id, "assignment matched no ticket");
        } else {
            info!(
                ticket_id = %id,
                assigned_to = ?assignee.map(UserId::get),
                actor = %actor.id(),
                "ticket assignment updated"
            );
        }
        Ok(())
    }
}

#[async_trait]
impl<R> TicketQuery for TicketService<R>
where
    R: TicketRepository,
{
    async fn list(
        &self,
        actor: &User,
        request: ListTicketsRequest,
    ) -> Result<Vec<TicketSummary>, Error> {
        let filter = Self::list_filter(&request);
        debug!(actor = %actor.id(), ?filter, "listing tickets");
        self.repo
            .list(&filter)
            .await
            .map_err(|err| Self::map_repository_error("list tickets", &err))
    }

    async fn get(&self, actor: &User, ticket_id: &str) -> Result<TicketDetail, Error> {
        let id = TicketId::parse(ticket_id)
            .map_err(|err| invalid_field(INVALID_TICKET_ID, "ticket_id", err.code()))?;
        debug!(actor = %actor.id(), ticket_id = %id, "loading ticket");
        self.repo
            .find_detail(id)
            .await
            .map_err(|err| Self::map_repository_error("load ticket", &err))?
            .ok_or_else(|| {
                Error::not_found(TICKET_NOT_FOUND).with_details(json!({ "ticketId": id.get() }))
            })
    }
}

#[cfg(test)]
#[path = "ticket_service_tests.rs"]
mod tests;
