//! Ticket REST handlers.
//!
//! ```text
//! GET  /api/v1/tickets?status=open&assignedTo=2
//! POST /api/v1/tickets {"title":"Printer jam","priority":"high"}
//! GET  /api/v1/tickets/{id}
//! PUT  /api/v1/tickets/{id}/status {"status":"resolved"}
//! PUT  /api/v1/tickets/{id}/assignee {"assignedTo":2}
//! ```
//!
//! Handlers forward raw strings; the ticket service owns validation and
//! authorization.

use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    AssignTicketRequest, CreateTicketRequest, ListTicketsRequest, UpdateTicketStatusRequest,
};
use crate::domain::{TicketDetail, TicketPriority, TicketSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{raw_from_optional, raw_from_value};

/// Acknowledgement returned by mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MutationResponse {
    pub success: bool,
    /// Identifier of the created record, for create operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl MutationResponse {
    /// Acknowledge an update.
    pub const fn ok() -> Self {
        Self {
            success: true,
            id: None,
        }
    }

    /// Acknowledge a create with the new identifier.
    pub const fn created(id: i64) -> Self {
        Self {
            success: true,
            id: Some(id),
        }
    }
}

/// Ticket list row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummaryResponse {
    pub id: i64,
    pub title: String,
    #[schema(example = "high")]
    pub priority: String,
    #[schema(example = "in_progress")]
    pub status: String,
    pub assigned_to_name: Option<String>,
    pub asset_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TicketSummary> for TicketSummaryResponse {
    fn from(value: TicketSummary) -> Self {
        Self {
            id: value.id.get(),
            title: value.title,
            priority: value.priority.as_str().to_owned(),
            status: value.status.as_str().to_owned(),
            assigned_to_name: value.assigned_to_name,
            asset_name: value.asset_name,
            created_at: value.created_at,
        }
    }
}

/// Full ticket view.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetailResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub asset_id: Option<i64>,
    pub asset_name: Option<String>,
    pub created_by: i64,
    pub created_by_name: String,
    pub assigned_to: Option<i64>,
    pub assigned_to_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TicketDetail> for TicketDetailResponse {
    fn from(value: TicketDetail) -> Self {
        Self {
            id: value.id.get(),
            title: value.title,
            description: value.description,
            priority: value.priority.as_str().to_owned(),
            status: value.status.as_str().to_owned(),
            asset_id: value.asset_id.map(|id| id.get()),
            asset_name: value.asset_name,
            created_by: value.created_by.get(),
            created_by_name: value.created_by_name,
            assigned_to: value.assigned_to.map(|id| id.get()),
            assigned_to_name: value.assigned_to_name,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Query string for `GET /api/v1/tickets`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TicketListParams {
    /// Status filter; unknown values are ignored.
    pub status: Option<String>,
    /// Assignee user id filter; invalid values are ignored.
    pub assigned_to: Option<String>,
}

/// Body of `POST /api/v1/tickets`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketBody {
    #[serde(default)]
    #[schema(example = "Printer jam on floor 2")]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `medium`.
    pub priority: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub asset_id: Option<Value>,
}

/// Body of `PUT /api/v1/tickets/{id}/status`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateStatusBody {
    #[serde(default)]
    #[schema(example = "resolved")]
    pub status: String,
}

/// Body of `PUT /api/v1/tickets/{id}/assignee`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignBody {
    /// Technician id, or `null` to unassign.
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub assigned_to: Option<Value>,
}

/// List tickets, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    params(TicketListParams),
    responses(
        (status = 200, description = "Tickets", body = [TicketSummaryResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "listTickets"
)]
#[get("/tickets")]
pub async fn list_tickets(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<TicketListParams>,
) -> ApiResult<web::Json<Vec<TicketSummaryResponse>>> {
    let actor = session.require_user()?;
    let TicketListParams {
        status,
        assigned_to,
    } = params.into_inner();
    let tickets = state
        .tickets_query
        .list(&actor, ListTicketsRequest { status, assigned_to })
        .await?;
    Ok(web::Json(tickets.into_iter().map(Into::into).collect()))
}

/// Open a ticket on behalf of the session user.
#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    request_body = CreateTicketBody,
    responses(
        (status = 201, description = "Ticket created", body = MutationResponse),
        (status = 400, description = "Invalid input", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "createTicket"
)]
#[post("/tickets")]
pub async fn create_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTicketBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user()?;
    let body = payload.into_inner();
    let id = state
        .tickets
        .create(CreateTicketRequest {
            actor: Some(actor),
            title: body.title,
            description: body.description,
            priority: body
                .priority
                .unwrap_or_else(|| TicketPriority::Medium.as_str().to_owned()),
            asset_id: raw_from_optional(body.asset_id.as_ref()),
        })
        .await?;
    Ok(HttpResponse::Created().json(MutationResponse::created(id.get())))
}

/// Fetch one ticket with creator, assignee, and asset names.
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}",
    params(("id" = i64, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "Ticket", body = TicketDetailResponse),
        (status = 400, description = "Invalid ticket id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Ticket not found", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "getTicket"
)]
#[get("/tickets/{id}")]
pub async fn get_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TicketDetailResponse>> {
    let actor = session.require_user()?;
    let detail = state.tickets_query.get(&actor, &path).await?;
    Ok(web::Json(detail.into()))
}

/// Move a ticket to another status.
#[utoipa::path(
    put,
    path = "/api/v1/tickets/{id}/status",
    params(("id" = i64, Path, description = "Ticket id")),
    request_body = UpdateStatusBody,
    responses(
        (status = 200, description = "Status updated", body = MutationResponse),
        (status = 400, description = "Invalid input", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "updateTicketStatus"
)]
#[put("/tickets/{id}/status")]
pub async fn update_ticket_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusBody>,
) -> ApiResult<web::Json<MutationResponse>> {
    let actor = session.require_user()?;
    state
        .tickets
        .update_status(UpdateTicketStatusRequest {
            actor: Some(actor),
            ticket_id: path.into_inner(),
            status: payload.into_inner().status,
        })
        .await?;
    Ok(web::Json(MutationResponse::ok()))
}

/// Assign or unassign a ticket. Admin only.
#[utoipa::path(
    put,
    path = "/api/v1/tickets/{id}/assignee",
    params(("id" = i64, Path, description = "Ticket id")),
    request_body = AssignBody,
    responses(
        (status = 200, description = "Assignee updated", body = MutationResponse),
        (status = 400, description = "Invalid input", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "assignTicket"
)]
#[put("/tickets/{id}/assignee")]
pub async fn assign_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AssignBody>,
) -> ApiResult<web::Json<MutationResponse>> {
    let actor = session.require_user()?;
    state
        .tickets
        .assign(AssignTicketRequest {
            actor: Some(actor),
            ticket_id: path.into_inner(),
            assigned_to: payload.assigned_to.as_ref().and_then(raw_from_value),
        })
        .await?;
    Ok(web::Json(MutationResponse::ok()))
}

#[cfg(test)]
#[path = "tickets_tests.rs"]
mod tests;
