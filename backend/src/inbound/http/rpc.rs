//! JSON-RPC 2.0 endpoint over the ticket and asset ports.
//!
//! ```text
//! POST /api/v1/rpc {"jsonrpc":"2.0","method":"ticket.list","params":{},"id":1}
//! ```
//!
//! Every reply is HTTP 200. The envelope is checked before the session, so
//! malformed requests never reveal whether a caller is signed in. Methods
//! are decoded into [`RpcCall`] and dispatched through a single match.

use actix_web::{HttpResponse, Resource, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::domain::ports::{
    AssignTicketRequest, CreateAssetRequest, CreateTicketRequest, ListAssetsRequest,
    ListTicketsRequest, UpdateTicketStatusRequest,
};
use crate::domain::{Error, ErrorCode, TicketPriority, User};
use crate::inbound::http::assets::AssetResponse;
use crate::inbound::http::error::redact_if_internal;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tickets::{MutationResponse, TicketSummaryResponse};
use crate::inbound::http::validation::raw_from_value;

/// Protocol version accepted and echoed.
pub const JSONRPC_VERSION: &str = "2.0";

/// Malformed envelope.
pub const INVALID_REQUEST: i64 = -32600;
/// Method name not in the table.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Required parameter absent.
pub const INVALID_PARAMS: i64 = -32602;
/// Domain failure while executing the call.
pub const INTERNAL_ERROR: i64 = -32603;
/// No signed-in user.
pub const AUTHENTICATION_REQUIRED: i64 = -32001;

/// Domain context attached to `-32603` faults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RpcFaultData {
    #[schema(value_type = String, example = "invalid_input")]
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RpcFault {
    #[schema(example = -32600)]
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RpcFaultData>,
}

impl RpcFault {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    fn invalid_request() -> Self {
        Self::new(INVALID_REQUEST, "Invalid Request")
    }

    fn authentication_required() -> Self {
        Self::new(AUTHENTICATION_REQUIRED, "Authentication required.")
    }

    fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method '{method}' not found"))
    }

    fn invalid_params(message: &'static str) -> Self {
        Self::new(INVALID_PARAMS, message)
    }
}

impl From<Error> for RpcFault {
    fn from(error: Error) -> Self {
        let safe = redact_if_internal(&error);
        Self {
            code: INTERNAL_ERROR,
            message: safe.message().to_owned(),
            data: Some(RpcFaultData {
                code: safe.code(),
                details: safe.details().cloned(),
            }),
        }
    }
}

/// Successful call results.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RpcResult {
    Tickets(Vec<TicketSummaryResponse>),
    Assets(Vec<AssetResponse>),
    Mutation(MutationResponse),
}

/// Response envelope; exactly one of `result` and `error` is present.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RpcResponse {
    #[schema(value_type = String, example = "2.0")]
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RpcResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcFault>,
    #[schema(value_type = Option<Object>)]
    pub id: Value,
}

impl RpcResponse {
    fn success(result: RpcResult, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(error: RpcFault, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: None,
            error: Some(error),
            id,
        }
    }

    fn into_http(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

/// Request envelope as documented in OpenAPI.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RpcRequestSchema {
    #[schema(example = "2.0")]
    pub jsonrpc: String,
    #[schema(example = "ticket.list")]
    pub method: String,
    #[schema(value_type = Option<Object>)]
    pub params: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub id: Option<Value>,
}

#[derive(Debug)]
struct Envelope {
    method: String,
    params: Map<String, Value>,
    id: Value,
}

impl Envelope {
    fn parse(body: &[u8]) -> Result<Self, RpcResponse> {
        let invalid = |id: Value| RpcResponse::failure(RpcFault::invalid_request(), id);
        let Ok(Value::Object(mut object)) = serde_json::from_slice::<Value>(body) else {
            return Err(invalid(Value::Null));
        };
        if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err(invalid(Value::Null));
        }
        let id = object.remove("id").unwrap_or(Value::Null);
        let method = match object.remove("method") {
            Some(Value::String(method)) if !method.is_empty() => method,
            _ => return Err(invalid(id)),
        };
        let params = match object.remove("params") {
            Some(Value::Object(params)) => params,
            _ => Map::new(),
        };
        Ok(Self { method, params, id })
    }
}

/// Decoded method call with its raw parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcCall {
    TicketList(ListTicketsRequest),
    TicketCreate {
        title: String,
        description: Option<String>,
        priority: String,
        asset_id: Option<String>,
    },
    TicketUpdateStatus {
        ticket_id: String,
        status: String,
    },
    TicketAssign {
        ticket_id: String,
        assigned_to: Option<String>,
    },
    AssetList(ListAssetsRequest),
    AssetCreate {
        name: String,
        asset_type: String,
        serial_number: Option<String>,
        location: Option<String>,
    },
}

fn param(params: &Map<String, Value>, key: &str) -> Option<String> {
    params.get(key).and_then(raw_from_value)
}

impl RpcCall {
    /// Decode `method` and `params`.
    ///
    /// # Errors
    ///
    /// Fails `-32601` for unknown methods and `-32602` when a required
    /// parameter is absent or `null`.
    pub fn decode(method: &str, params: &Map<String, Value>) -> Result<Self, RpcFault> {
        match method {
            "ticket.list" => Ok(Self::TicketList(ListTicketsRequest {
                status: param(params, "status"),
                assigned_to: param(params, "assigned_to"),
            })),
            "ticket.create" => Ok(Self::TicketCreate {
                title: param(params, "title").unwrap_or_default(),
                description: param(params, "description"),
                priority: param(params, "priority")
                    .unwrap_or_else(|| TicketPriority::Medium.as_str().to_owned()),
                asset_id: param(params, "asset_id"),
            }),
            "ticket.updateStatus" => {
                match (param(params, "ticket_id"), param(params, "status")) {
                    (Some(ticket_id), Some(status)) => {
                        Ok(Self::TicketUpdateStatus { ticket_id, status })
                    }
                    _ => Err(RpcFault::invalid_params(
                        "Missing required params: ticket_id, status",
                    )),
                }
            }
            "ticket.assign" => {
                let ticket_id = param(params, "ticket_id").ok_or_else(|| {
                    RpcFault::invalid_params("Missing required param: ticket_id")
                })?;
                let assigned_to = param(params, "assigned_to").filter(|raw| !raw.is_empty());
                Ok(Self::TicketAssign {
                    ticket_id,
                    assigned_to,
                })
            }
            "asset.list" => Ok(Self::AssetList(ListAssetsRequest {
                status: param(params, "status"),
            })),
            "asset.create" => match (param(params, "name"), param(params, "asset_type")) {
                (Some(name), Some(asset_type)) => Ok(Self::AssetCreate {
                    name,
                    asset_type,
                    serial_number: param(params, "serial_number"),
                    location: param(params, "location"),
                }),
                _ => Err(RpcFault::invalid_params(
                    "Missing required params: name, asset_type",
                )),
            },
            other => Err(RpcFault::method_not_found(other)),
        }
    }

    async fn execute(self, state: &HttpState, actor: User) -> Result<RpcResult, Error> {
        match self {
            Self::TicketList(request) => {
                let tickets = state.tickets_query.list(&actor, request).await?;
                Ok(RpcResult::Tickets(
                    tickets.into_iter().map(Into::into).collect(),
                ))
            }
            Self::TicketCreate {
                title,
                description,
                priority,
                asset_id,
            } => {
                let id = state
                    .tickets
                    .create(CreateTicketRequest {
                        actor: Some(actor),
                        title,
                        description,
                        priority,
                        asset_id,
                    })
                    .await?;
                Ok(RpcResult::Mutation(MutationResponse::created(id.get())))
            }
            Self::TicketUpdateStatus { ticket_id, status } => {
                state
                    .tickets
                    .update_status(UpdateTicketStatusRequest {
                        actor: Some(actor),
                        ticket_id,
                        status,
                    })
                    .await?;
                Ok(RpcResult::Mutation(MutationResponse::ok()))
            }
            Self::TicketAssign {
                ticket_id,
                assigned_to,
            } => {
                state
                    .tickets
                    .assign(AssignTicketRequest {
                        actor: Some(actor),
                        ticket_id,
                        assigned_to,
                    })
                    .await?;
                Ok(RpcResult::Mutation(MutationResponse::ok()))
            }
            Self::AssetList(request) => {
                let assets = state.assets_query.list(&actor, request).await?;
                Ok(RpcResult::Assets(assets.into_iter().map(Into::into).collect()))
            }
            Self::AssetCreate {
                name,
                asset_type,
                serial_number,
                location,
            } => {
                let id = state
                    .assets
                    .create(CreateAssetRequest {
                        actor: Some(actor),
                        name,
                        asset_type,
                        serial_number,
                        location,
                    })
                    .await?;
                Ok(RpcResult::Mutation(MutationResponse::created(id.get())))
            }
        }
    }
}

async fn handle(state: &HttpState, session: &SessionContext, body: &[u8]) -> RpcResponse {
    let envelope = match Envelope::parse(body) {
        Ok(envelope) => envelope,
        Err(response) => {
            debug!("rejected malformed rpc envelope");
            return response;
        }
    };
    let Envelope { method, params, id } = envelope;

    let actor = match session.current_user() {
        Ok(Some(actor)) => actor,
        Ok(None) => return RpcResponse::failure(RpcFault::authentication_required(), id),
        Err(err) => return RpcResponse::failure(err.into(), id),
    };

    let call = match RpcCall::decode(&method, &params) {
        Ok(call) => call,
        Err(fault) => {
            debug!(%method, code = fault.code, "rpc call rejected");
            return RpcResponse::failure(fault, id);
        }
    };

    debug!(%method, actor = %actor.id(), "dispatching rpc call");
    match call.execute(state, actor).await {
        Ok(result) => RpcResponse::success(result, id),
        Err(err) => {
            warn!(%method, code = ?err.code(), "rpc call failed");
            RpcResponse::failure(err.into(), id)
        }
    }
}

/// JSON-RPC 2.0 dispatcher for ticket and asset methods.
///
/// Methods: `ticket.list`, `ticket.create`, `ticket.updateStatus`,
/// `ticket.assign`, `asset.list`, and `asset.create`.
#[utoipa::path(
    post,
    path = "/api/v1/rpc",
    request_body = RpcRequestSchema,
    responses(
        (status = 200, description = "JSON-RPC result or error envelope", body = RpcResponse)
    ),
    tags = ["rpc"],
    operation_id = "rpc"
)]
pub async fn rpc(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> HttpResponse {
    handle(&state, &session, &body).await.into_http()
}

async fn rpc_wrong_method() -> HttpResponse {
    RpcResponse::failure(RpcFault::invalid_request(), Value::Null).into_http()
}

/// `/rpc` resource: POST dispatches, every other method is an invalid
/// request.
pub fn rpc_resource() -> Resource {
    web::resource("/rpc")
        .route(web::post().to(rpc))
        .default_service(web::to(rpc_wrong_method))
}

#[cfg(test)]
#[path = "rpc_tests.rs"]
mod tests;
