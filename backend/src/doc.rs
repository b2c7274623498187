//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint, the JSON-RPC endpoint, the
//! health probes, and the inbound schema wrappers. Swagger UI serves it in
//! debug builds and `openapi-dump` prints it.

use crate::inbound::http::assets::{AssetResponse, CreateAssetBody};
use crate::inbound::http::rpc::{RpcFault, RpcFaultData, RpcRequestSchema, RpcResponse, RpcResult};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, RoleSchema, UserSchema};
use crate::inbound::http::tickets::{
    AssignBody, CreateTicketBody, MutationResponse, TicketDetailResponse, TicketSummaryResponse,
    UpdateStatusBody,
};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "ServiceDeskSession",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the service desk API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Service desk API",
        description = "Tickets, assets, and session-authenticated users for an IT service desk."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::list_technicians,
        crate::inbound::http::tickets::list_tickets,
        crate::inbound::http::tickets::create_ticket,
        crate::inbound::http::tickets::get_ticket,
        crate::inbound::http::tickets::update_ticket_status,
        crate::inbound::http::tickets::assign_ticket,
        crate::inbound::http::assets::list_assets,
        crate::inbound::http::assets::create_asset,
        crate::inbound::http::rpc::rpc,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        RoleSchema,
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        MutationResponse,
        TicketSummaryResponse,
        TicketDetailResponse,
        CreateTicketBody,
        UpdateStatusBody,
        AssignBody,
        AssetResponse,
        CreateAssetBody,
        RpcRequestSchema,
        RpcResponse,
        RpcResult,
        RpcFault,
        RpcFaultData,
    )),
    tags(
        (name = "users", description = "Login, logout, and user lookups"),
        (name = "tickets", description = "Support tickets"),
        (name = "assets", description = "Tracked hardware and software assets"),
        (name = "rpc", description = "JSON-RPC 2.0 access to tickets and assets"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
