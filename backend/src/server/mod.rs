//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;

use std::sync::Arc;
use std::time::Duration;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::assets::{create_asset, list_assets};
use crate::inbound::http::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::rpc::rpc_resource;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tickets::{
    assign_ticket, create_ticket, get_ticket, list_tickets, update_ticket_status,
};
use crate::inbound::http::users::{current_user, list_technicians, login, logout};

/// Session cookie name used when none is configured.
pub const DEFAULT_SESSION_COOKIE: &str = "ServiceDeskSession";
/// Session lifetime used when none is configured.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

/// Cookie session parameters.
#[derive(Clone)]
pub struct SessionOptions {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    pub cookie_name: String,
    pub ttl: Duration,
}

/// Everything [`build_app`] needs, cloned once per worker.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub session: SessionOptions,
}

fn session_middleware(options: SessionOptions) -> SessionMiddleware<CookieSessionStore> {
    let ttl_secs = i64::try_from(options.ttl.as_secs()).unwrap_or(i64::MAX);
    SessionMiddleware::builder(CookieSessionStore::default(), options.key)
        .cookie_name(options.cookie_name)
        .cookie_path("/".into())
        .cookie_secure(options.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(options.same_site)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(actix_web::cookie::time::Duration::seconds(ttl_secs)),
        )
        .build()
}

/// Assemble the application: tracing, sessions, the `/api/v1` scope, and
/// the health probes.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(session_middleware(session))
        .service(login)
        .service(logout)
        .service(current_user)
        .service(list_technicians)
        .service(list_tickets)
        .service(create_ticket)
        .service(get_ticket)
        .service(update_ticket_status)
        .service(assign_ticket)
        .service(list_assets)
        .service(create_asset)
        .service(rpc_resource());

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// Readiness is flipped once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config.db_pool, Arc::new(DefaultClock)));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
        session_name,
        session_ttl,
    } = config;
    let session = SessionOptions {
        key,
        cookie_secure,
        same_site,
        cookie_name: session_name,
        ttl: session_ttl,
    };

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, "service desk listening");
    Ok(server)
}
