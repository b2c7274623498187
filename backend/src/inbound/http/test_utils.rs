//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};

use crate::domain::User;
use crate::domain::ports::{
    MockAssetCommand, MockAssetQuery, MockLoginService, MockTicketCommand, MockTicketQuery,
    MockUsersQuery,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Cookie name used by [`test_session_middleware`].
pub const TEST_SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
///
/// # Panics
///
/// Panics when the response did not set the cookie.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Mocked driving ports, assembled into an [`HttpState`] for handler tests.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub users: MockUsersQuery,
    pub tickets: MockTicketCommand,
    pub tickets_query: MockTicketQuery,
    pub assets: MockAssetCommand,
    pub assets_query: MockAssetQuery,
}

impl MockPorts {
    /// Freeze the configured expectations into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            users: Arc::new(self.users),
            tickets: Arc::new(self.tickets),
            tickets_query: Arc::new(self.tickets_query),
            assets: Arc::new(self.assets),
            assets_query: Arc::new(self.assets_query),
        }
    }
}

/// Path conventionally used to mount [`sign_in_as`] in handler tests.
pub const SIGN_IN_PATH: &str = "/test/sign-in";

/// Route that signs `user` into the session, for seeding test cookies.
pub async fn sign_in_as(session: SessionContext, user: web::Data<User>) -> ApiResult<HttpResponse> {
    session.persist_user(user.get_ref())?;
    Ok(HttpResponse::Ok().finish())
}
