//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie holds the authenticated user's id, username, and role, so
//! handlers can authorize without a user lookup per request. A cookie whose
//! entries no longer parse is treated as anonymous.

use std::str::FromStr;

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Role, User, UserId, Username};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const ROLE_KEY: &str = "role";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

fn read_failure(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn write_failure(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user in the session cookie.
    ///
    /// The session id is renewed first so a pre-login cookie cannot be
    /// replayed as the authenticated one.
    pub fn persist_user(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id().get())
            .map_err(write_failure)?;
        self.0
            .insert(USERNAME_KEY, user.username().as_ref())
            .map_err(write_failure)?;
        self.0
            .insert(ROLE_KEY, user.role().as_str())
            .map_err(write_failure)
    }

    /// Fetch the current user from the session, if present and well formed.
    pub fn current_user(&self) -> Result<Option<User>, Error> {
        let id = self.0.get::<i64>(USER_ID_KEY).map_err(read_failure)?;
        let username = self.0.get::<String>(USERNAME_KEY).map_err(read_failure)?;
        let role = self.0.get::<String>(ROLE_KEY).map_err(read_failure)?;
        let (Some(id), Some(username), Some(role)) = (id, username, role) else {
            return Ok(None);
        };

        let parsed = UserId::try_from(id)
            .map_err(|err| err.to_string())
            .and_then(|id| {
                let username = Username::new(&username).map_err(|err| err.to_string())?;
                let role = Role::from_str(&role).map_err(|err| err.to_string())?;
                Ok(User::new(id, username, role))
            });
        match parsed {
            Ok(user) => Ok(Some(user)),
            Err(reason) => {
                warn!(%reason, "discarding malformed session identity");
                Ok(None)
            }
        }
    }

    /// Require an authenticated user or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<User, Error> {
        self.current_user()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
