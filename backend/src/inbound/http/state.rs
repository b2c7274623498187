//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AssetCommand, AssetQuery, LoginService, TicketCommand, TicketQuery, UsersQuery,
};

/// Dependency bundle for HTTP and JSON-RPC handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub tickets: Arc<dyn TicketCommand>,
    pub tickets_query: Arc<dyn TicketQuery>,
    pub assets: Arc<dyn AssetCommand>,
    pub assets_query: Arc<dyn AssetQuery>,
}

impl HttpState {
    /// Bundle a ticket service and an asset service that each implement both
    /// halves of their command/query pair.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use service_desk::domain::{AssetService, PasswordLoginService, TicketService, UserDirectory};
    /// use service_desk::inbound::http::state::HttpState;
    /// use service_desk::outbound::credentials::Argon2PasswordHasher;
    /// use service_desk::outbound::persistence::{
    ///     DbPool, DieselAssetRepository, DieselTicketRepository, DieselUserRepository,
    /// };
    ///
    /// fn wire(pool: DbPool) -> HttpState {
    ///     let clock = Arc::new(DefaultClock);
    ///     let users = Arc::new(DieselUserRepository::new(pool.clone()));
    ///     HttpState::new(
    ///         Arc::new(PasswordLoginService::new(users.clone(), Arc::new(Argon2PasswordHasher::new()))),
    ///         Arc::new(UserDirectory::new(users)),
    ///         Arc::new(TicketService::new(Arc::new(DieselTicketRepository::new(pool.clone())), clock.clone())),
    ///         Arc::new(AssetService::new(Arc::new(DieselAssetRepository::new(pool)), clock)),
    ///     )
    /// }
    /// ```
    pub fn new<T, A>(
        login: Arc<dyn LoginService>,
        users: Arc<dyn UsersQuery>,
        tickets: Arc<T>,
        assets: Arc<A>,
    ) -> Self
    where
        T: TicketCommand + TicketQuery + 'static,
        A: AssetCommand + AssetQuery + 'static,
    {
        Self {
            login,
            users,
            tickets: tickets.clone(),
            tickets_query: tickets,
            assets: assets.clone(),
            assets_query: assets,
        }
    }
}
