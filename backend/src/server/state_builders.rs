//! Wiring of Diesel repositories and domain services into [`HttpState`].

use std::sync::Arc;

use mockable::Clock;

use crate::domain::{AssetService, PasswordLoginService, TicketService, UserDirectory};
use crate::inbound::http::state::HttpState;
use crate::outbound::credentials::Argon2PasswordHasher;
use crate::outbound::persistence::{
    DbPool, DieselAssetRepository, DieselTicketRepository, DieselUserRepository,
};

/// Build handler state backed by PostgreSQL.
///
/// Every repository shares `pool`; ticket and asset services stamp writes
/// with `clock`.
pub fn build_http_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let tickets = Arc::new(TicketService::new(
        Arc::new(DieselTicketRepository::new(pool.clone())),
        Arc::clone(&clock),
    ));
    let assets = Arc::new(AssetService::new(
        Arc::new(DieselAssetRepository::new(pool.clone())),
        clock,
    ));

    HttpState::new(
        Arc::new(PasswordLoginService::new(Arc::clone(&users), hasher)),
        Arc::new(UserDirectory::new(users)),
        tickets,
        assets,
    )
}
