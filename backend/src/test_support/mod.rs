//! In-memory adapters for integration tests.
//!
//! Compiled with the `test-support` feature so `backend/tests` can drive the
//! full HTTP stack without PostgreSQL.

mod in_memory;
mod password;

pub use in_memory::InMemoryStore;
pub use password::FixturePasswordHasher;

use std::sync::Arc;

use mockable::Clock;

use crate::domain::{AssetService, PasswordLoginService, TicketService, UserDirectory};
use crate::inbound::http::state::HttpState;

/// Wire the real domain services over `store` and the fixture hasher.
pub fn in_memory_http_state(store: Arc<InMemoryStore>, clock: Arc<dyn Clock>) -> HttpState {
    HttpState::new(
        Arc::new(PasswordLoginService::new(
            Arc::clone(&store),
            Arc::new(FixturePasswordHasher),
        )),
        Arc::new(UserDirectory::new(Arc::clone(&store))),
        Arc::new(TicketService::new(Arc::clone(&store), Arc::clone(&clock))),
        Arc::new(AssetService::new(store, clock)),
    )
}
