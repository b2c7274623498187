//! Shared fixtures for domain service unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{Role, User, UserId, Username};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 15, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn user(id: i64, username: &str, role: Role) -> User {
    User::new(
        UserId::new(id).expect("positive fixture id"),
        Username::new(username).expect("valid fixture username"),
        role,
    )
}

pub(crate) fn admin() -> User {
    user(1, "admin", Role::Admin)
}

pub(crate) fn tech() -> User {
    user(2, "tech1", Role::Tech)
}
