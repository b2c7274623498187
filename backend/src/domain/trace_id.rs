//! Correlation id for one service-desk request.
//!
//! The trace middleware opens a [`TraceId::scope`] around every handler, and
//! [`crate::domain::Error`] reads [`TraceId::current`] when it is built. The
//! id lives in a Tokio task-local, so work handed to `tokio::spawn` or
//! `spawn_blocking` starts without one unless it is wrapped in a new scope.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    pub(crate) static TRACE_ID: TraceId;
}

/// Response header carrying the request's trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Random UUID tagging a request, its log lines, and any error envelope.
///
/// ```
/// use service_desk::TraceId;
///
/// fn log_prefix() -> String {
///     TraceId::current().map_or_else(String::new, |id| format!("[{id}] "))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the enclosing request, or `None` outside a handler.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` visible through [`TraceId::current`].
    ///
    /// ```
    /// use service_desk::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id: TraceId = "5f0c7a52-8d43-4c1e-9a55-2f3b6d9e1c07".parse().unwrap();
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scope_exposes_id_to_nested_futures() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async {
            tokio::task::yield_now().await;
            TraceId::current()
        })
        .await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn no_id_outside_a_request() {
        assert_eq!(TraceId::current(), None);
    }

    #[test]
    fn displays_as_hyphenated_uuid() {
        let raw = "5f0c7a52-8d43-4c1e-9a55-2f3b6d9e1c07";
        let id: TraceId = raw.parse().expect("uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn rejects_non_uuid_text() {
        assert!("ticket-42".parse::<TraceId>().is_err());
    }
}
