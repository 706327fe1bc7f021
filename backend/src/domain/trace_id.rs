//! Per-request correlation identifier.
//!
//! The [`Trace`](crate::Trace) middleware puts a fresh [`TraceId`] into
//! task-local storage for the lifetime of each request. [`Error`] values built
//! inside that scope pick it up, so the `traceId` in an error body always
//! matches the `trace-id` response header and the request's log span.
//!
//! Task locals do not follow `tokio::spawn`; wrap spawned work in
//! [`TraceId::scope`] when it must stay correlated.
//!
//! [`Error`]: crate::domain::Error

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

tokio::task_local! {
    static CURRENT: TraceId;
}

/// UUID naming one request.
///
/// # Examples
/// ```
/// use gamics::domain::TraceId;
///
/// let id: TraceId = "3f2504e0-4f89-11d3-9a0c-0305e82c3301".parse().expect("uuid");
/// assert_eq!(id.to_string(), "3f2504e0-4f89-11d3-9a0c-0305e82c3301");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request being handled, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `id` as the current identifier.
    pub async fn scope<F: Future>(id: TraceId, fut: F) -> F::Output {
        CURRENT.scope(id, fut).await
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn scope_exposes_the_id() {
        let id = TraceId::generate();
        assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    }

    #[rstest]
    #[tokio::test]
    async fn nested_scopes_shadow_outer_ids() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;
        assert_eq!(seen, (Some(inner), Some(outer)));
    }

    #[rstest]
    fn nothing_is_current_outside_a_request() {
        assert!(TraceId::current().is_none());
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn rejects_malformed_ids(#[case] raw: &str) {
        assert!(raw.parse::<TraceId>().is_err());
    }

    #[rstest]
    fn generated_ids_differ() {
        assert_ne!(TraceId::generate(), TraceId::generate());
    }
}
