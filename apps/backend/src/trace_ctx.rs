//! Request trace ids.
//!
//! `RequestTrace` stores a [`TraceId`] in request extensions and opens a
//! task-local scope around the downstream future, so handlers, extractors
//! and error rendering can all reach the id without threading it through.

use std::cell::RefCell;
use std::fmt;

use tokio::task_local;
use uuid::Uuid;

/// Placeholder reported outside any request scope
pub const UNKNOWN_TRACE_ID: &str = "unknown";

task_local! {
    static TRACE_ID: RefCell<Option<TraceId>>;
}

/// Hyphenated UUID identifying one request end to end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceId(String);

impl TraceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Adopt a caller-supplied id when it is a well-formed UUID.
    pub fn from_inbound(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim())
            .ok()
            .map(|uuid| Self(uuid.hyphenated().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trace id of the current request, or [`UNKNOWN_TRACE_ID`].
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| cell.borrow().as_ref().map(|id| id.0.clone()))
        .ok()
        .flatten()
        .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string())
}

/// Run `future` with `id` as the current trace id.
pub async fn with_trace_id<F, R>(id: TraceId, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(id)), future).await
}
