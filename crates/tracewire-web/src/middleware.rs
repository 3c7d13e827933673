//! Request middleware that installs the trace context scope.

use std::time::Instant;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracewire_context::{current, ContextMap, TRACE_KEY};

use crate::extract::{resolve_trace, TRACE_HEADER};

/// Binds a fresh context map to the task scope for the rest of the request,
/// with the trace pre-seeded from `x-trace-id` (or a generated one), logs
/// request start and completion, and echoes the trace id on the response.
///
/// Apply with `axum::middleware::from_fn(propagate_trace)`. Handlers below
/// this layer construct envelopes without threading the trace manually, and
/// the scope is dropped when the request finishes, so nothing leaks into
/// the next request multiplexed onto the same runtime thread.
pub async fn propagate_trace(request: Request, next: Next) -> Response {
    let trace = resolve_trace(request.headers());
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    tracing::info!(trace_id = %trace, method = %method, uri = %uri, "request started");

    let mut map = ContextMap::new();
    map.set(TRACE_KEY, trace.clone());
    let mut response = current::scope(map, next.run(request)).await;

    tracing::info!(
        trace_id = %trace,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        "request completed"
    );

    if let Ok(value) = HeaderValue::from_str(trace.as_str()) {
        response.headers_mut().insert(TRACE_HEADER, value);
    }

    response
}
