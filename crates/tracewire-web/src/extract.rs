//! Axum extractor for the request trace.
//!
//! Reads `x-trace-id` from the request headers. A request that arrives
//! without one gets a freshly minted UUID so it is still traceable
//! downstream.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use tracewire_context::Trace;
use uuid::Uuid;

/// Header carrying the trace identifier across service boundaries.
pub const TRACE_HEADER: &str = "x-trace-id";

/// Axum extractor that yields the request's [`Trace`].
///
/// Infallible: a missing or unreadable header falls back to a generated
/// identifier rather than rejecting the request.
pub struct TraceExtractor(pub Trace);

/// The trace sent by the caller, if the header is present and non-empty.
pub fn trace_from_headers(headers: &HeaderMap) -> Option<Trace> {
    headers
        .get(TRACE_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(Trace::new)
}

pub(crate) fn resolve_trace(headers: &HeaderMap) -> Trace {
    trace_from_headers(headers).unwrap_or_else(|| Trace::new(Uuid::new_v4().to_string()))
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for TraceExtractor {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_trace(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_value_is_used() {
        let mut headers = HeaderMap::new();
        headers.insert(TRACE_HEADER, HeaderValue::from_static("T1"));
        assert_eq!(trace_from_headers(&headers), Some(Trace::new("T1")));
        assert_eq!(resolve_trace(&headers), Trace::new("T1"));
    }

    #[test]
    fn test_missing_header_mints_a_trace() {
        let headers = HeaderMap::new();
        assert_eq!(trace_from_headers(&headers), None);

        let minted = resolve_trace(&headers);
        // UUID v4 in hyphenated form.
        assert_eq!(minted.as_str().len(), 36);
    }

    #[test]
    fn test_empty_header_is_treated_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(TRACE_HEADER, HeaderValue::from_static(""));
        assert_eq!(trace_from_headers(&headers), None);
    }
}
