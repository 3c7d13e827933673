//! Uniform response envelopes with automatic trace stamping.
//!
//! This crate provides the shared response shape service endpoints return
//! and the glue that stamps each response with the request's trace, read
//! ambiently from `tracewire-context`.
//!
//! # Usage
//!
//! 1. Layer [`propagate_trace`] onto the router (or seed
//!    [`tracewire_context::current`] yourself in non-axum code).
//! 2. Build outcomes through the [`Envelope`] factories (`success`,
//!    `fail`, `fallback`), which fix the outcome kind and attach the trace
//!    without the call site mentioning it.
//! 3. Return the envelope from the handler; it serializes as JSON with the
//!    business status code in the body.
//!
//! ```no_run
//! use axum::{middleware, routing::get, Router};
//! use tracewire_web::{propagate_trace, Envelope};
//!
//! async fn status() -> Envelope<String> {
//!     Envelope::success("ready".to_string())
//! }
//!
//! let app: Router = Router::new()
//!     .route("/status", get(status))
//!     .layer(middleware::from_fn(propagate_trace));
//! ```

pub mod envelope;
pub mod error;
pub mod extract;
pub mod meta;
pub mod middleware;
pub mod selection;

pub use envelope::{
    default_fail_status_code, set_default_fail_status_code, Envelope, FAIL_MESSAGE,
    FALLBACK_STATUS_CODE, SUCCESS_MESSAGE, SUCCESS_STATUS_CODE,
};
pub use error::{FieldError, INVALID_DATA, VALUE_REQUIRED};
pub use extract::{trace_from_headers, TraceExtractor, TRACE_HEADER};
pub use meta::{EmptyMeta, Meta};
pub use middleware::propagate_trace;
pub use selection::{AttachSelection, Selection};
