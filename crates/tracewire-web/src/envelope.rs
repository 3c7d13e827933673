//! The uniform response envelope and its construction protocol.
//!
//! An [`Envelope`] represents the outcome of one business operation as one
//! of three terminal kinds (success, failure, or fallback), selected by
//! the factory that built it. Every factory runs the same
//! metadata-processing step: read the ambient trace out of the context
//! store and stamp it onto the carrier, synthesizing a minimal carrier when
//! the call site supplied none. Transport handlers serialize the envelope
//! however they like; [`IntoResponse`] is provided for axum.

use std::fmt::Display;
use std::sync::RwLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracewire_context::{current, Trace, TRACE_KEY};

use crate::error::FieldError;
use crate::meta::{EmptyMeta, Meta};

/// Business status code marking success.
pub const SUCCESS_STATUS_CODE: &str = "200";

/// Business status code marking deliberate service degradation. Distinct
/// from both success and ordinary failure; doubles as the default fallback
/// message.
pub const FALLBACK_STATUS_CODE: &str = "fallback";

/// Fixed message carried by successful envelopes.
pub const SUCCESS_MESSAGE: &str = "success";

/// Generic message for failed envelopes whose error list is empty.
pub const FAIL_MESSAGE: &str = "failure";

static FAIL_STATUS_CODE: Lazy<RwLock<String>> = Lazy::new(|| RwLock::new("400".to_string()));

/// The process-wide default failure status code, initially `"400"`.
pub fn default_fail_status_code() -> String {
    FAIL_STATUS_CODE
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Overrides the default used by [`Envelope::fail`] process-wide. Intended
/// for startup, before requests are served.
pub fn set_default_fail_status_code(code: impl Into<String>) {
    let mut guard = FAIL_STATUS_CODE
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = code.into();
}

/// Uniform response envelope for service endpoints.
///
/// Fields are public for interop (deserialization, post-hoc mutation by
/// transport glue), but the intended construction path is the named
/// factories, which fix the outcome kind and stamp the ambient trace onto
/// the metadata carrier. The business `status_code` is a string code, not
/// a transport status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T, M = EmptyMeta> {
    /// Business status code.
    pub status_code: String,
    /// Short outcome message.
    pub message: String,
    /// Payload, when the response carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Metadata carrier. Never absent: synthesized when the caller supplies
    /// none, so the trace slot always exists.
    pub meta: M,
    /// Field-level errors, in accumulation order, duplicates allowed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl<T, M: Meta + Default> Envelope<T, M> {
    /// Successful envelope with no payload.
    pub fn ok() -> Self {
        Self::build(SUCCESS_STATUS_CODE, SUCCESS_MESSAGE, None, None, Vec::new())
    }

    /// Successful envelope carrying `data`.
    pub fn success(data: T) -> Self {
        Self::build(
            SUCCESS_STATUS_CODE,
            SUCCESS_MESSAGE,
            Some(data),
            None,
            Vec::new(),
        )
    }

    /// Successful envelope carrying `data` and a caller-supplied metadata
    /// carrier, which still gets the ambient trace stamped onto it.
    pub fn success_with_meta(data: T, meta: M) -> Self {
        Self::build(
            SUCCESS_STATUS_CODE,
            SUCCESS_MESSAGE,
            Some(data),
            Some(meta),
            Vec::new(),
        )
    }

    /// Failed envelope with the process-wide default status code. The
    /// message is derived from `errors` once, here: newline-joined in list
    /// order, or [`FAIL_MESSAGE`] when the list is empty.
    pub fn fail(errors: Vec<FieldError>) -> Self {
        let message = derive_fail_message(&errors);
        Self::build(default_fail_status_code(), message, None, None, errors)
    }

    /// Failed envelope with an explicit status code and a derived message.
    pub fn fail_with_status(status_code: impl Into<String>, errors: Vec<FieldError>) -> Self {
        let message = derive_fail_message(&errors);
        Self::build(status_code, message, None, None, errors)
    }

    /// Failed envelope with explicit status code and message.
    pub fn fail_with(
        status_code: impl Into<String>,
        message: impl Into<String>,
        errors: Vec<FieldError>,
    ) -> Self {
        Self::build(status_code, message, None, None, errors)
    }

    /// Degraded-service envelope: the fallback marker as both code and
    /// message.
    pub fn fallback(errors: Vec<FieldError>) -> Self {
        Self::fail_with(FALLBACK_STATUS_CODE, FALLBACK_STATUS_CODE, errors)
    }

    /// Degraded-service envelope whose message is taken from the
    /// originating fault.
    pub fn fallback_from(cause: impl Display, errors: Vec<FieldError>) -> Self {
        Self::fail_with(FALLBACK_STATUS_CODE, cause.to_string(), errors)
    }

    /// Attach a payload after construction.
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    fn build(
        status_code: impl Into<String>,
        message: impl Into<String>,
        data: Option<T>,
        meta: Option<M>,
        errors: Vec<FieldError>,
    ) -> Self {
        Self {
            status_code: status_code.into(),
            message: message.into(),
            data,
            meta: process_meta(meta),
            errors,
        }
    }
}

impl<T, M: Meta> Envelope<T, M> {
    /// Replace the metadata carrier, re-stamping the trace captured at
    /// construction so the replacement stays correlated.
    pub fn with_meta(mut self, mut meta: M) -> Self {
        meta.set_trace(self.meta.trace().cloned());
        self.meta = meta;
        self
    }
}

impl<T, M> Envelope<T, M> {
    /// Whether the status code is the fixed success code. This and
    /// [`is_fallback`](Self::is_fallback) are the only outcome
    /// classification primitives; nothing else compares status codes.
    pub fn is_success(&self) -> bool {
        self.status_code == SUCCESS_STATUS_CODE
    }

    /// Whether the status code is the fallback marker.
    pub fn is_fallback(&self) -> bool {
        self.status_code == FALLBACK_STATUS_CODE
    }
}

fn derive_fail_message(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        FAIL_MESSAGE.to_string()
    } else {
        errors
            .iter()
            .map(|e| e.error.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The single metadata-processing step shared by every factory path.
fn process_meta<M: Meta + Default>(meta: Option<M>) -> M {
    let trace = current::get::<Trace>(TRACE_KEY);
    let mut meta = meta.unwrap_or_default();
    meta.set_trace(trace);
    meta
}

impl<T: Serialize, M: Serialize> IntoResponse for Envelope<T, M> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
