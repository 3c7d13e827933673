//! Metadata carriers attached to every envelope.

use serde::{Deserialize, Serialize};
use tracewire_context::Trace;

/// Base capability of envelope metadata: one settable trace slot.
///
/// The envelope factories stamp the ambient trace through this trait, so
/// any concrete metadata shape an endpoint needs (pagination cursors,
/// deprecation notices, and the like) picks up the trace by implementing
/// it.
pub trait Meta {
    fn trace(&self) -> Option<&Trace>;
    fn set_trace(&mut self, trace: Option<Trace>);
}

/// Minimal metadata carrier holding only the trace slot.
///
/// Synthesized whenever a factory is not handed a caller-supplied carrier,
/// which is how every envelope ends up with metadata even when the call
/// site provided none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Trace>,
}

impl EmptyMeta {
    pub fn new(trace: Option<Trace>) -> Self {
        Self { trace }
    }
}

impl Meta for EmptyMeta {
    fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    fn set_trace(&mut self, trace: Option<Trace>) {
        self.trace = trace;
    }
}
