//! Request-scoped context store with ambient trace propagation.
//!
//! This crate provides the per-execution-unit key/value store that carries
//! contextual metadata (notably the trace identifier) from request-handling
//! code to anything running inside the same unit, without parameter
//! threading. The companion `tracewire-web` crate reads the trace back out
//! when it constructs response envelopes.
//!
//! # Model
//!
//! Each execution unit (one tokio task scope, or one plain thread) owns an
//! isolated [`ContextMap`]. Values are a closed set of kinds
//! ([`ContextValue`]); typed retrieval degrades to `None` on a kind
//! mismatch instead of failing, so probing for optional context is always
//! safe. Crossing a unit boundary is explicit: snapshot on one side,
//! replace on the other.
//!
//! # Usage
//!
//! ```
//! use tracewire_context::{current, Trace, TRACE_KEY};
//!
//! current::set(TRACE_KEY, Trace::new("req-1"));
//! assert_eq!(current::get::<Trace>(TRACE_KEY), Some(Trace::new("req-1")));
//!
//! // Type-mismatched probes degrade to absent rather than erroring.
//! assert_eq!(current::get::<i64>(TRACE_KEY), None);
//!
//! current::clear();
//! assert_eq!(current::get::<Trace>(TRACE_KEY), None);
//! ```
//!
//! Async units bind the map to a task scope instead, so pooled runtime
//! threads stay clean:
//!
//! ```
//! use tracewire_context::{current, ContextMap, Trace, TRACE_KEY};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut map = ContextMap::new();
//! map.set(TRACE_KEY, Trace::new("req-2"));
//!
//! current::scope(map, async {
//!     assert_eq!(current::trace(), Some(Trace::new("req-2")));
//! })
//! .await;
//! # }
//! ```

pub mod current;
pub mod map;
pub mod trace;
pub mod value;

pub use current::TRACE_KEY;
pub use map::ContextMap;
pub use trace::Trace;
pub use value::{ContextValue, FromContextValue};
