//! Ambient binding of a [`ContextMap`] to the current execution unit.
//!
//! Request-handling code seeds the map early (usually with the trace), any
//! code running in the same unit reads it without parameter threading, and
//! the map is dropped or cleared when the unit finishes its work.
//!
//! Two bindings exist, resolved innermost-first:
//!
//! 1. A tokio task-local scope, entered with [`scope`] (async) or
//!    [`sync_scope`] (blocking). The map lives exactly as long as the scope,
//!    so a scoped unit can never leak context into the next request.
//! 2. The calling thread's own map, initialized lazily on first access.
//!    This is what thread-per-request code uses. Pooled threads MUST call
//!    [`clear`] at the end of each request or stale values leak into the
//!    next request handled by the same thread.
//!
//! Context never crosses a unit boundary on its own: hand-off to another
//! task or thread is an explicit [`snapshot`] on the origin side and
//! [`replace`] on the destination side.

use std::cell::RefCell;
use std::future::Future;

use crate::map::ContextMap;
use crate::trace::Trace;
use crate::value::{ContextValue, FromContextValue};

/// Well-known key under which the trace value is stored.
pub const TRACE_KEY: &str = "trace";

tokio::task_local! {
    static TASK_MAP: RefCell<ContextMap>;
}

thread_local! {
    static THREAD_MAP: RefCell<ContextMap> = RefCell::new(ContextMap::new());
}

fn with_current<R>(f: impl FnOnce(&mut ContextMap) -> R) -> R {
    if TASK_MAP.try_with(|_| ()).is_ok() {
        TASK_MAP.with(|map| f(&mut map.borrow_mut()))
    } else {
        THREAD_MAP.with(|map| f(&mut map.borrow_mut()))
    }
}

/// Typed lookup in the current unit's map. Missing key, missing map, and
/// kind mismatch all degrade to `None`.
pub fn get<T: FromContextValue>(key: &str) -> Option<T> {
    with_current(|map| map.get(key))
}

/// Inserts or overwrites in the current unit's map, initializing the map if
/// this is the unit's first access.
pub fn set(key: impl Into<String>, value: impl Into<ContextValue>) {
    with_current(|map| map.set(key, value));
}

/// Removes one entry; no-op `None` if absent.
pub fn remove(key: &str) -> Option<ContextValue> {
    with_current(|map| map.remove(key))
}

/// Detaches the current unit's map entirely. The next access of any kind
/// starts from a fresh, empty map.
pub fn clear() {
    with_current(|map| *map = ContextMap::new());
}

/// A copy of the current unit's map, for bulk inspection or as the origin
/// side of an explicit transplant.
pub fn snapshot() -> ContextMap {
    with_current(|map| map.clone())
}

/// Replaces the current unit's map wholesale: the destination side of a
/// transplant into a worker that inherits the caller's context.
pub fn replace(map: ContextMap) {
    with_current(|current| *current = map);
}

/// The trace value of the current unit, if one was set under [`TRACE_KEY`].
pub fn trace() -> Option<Trace> {
    get(TRACE_KEY)
}

/// Stores `trace` under [`TRACE_KEY`] in the current unit's map.
pub fn set_trace(trace: Trace) {
    set(TRACE_KEY, trace);
}

/// Runs `fut` with `map` bound as the task-local context of the current
/// task. The binding nests (innermost scope wins) and the map is dropped
/// when the scope exits.
pub async fn scope<F: Future>(map: ContextMap, fut: F) -> F::Output {
    TASK_MAP.scope(RefCell::new(map), fut).await
}

/// Synchronous form of [`scope`], for blocking sections.
pub fn sync_scope<R>(map: ContextMap, f: impl FnOnce() -> R) -> R {
    TASK_MAP.sync_scope(RefCell::new(map), f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Trace;

    #[test]
    fn test_set_get_remove_on_thread_map() {
        clear();
        assert_eq!(get::<String>("k"), None);

        set("k", "v");
        assert_eq!(get::<String>("k"), Some("v".to_string()));
        assert_eq!(get::<i64>("k"), None);

        assert!(remove("k").is_some());
        assert_eq!(get::<String>("k"), None);
        assert!(remove("k").is_none());
    }

    #[test]
    fn test_clear_detaches_and_reinitializes() {
        set("a", 1i64);
        set("b", 2i64);
        clear();

        assert_eq!(get::<i64>("a"), None);
        assert_eq!(get::<i64>("b"), None);

        set("c", 3i64);
        let map = snapshot();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get::<i64>("c"), Some(3));
        clear();
    }

    #[test]
    fn test_threads_never_observe_each_other() {
        clear();
        set_trace(Trace::new("outer"));

        let handle = std::thread::spawn(|| {
            assert_eq!(trace(), None);
            set_trace(Trace::new("inner"));
            assert_eq!(trace(), Some(Trace::new("inner")));
        });
        handle.join().unwrap();

        assert_eq!(trace(), Some(Trace::new("outer")));
        clear();
    }

    #[test]
    fn test_snapshot_replace_transplants_context() {
        clear();
        set_trace(Trace::new("T1"));
        set("tenant", "acme");
        let inherited = snapshot();
        clear();

        let handle = std::thread::spawn(move || {
            replace(inherited);
            assert_eq!(trace(), Some(Trace::new("T1")));
            assert_eq!(get::<String>("tenant"), Some("acme".to_string()));
        });
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn test_sibling_task_scopes_are_isolated() {
        let first = scope(ContextMap::new(), async {
            set_trace(Trace::new("task-1"));
            tokio::task::yield_now().await;
            trace()
        });
        let second = scope(ContextMap::new(), async {
            set_trace(Trace::new("task-2"));
            tokio::task::yield_now().await;
            trace()
        });

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first, Some(Trace::new("task-1")));
        assert_eq!(second, Some(Trace::new("task-2")));
    }

    #[tokio::test]
    async fn test_scope_exit_drops_the_map() {
        clear();
        scope(ContextMap::new(), async {
            set_trace(Trace::new("scoped"));
            assert_eq!(trace(), Some(Trace::new("scoped")));
        })
        .await;

        // Back on the thread map, which the scope never touched.
        assert_eq!(trace(), None);
    }

    #[test]
    fn test_sync_scope_shadows_the_thread_map() {
        clear();
        set_trace(Trace::new("thread"));

        let seen = sync_scope(ContextMap::new(), || {
            assert_eq!(trace(), None);
            set_trace(Trace::new("scoped"));
            trace()
        });

        assert_eq!(seen, Some(Trace::new("scoped")));
        assert_eq!(trace(), Some(Trace::new("thread")));
        clear();
    }
}
