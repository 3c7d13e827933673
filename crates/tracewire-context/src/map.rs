//! The per-execution-unit context map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::{ContextValue, FromContextValue};

/// Mutable key/value store owned by a single execution unit.
///
/// One instance exists per unit (thread or task); units never share an
/// instance, so no operation needs locking. `Clone` produces the snapshot
/// used to transplant context across an async boundary; see
/// [`current::snapshot`](crate::current::snapshot) and
/// [`current::replace`](crate::current::replace).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextMap {
    entries: HashMap<String, ContextValue>,
}

impl ContextMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed lookup. Returns `None` for a missing key or when the stored
    /// kind cannot be viewed as `T`, never an error.
    pub fn get<T: FromContextValue>(&self, key: &str) -> Option<T> {
        self.entries.get(key).and_then(T::from_context_value)
    }

    /// The stored value as-is, without a typed view.
    pub fn get_raw(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    /// Inserts or overwrites.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Removes one entry; `None` if it was absent.
    pub fn remove(&mut self, key: &str) -> Option<ContextValue> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
