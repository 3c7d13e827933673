//! The trace identifier propagated from request context into responses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque correlation identifier for one request-handling execution unit.
///
/// Written into the context store when a request arrives and read back by
/// the response-envelope factories, so every response produced during the
/// request can be correlated with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trace {
    /// The identifier itself. Opaque to this crate.
    pub id: String,
}

impl Trace {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl From<&str> for Trace {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Trace {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}
