//! Field-level business errors carried by envelopes.

use serde::{Deserialize, Serialize};

/// Canonical message for a missing required value. Shared so error text
/// stays consistent across endpoints.
pub const VALUE_REQUIRED: &str = "value required";

/// Canonical message for malformed or out-of-range data.
pub const INVALID_DATA: &str = "invalid data";

/// One validation or business failure: a key naming the offending field
/// plus a message.
///
/// Never individually fatal; an envelope accumulates zero or more, in
/// order, duplicates allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub key: String,
    pub error: String,
}

impl FieldError {
    pub fn new(key: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            error: error.into(),
        }
    }

    /// Shorthand for the canonical "value required" condition.
    pub fn required(key: impl Into<String>) -> Self {
        Self::new(key, VALUE_REQUIRED)
    }

    /// Shorthand for the canonical "invalid data" condition.
    pub fn invalid(key: impl Into<String>) -> Self {
        Self::new(key, INVALID_DATA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand_constructors_use_canonical_messages() {
        assert_eq!(
            FieldError::required("name"),
            FieldError::new("name", VALUE_REQUIRED)
        );
        assert_eq!(
            FieldError::invalid("age"),
            FieldError::new("age", INVALID_DATA)
        );
    }

    #[test]
    fn test_json_shape() {
        let err = FieldError::new("email", "already taken");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "email", "error": "already taken"})
        );
    }
}
