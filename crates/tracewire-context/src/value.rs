//! Typed values stored in the context map.

use serde::{Deserialize, Serialize};

use crate::trace::Trace;

/// A value held in the per-unit context map.
///
/// The set of kinds is closed. Retrieval through [`FromContextValue`]
/// degrades to `None` when the stored kind differs from the requested one,
/// so callers can probe for optional context without ever hitting an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Trace(Trace),
    Json(serde_json::Value),
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::Str(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::Str(value.to_string())
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Int(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<Trace> for ContextValue {
    fn from(value: Trace) -> Self {
        ContextValue::Trace(value)
    }
}

impl From<serde_json::Value> for ContextValue {
    fn from(value: serde_json::Value) -> Self {
        ContextValue::Json(value)
    }
}

/// Typed retrieval out of a [`ContextValue`].
///
/// Implementations return `None` for any kind other than their own.
pub trait FromContextValue: Sized {
    fn from_context_value(value: &ContextValue) -> Option<Self>;
}

impl FromContextValue for String {
    fn from_context_value(value: &ContextValue) -> Option<Self> {
        match value {
            ContextValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromContextValue for i64 {
    fn from_context_value(value: &ContextValue) -> Option<Self> {
        match value {
            ContextValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromContextValue for bool {
    fn from_context_value(value: &ContextValue) -> Option<Self> {
        match value {
            ContextValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromContextValue for Trace {
    fn from_context_value(value: &ContextValue) -> Option<Self> {
        match value {
            ContextValue::Trace(t) => Some(t.clone()),
            _ => None,
        }
    }
}

impl FromContextValue for serde_json::Value {
    fn from_context_value(value: &ContextValue) -> Option<Self> {
        match value {
            ContextValue::Json(v) => Some(v.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_kind_is_returned() {
        let value = ContextValue::from("hello");
        assert_eq!(String::from_context_value(&value), Some("hello".to_string()));

        let value = ContextValue::from(7i64);
        assert_eq!(i64::from_context_value(&value), Some(7));

        let value = ContextValue::from(Trace::new("T1"));
        assert_eq!(Trace::from_context_value(&value), Some(Trace::new("T1")));
    }

    #[test]
    fn test_mismatched_kind_degrades_to_none() {
        let value = ContextValue::from("not a number");
        assert_eq!(i64::from_context_value(&value), None);
        assert_eq!(bool::from_context_value(&value), None);
        assert_eq!(Trace::from_context_value(&value), None);
    }

    #[test]
    fn test_json_kind() {
        let payload = serde_json::json!({"k": [1, 2, 3]});
        let value = ContextValue::from(payload.clone());
        assert_eq!(serde_json::Value::from_context_value(&value), Some(payload));
        assert_eq!(String::from_context_value(&value), None);
    }
}
