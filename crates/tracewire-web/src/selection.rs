//! Key/text selection pairs for dictionary-style choice data.
//!
//! Passive data holders with no behavior; endpoints return them inside
//! envelopes for dropdowns and similar pick-lists.

use serde::{Deserialize, Serialize};

/// A value plus its display text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection<T> {
    pub value: T,
    pub text: String,
}

impl<T> Selection<T> {
    pub fn new(value: T, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }
}

/// A [`Selection`] carrying an extra attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachSelection<T, A> {
    pub value: T,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attach: Option<A>,
}

impl<T, A> AttachSelection<T, A> {
    pub fn new(value: T, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
            attach: None,
        }
    }

    pub fn with_attach(mut self, attach: A) -> Self {
        self.attach = Some(attach);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_json_shape() {
        let selection = Selection::new(7i32, "seven");
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json, serde_json::json!({"value": 7, "text": "seven"}));
    }

    #[test]
    fn test_attach_is_optional_on_the_wire() {
        let plain: AttachSelection<i32, String> = AttachSelection::new(1, "one");
        let json = serde_json::to_value(&plain).unwrap();
        assert_eq!(json, serde_json::json!({"value": 1, "text": "one"}));

        let attached = AttachSelection::new(1, "one").with_attach("extra".to_string());
        let json = serde_json::to_value(&attached).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"value": 1, "text": "one", "attach": "extra"})
        );
    }
}
