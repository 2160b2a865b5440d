//! Document formatting helpers.
//!
//! Canonical text form: pretty-printed, two-space indentation, object keys in
//! sorted order. Two documents with the same content render identically,
//! which makes the text form suitable for comparisons in tests.

use crate::error::DocumentError;
use serde_json::Value;

/// Parse JSON text into a document.
pub fn parse_document(text: &str) -> Result<Value, DocumentError> {
    serde_json::from_str(text).map_err(|error| DocumentError::Malformed {
        line: error.line(),
        column: error.column(),
        message: error.to_string(),
    })
}

/// Re-render JSON text in canonical form.
pub fn format_json(text: &str) -> Result<String, DocumentError> {
    let document = parse_document(text)?;
    format_json_value(&document)
}

/// Render an in-memory document in canonical form.
pub fn format_json_value(value: &Value) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(value).map_err(|error| DocumentError::Render(error.to_string()))
}

/// Strings pass through unquoted; anything else renders as compact JSON.
pub fn object_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whitespace_and_key_order_do_not_matter() {
        let left = format_json("{\"b\": 1,\n\t\t\"a\": [1,2]}").expect("format");
        let right = format_json_value(&json!({"a": [1, 2], "b": 1})).expect("format");
        assert_eq!(left, right);
        assert_eq!(left, "{\n  \"a\": [\n    1,\n    2\n  ],\n  \"b\": 1\n}");
    }

    #[test]
    fn malformed_text_reports_location() {
        let error = format_json("{\n  \"id\": }").expect_err("should fail");
        assert!(matches!(
            error,
            DocumentError::Malformed { line: 2, .. }
        ));
        assert!(error.to_string().starts_with("malformed document at line 2"));
    }

    #[test]
    fn object_to_string_keeps_plain_strings() {
        assert_eq!(object_to_string(&json!("raw text")), "raw text");
        assert_eq!(object_to_string(&json!({"id": 1})), "{\"id\":1}");
        assert_eq!(object_to_string(&json!(null)), "null");
    }
}
