//! Error types for Hillfog Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid shape: expected {expected}, found {found}")]
    InvalidShape { expected: String, found: String },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl CoreError {
    /// Build an `InvalidShape` error describing the JSON kind that was found.
    pub fn invalid_shape(expected: &str, found: &serde_json::Value) -> Self {
        CoreError::InvalidShape {
            expected: expected.to_string(),
            found: json_kind(found).to_string(),
        }
    }
}

/// Short name of a JSON value's kind, for error messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_shape_message() {
        let err = CoreError::invalid_shape("object", &json!([1, 2]));
        assert_eq!(err.to_string(), "Invalid shape: expected object, found array");
    }

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!("x")), "string");
        assert_eq!(json_kind(&json!({"a": 1})), "object");
    }
}
