//! Free-text cleanup

use serde_json::Value;

/// Trim string values; null becomes the empty string. Other kinds pass through.
pub fn clean(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Null => Value::String(String::new()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean() {
        assert_eq!(clean(&json!("  Sales KPI \n")), json!("Sales KPI"));
        assert_eq!(clean(&json!(null)), json!(""));
        assert_eq!(clean(&json!(5)), json!(5));
    }
}
