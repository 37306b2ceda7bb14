//! Outgoing payload models for the legacy action framework
//!
//! Two encodings exist and the caller always picks one explicitly:
//!
//! - [`FormPayload`]: a nested object graph flattened into OGNL-style
//!   `path=value` pairs (`scorecard.perspectives[0].name=Finance`), sent as
//!   `application/x-www-form-urlencoded`.
//! - [`MultipartPayload`]: one part per top-level key, used for file uploads
//!   and for fields the backend must read as raw JSON text.

use serde_json::Value;

use crate::Record;

/// Flattened `path -> scalar` pairs, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    pairs: Vec<(String, String)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a value graph. `prefix` is the optional OGNL namespace.
    pub fn flatten(value: &Value, prefix: Option<&str>) -> Self {
        let mut payload = Self::new();
        let root = prefix.filter(|p| !p.is_empty()).unwrap_or("");
        flatten_into(&mut payload.pairs, root, value);
        payload
    }

    /// Append a single pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Flatten with an optional namespace prefix.
pub fn flatten(value: &Value, prefix: Option<&str>) -> FormPayload {
    FormPayload::flatten(value, prefix)
}

fn flatten_into(out: &mut Vec<(String, String)>, path: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                flatten_into(out, &child_path, child);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                flatten_into(out, &format!("{}[{}]", path, i), child);
            }
        }
        scalar => {
            // A bare scalar with no path has no key to live under.
            if !path.is_empty() {
                out.push((path.to_string(), scalar_to_string(scalar)));
            }
        }
    }
}

/// String form of a JSON scalar as the legacy backend expects it.
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Binary attachment carried as-is in a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// One multipart field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    File(FilePart),
}

impl Part {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(s) => Some(s),
            Part::File(_) => None,
        }
    }
}

/// Ordered multipart fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    parts: Vec<(String, Part)>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parts from the top-level keys of a record.
    ///
    /// Scalars are stringified, arrays become `key[i]` parts with non-scalar
    /// elements rendered as JSON text, objects are rendered as JSON text and
    /// nulls are skipped.
    pub fn from_record(record: &Record) -> Self {
        Self::from_record_prefixed(record, None)
    }

    /// Like [`MultipartPayload::from_record`], with part names under an
    /// OGNL prefix (`scorecard.name`).
    pub fn from_record_prefixed(record: &Record, prefix: Option<&str>) -> Self {
        let prefix = prefix.filter(|p| !p.is_empty());
        let mut payload = Self::new();
        for (key, value) in record {
            let name = match prefix {
                Some(p) => format!("{}.{}", p, key),
                None => key.clone(),
            };
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for (i, item) in items.iter().enumerate() {
                        if let Some(text) = part_text(item) {
                            payload.push_text(format!("{}[{}]", name, i), text);
                        }
                    }
                }
                other => {
                    if let Some(text) = part_text(other) {
                        payload.push_text(name, text);
                    }
                }
            }
        }
        payload
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push((name.into(), Part::Text(value.into())));
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: FilePart) {
        self.parts.push((name.into(), Part::File(file)));
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_text(name, value);
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.push_file(name, file);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn parts(&self) -> &[(String, Part)] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<(String, Part)> {
        self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

fn part_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Object(_) | Value::Array(_) => Some(value.to_string()),
        scalar => Some(scalar_to_string(scalar)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(payload: &FormPayload) -> Vec<(&str, &str)> {
        payload
            .pairs()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_flatten_nested_array_without_prefix() {
        let payload = flatten(&json!({"a": {"b": [1, 2]}}), None);
        assert_eq!(pairs(&payload), vec![("a.b[0]", "1"), ("a.b[1]", "2")]);
    }

    #[test]
    fn test_flatten_nested_array_with_prefix() {
        let payload = flatten(&json!({"a": {"b": [1, 2]}}), Some("x"));
        assert_eq!(pairs(&payload), vec![("x.a.b[0]", "1"), ("x.a.b[1]", "2")]);
    }

    #[test]
    fn test_flatten_skips_nulls() {
        let payload = flatten(
            &json!({"name": "Card", "mission": null, "meta": {"owner": null}, "tags": [null, "a"]}),
            Some("scorecard"),
        );
        assert_eq!(
            pairs(&payload),
            vec![("scorecard.name", "Card"), ("scorecard.tags[1]", "a")]
        );
    }

    #[test]
    fn test_flatten_objects_inside_arrays() {
        let payload = flatten(
            &json!({"perspectives": [{"name": "Finance", "weight": 25.5, "active": true}]}),
            None,
        );
        assert_eq!(payload.get("perspectives[0].name"), Some("Finance"));
        assert_eq!(payload.get("perspectives[0].weight"), Some("25.5"));
        assert_eq!(payload.get("perspectives[0].active"), Some("true"));
    }

    #[test]
    fn test_flatten_empty_prefix_is_ignored() {
        let payload = flatten(&json!({"oid": "1"}), Some(""));
        assert_eq!(pairs(&payload), vec![("oid", "1")]);
    }

    #[test]
    fn test_flatten_root_scalar() {
        assert!(flatten(&json!("x"), None).is_empty());
        assert_eq!(pairs(&flatten(&json!("x"), Some("p"))), vec![("p", "x")]);
    }

    #[test]
    fn test_multipart_from_record() {
        let record = match json!({
            "name": "Card",
            "count": 3,
            "missing": null,
            "perspectives": [{"name": "Finance"}, "plain"],
            "meta": {"a": 1}
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let payload = MultipartPayload::from_record(&record);
        assert_eq!(payload.get("name").and_then(Part::as_text), Some("Card"));
        assert_eq!(payload.get("count").and_then(Part::as_text), Some("3"));
        assert!(payload.get("missing").is_none());
        assert_eq!(
            payload.get("perspectives[0]").and_then(Part::as_text),
            Some(r#"{"name":"Finance"}"#)
        );
        assert_eq!(payload.get("perspectives[1]").and_then(Part::as_text), Some("plain"));
        assert_eq!(payload.get("meta").and_then(Part::as_text), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_multipart_from_record_prefixed() {
        let record = match json!({"name": "Card", "tags": ["a"], "mission": null}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let payload = MultipartPayload::from_record_prefixed(&record, Some("scorecard"));
        assert_eq!(payload.get("scorecard.name").and_then(Part::as_text), Some("Card"));
        assert_eq!(payload.get("scorecard.tags[0]").and_then(Part::as_text), Some("a"));
        assert!(payload.get("name").is_none());
        assert_eq!(payload.len(), 2);

        let bare = MultipartPayload::from_record_prefixed(&record, Some(""));
        assert_eq!(bare.get("name").and_then(Part::as_text), Some("Card"));
    }

    #[test]
    fn test_multipart_file_attached_as_is() {
        let payload = MultipartPayload::new()
            .text("kpiOid", "k1")
            .with_file("upload", FilePart::new("a.txt", b"hello".to_vec()).with_content_type("text/plain"));

        match payload.get("upload") {
            Some(Part::File(file)) => {
                assert_eq!(file.file_name, "a.txt");
                assert_eq!(file.bytes, b"hello");
                assert_eq!(file.content_type.as_deref(), Some("text/plain"));
            }
            other => panic!("expected file part, got {:?}", other),
        }
        assert_eq!(payload.len(), 2);
    }
}
