//! Shallow entity transformer between wire records and canonical records
//!
//! Decoding runs in two passes over the top-level keys of one record:
//!
//! 1. key renames (entity-specific rules first, then the generic
//!    `oid -> id`, `cdateString|cdate -> createdDate`, ... rules). A rename is
//!    skipped when the canonical key is already present, and the legacy keys
//!    are always dropped, so `oid` and `id` never coexist in canonical form.
//! 2. value mappers applied to fixed field allowlists.
//!
//! Encoding mirrors this in reverse order. The two directions are not exact
//! inverses: legacy-only keys are dropped on decode, and only the fields both
//! directions recognize survive `decode(encode(x))` unchanged. The wire
//! timestamp has whole-second precision, so canonical dates come back with
//! `.000` milliseconds (`03:04:05.250Z` -> `03:04:05.000Z`).
//!
//! Nested records are left untouched; callers iterate child collections and
//! transform each element on its own.

use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::mapper::{boolean, codes, date, number, text, CodeTable};
use crate::Record;

/// How a renamed value is carried across
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameKind {
    /// Value is copied unchanged
    Plain,
    /// Identifier: numbers are stringified on decode
    Key,
    /// Legacy timestamp <-> ISO-8601
    Date,
}

/// One wire <-> canonical key rename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRename {
    /// Wire keys in priority order; the first one is emitted on encode
    pub wire: &'static [&'static str],
    pub canonical: &'static str,
    pub kind: RenameKind,
}

impl FieldRename {
    pub const fn plain(wire: &'static [&'static str], canonical: &'static str) -> Self {
        Self {
            wire,
            canonical,
            kind: RenameKind::Plain,
        }
    }

    pub const fn key(wire: &'static [&'static str], canonical: &'static str) -> Self {
        Self {
            wire,
            canonical,
            kind: RenameKind::Key,
        }
    }

    pub const fn date(wire: &'static [&'static str], canonical: &'static str) -> Self {
        Self {
            wire,
            canonical,
            kind: RenameKind::Date,
        }
    }

    fn decode(&self, record: &mut Record) {
        let mut found = None;
        for key in self.wire {
            if let Some(value) = record.remove(*key) {
                if found.is_none() && !value.is_null() {
                    found = Some(value);
                }
            }
        }

        if record.contains_key(self.canonical) {
            return;
        }

        let Some(value) = found else { return };
        let decoded = match self.kind {
            RenameKind::Plain => Some(value),
            RenameKind::Key => Some(key_to_string(value)),
            RenameKind::Date => date::decode_value(&value).map(Value::String),
        };

        if let Some(decoded) = decoded {
            record.insert(self.canonical.to_string(), decoded);
        }
    }

    fn encode(&self, record: &mut Record) {
        let Some(value) = record.remove(self.canonical) else {
            return;
        };

        if value.is_null() || self.wire.iter().any(|k| record.contains_key(*k)) {
            return;
        }

        let encoded = match self.kind {
            RenameKind::Plain | RenameKind::Key => Some(value),
            RenameKind::Date => value.as_str().and_then(date::encode).map(Value::String),
        };

        if let (Some(encoded), Some(wire_key)) = (encoded, self.wire.first()) {
            record.insert((*wire_key).to_string(), encoded);
        }
    }
}

fn key_to_string(value: Value) -> Value {
    match value {
        Value::Number(n) => Value::String(n.to_string()),
        other => other,
    }
}

/// Renames shared by every Hillfog entity.
pub const GENERIC_RENAMES: &[FieldRename] = &[
    FieldRename::key(&["oid"], "id"),
    FieldRename::date(&["cdateString", "cdate"], "createdDate"),
    FieldRename::date(&["udateString", "udate"], "updatedDate"),
    FieldRename::plain(&["cuserid"], "createdBy"),
    FieldRename::plain(&["uuserid"], "updatedBy"),
];

/// Fields decoded from numeric strings
pub const NUMERIC_FIELDS: &[&str] = &[
    "weight",
    "target",
    "max",
    "min",
    "actual",
    "score",
    "quasiRange",
    "progress",
    "level",
];

/// Fields decoded from legacy `Y`/`N` flags
pub const BOOLEAN_FIELDS: &[&str] = &["active", "enabled", "visible"];

/// Period bounds carried in the legacy timestamp format
pub const DATE_FIELDS: &[&str] = &["startDate", "endDate"];

/// Free-text fields trimmed on decode
pub const TEXT_FIELDS: &[&str] = &["name", "description", "content", "mission", "unit"];

/// Fields mapped through a code table
pub const CODE_FIELDS: &[(&str, CodeTable)] = &[
    ("frequency", codes::FREQUENCY),
    ("management", codes::MANAGEMENT),
    ("compareType", codes::COMPARE_TYPE),
    ("dataType", codes::DATA_TYPE),
];

fn code_table(field: &str) -> Option<&'static CodeTable> {
    CODE_FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, table)| table)
}

/// Wire <-> canonical record translator
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityTransformer {
    renames: &'static [FieldRename],
}

impl EntityTransformer {
    /// Transformer with only the generic rules
    pub const fn new() -> Self {
        Self { renames: &[] }
    }

    /// Transformer with entity-specific renames on top of the generic rules
    pub const fn with_renames(renames: &'static [FieldRename]) -> Self {
        Self { renames }
    }

    pub fn renames(&self) -> &'static [FieldRename] {
        self.renames
    }

    /// Wire record -> canonical record
    pub fn decode(&self, mut record: Record) -> Record {
        for rule in self.renames.iter().chain(GENERIC_RENAMES) {
            rule.decode(&mut record);
        }

        for (key, value) in record.iter_mut() {
            let field = key.as_str();
            if NUMERIC_FIELDS.contains(&field) {
                *value = number::to_json(number::decode(value));
            } else if BOOLEAN_FIELDS.contains(&field) {
                *value = Value::Bool(boolean::decode(value));
            } else if DATE_FIELDS.contains(&field) {
                *value = date::decode_value(value).map(Value::String).unwrap_or(Value::Null);
            } else if TEXT_FIELDS.contains(&field) {
                *value = text::clean(value);
            } else if let Some(table) = code_table(field) {
                *value = table.decode_value(value);
            }
        }

        record
    }

    /// Canonical record -> wire record
    pub fn encode(&self, mut record: Record) -> Record {
        for (key, value) in record.iter_mut() {
            let field = key.as_str();
            if NUMERIC_FIELDS.contains(&field) {
                *value = number::encode_value(value);
            } else if BOOLEAN_FIELDS.contains(&field) {
                *value = boolean::encode_value(value);
            } else if DATE_FIELDS.contains(&field) {
                if let Some(encoded) = value.as_str().and_then(date::encode) {
                    *value = Value::String(encoded);
                }
            } else if let Some(table) = code_table(field) {
                *value = table.encode_value(value);
            }
        }

        for rule in GENERIC_RENAMES.iter().chain(self.renames) {
            rule.encode(&mut record);
        }

        record
    }

    /// Decode a JSON value that must be an object.
    pub fn decode_value(&self, value: Value) -> Result<Record> {
        match value {
            Value::Object(record) => Ok(self.decode(record)),
            other => Err(CoreError::invalid_shape("object", &other)),
        }
    }

    /// Encode a JSON value that must be an object.
    pub fn encode_value(&self, value: Value) -> Result<Record> {
        match value {
            Value::Object(record) => Ok(self.encode(record)),
            other => Err(CoreError::invalid_shape("object", &other)),
        }
    }
}

/// Decode with the generic rules only.
pub fn decode(record: Record) -> Record {
    EntityTransformer::new().decode(record)
}

/// Encode with the generic rules only.
pub fn encode(record: Record) -> Record {
    EntityTransformer::new().encode(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_decode_basic_scenario() {
        let wire = record(json!({
            "oid": "7",
            "cdateString": "2024-01-02 03:04:05",
            "weight": "10.5"
        }));

        let canonical = decode(wire);
        assert_eq!(
            Value::Object(canonical),
            json!({
                "id": "7",
                "createdDate": "2024-01-02T03:04:05.000Z",
                "weight": 10.5
            })
        );
    }

    #[test]
    fn test_decode_prefers_cdate_string_and_drops_legacy_keys() {
        let wire = record(json!({
            "oid": "1",
            "cdate": "20200101000000",
            "cdateString": "2021-06-15 12:00:00",
            "udate": "20220202020202"
        }));

        let canonical = decode(wire);
        assert_eq!(canonical["createdDate"], json!("2021-06-15T12:00:00.000Z"));
        assert_eq!(canonical["updatedDate"], json!("2022-02-02T02:02:02.000Z"));
        assert!(!canonical.contains_key("cdate"));
        assert!(!canonical.contains_key("cdateString"));
        assert!(!canonical.contains_key("udate"));
    }

    #[test]
    fn test_decode_never_emits_oid_alongside_id() {
        let wire = record(json!({"oid": "wire-oid", "id": "already-there"}));

        let canonical = decode(wire);
        assert_eq!(canonical["id"], json!("already-there"));
        assert!(!canonical.contains_key("oid"));
    }

    #[test]
    fn test_decode_numeric_oid_is_stringified() {
        let canonical = decode(record(json!({"oid": 42})));
        assert_eq!(canonical["id"], json!("42"));
    }

    #[test]
    fn test_decode_unparsable_date_is_absent() {
        let canonical = decode(record(json!({"oid": "1", "cdateString": "yesterday"})));
        assert!(!canonical.contains_key("createdDate"));
        assert!(!canonical.contains_key("cdateString"));
    }

    #[test]
    fn test_decode_field_mappers() {
        let wire = record(json!({
            "target": "abc",
            "actual": null,
            "active": "y",
            "visible": "N",
            "name": "  Revenue  ",
            "frequency": "Q",
            "management": "1",
            "compareType": "7",
            "dataType": "2",
            "untouched": " keep me "
        }));

        let canonical = decode(wire);
        assert_eq!(canonical["target"], json!(0));
        assert_eq!(canonical["actual"], json!(0));
        assert_eq!(canonical["active"], json!(true));
        assert_eq!(canonical["visible"], json!(false));
        assert_eq!(canonical["name"], json!("Revenue"));
        assert_eq!(canonical["frequency"], json!("Quarterly"));
        assert_eq!(canonical["management"], json!("Higher is better"));
        assert_eq!(canonical["compareType"], json!("7"));
        assert_eq!(canonical["dataType"], json!("Percentage"));
        assert_eq!(canonical["untouched"], json!(" keep me "));
    }

    #[test]
    fn test_encode_reverses_recognized_fields() {
        let canonical = record(json!({
            "id": "7",
            "createdDate": "2024-01-02T03:04:05.000Z",
            "weight": 10.5,
            "active": true,
            "frequency": "Monthly"
        }));

        let wire = encode(canonical);
        assert_eq!(
            Value::Object(wire),
            json!({
                "oid": "7",
                "cdateString": "2024-01-02 03:04:05",
                "weight": "10.5",
                "active": "Y",
                "frequency": "M"
            })
        );
    }

    #[test]
    fn test_encode_does_not_overwrite_existing_wire_key() {
        let wire = encode(record(json!({"id": "canonical", "oid": "wire"})));
        assert_eq!(wire["oid"], json!("wire"));
        assert!(!wire.contains_key("id"));
    }

    #[test]
    fn test_entity_specific_renames_run_around_generic_rules() {
        const KPI_RENAMES: &[FieldRename] = &[
            FieldRename::plain(&["id"], "kpiId"),
            FieldRename::plain(&["forId"], "formulaId"),
        ];
        let transformer = EntityTransformer::with_renames(KPI_RENAMES);

        let wire = record(json!({"oid": "k1", "id": "KPI-001", "forId": "F1"}));
        let canonical = transformer.decode(wire.clone());
        assert_eq!(
            Value::Object(canonical.clone()),
            json!({"id": "k1", "kpiId": "KPI-001", "formulaId": "F1"})
        );

        assert_eq!(transformer.encode(canonical), wire);
    }

    #[test]
    fn test_decode_progress_and_level_from_strings() {
        let canonical = decode(record(json!({"progress": "50", "level": " 2 ", "weight": "12.5"})));
        assert_eq!(canonical["progress"], json!(50));
        assert_eq!(canonical["level"], json!(2));
        assert_eq!(canonical["weight"], json!(12.5));

        let wire = encode(canonical);
        assert_eq!(wire["progress"], json!("50"));
        assert_eq!(wire["level"], json!("2"));
    }

    #[test]
    fn test_period_dates_use_the_date_mapper() {
        let canonical = decode(record(json!({
            "startDate": "2024-01-01 00:00:00",
            "endDate": "20241231235959"
        })));
        assert_eq!(canonical["startDate"], json!("2024-01-01T00:00:00.000Z"));
        assert_eq!(canonical["endDate"], json!("2024-12-31T23:59:59.000Z"));

        let wire = encode(canonical);
        assert_eq!(wire["startDate"], json!("2024-01-01 00:00:00"));
        assert_eq!(wire["endDate"], json!("2024-12-31 23:59:59"));
    }

    #[test]
    fn test_unparsable_period_date_decodes_to_null() {
        let canonical = decode(record(json!({"startDate": "someday"})));
        assert_eq!(canonical["startDate"], Value::Null);
    }

    #[test]
    fn test_date_milliseconds_are_truncated_by_the_wire() {
        let canonical = record(json!({"id": "1", "createdDate": "2024-01-02T03:04:05.250Z"}));
        let back = decode(encode(canonical));
        assert_eq!(back["createdDate"], json!("2024-01-02T03:04:05.000Z"));
    }

    #[test]
    fn test_decode_value_rejects_non_objects() {
        let err = EntityTransformer::new().decode_value(json!([1])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidShape { .. }));
    }
}
