//! Canonical entity models
//!
//! Each persisted entity implements [`Entity`], which names the legacy action
//! module it lives under and any entity-specific key renames. Wire records are
//! converted with [`decode_tree`] / [`encode_tree`], which apply the shallow
//! transformer to the record itself and to every element of the known child
//! collections.

mod de;
mod kpi;
mod measure;
mod okr;
mod organization;
mod pdca;
mod people;
mod scorecard;

pub use kpi::{Kpi, KPI_RENAMES};
pub use measure::{MeasureData, MeasureDataQuery};
pub use okr::{KeyResult, Objective};
pub use organization::Organization;
pub use pdca::PdcaCycle;
pub use people::{Employee, User};
pub use scorecard::{Perspective, Scorecard, ScorecardColor};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::transform::{EntityTransformer, FieldRename};

/// A persisted Hillfog entity
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Action module, the first path segment of `/<module>/<op>.action`
    const MODULE: &'static str;

    /// Renames applied before the generic `oid -> id` family
    const RENAMES: &'static [FieldRename] = &[];

    fn transformer() -> EntityTransformer {
        EntityTransformer::with_renames(Self::RENAMES)
    }

    /// Canonical identifier
    fn id(&self) -> &str;
}

/// Audit fields carried by most records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub updated_by: Option<String>,
}

/// One page of a list query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Child collections walked on decode/encode, with the renames their
/// elements use.
pub const CHILD_COLLECTIONS: &[(&str, &[FieldRename])] = &[
    ("perspectives", &[]),
    ("objectives", &[]),
    ("keyResults", &[]),
    ("kpis", KPI_RENAMES),
    ("children", &[]),
    ("measureData", &[]),
];

fn child_renames(key: &str) -> Option<&'static [FieldRename]> {
    CHILD_COLLECTIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, renames)| *renames)
}

/// Wire value -> canonical value, recursing into known child collections.
///
/// Non-object values are returned unchanged.
pub fn decode_tree(transformer: &EntityTransformer, value: Value) -> Value {
    let Value::Object(record) = value else {
        return value;
    };

    let mut record = transformer.decode(record);
    for (key, child) in record.iter_mut() {
        if let Some(renames) = child_renames(key) {
            let nested = EntityTransformer::with_renames(renames);
            map_elements(child, |element| decode_tree(&nested, element));
        }
    }
    Value::Object(record)
}

/// Canonical value -> wire value, recursing into known child collections.
pub fn encode_tree(transformer: &EntityTransformer, value: Value) -> Value {
    let Value::Object(mut record) = value else {
        return value;
    };

    for (key, child) in record.iter_mut() {
        if let Some(renames) = child_renames(key) {
            let nested = EntityTransformer::with_renames(renames);
            map_elements(child, |element| encode_tree(&nested, element));
        }
    }
    Value::Object(transformer.encode(record))
}

fn map_elements(value: &mut Value, mut f: impl FnMut(Value) -> Value) {
    if let Value::Array(items) = value {
        for item in items.iter_mut() {
            *item = f(item.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_tree_walks_child_collections() {
        let wire = json!({
            "oid": "s1",
            "name": " Card ",
            "perspectives": [
                {"oid": "p1", "weight": "40", "objectives": [{"oid": "o1", "keyResults": [{"oid": "kr1", "target": "3"}]}]},
                {"oid": "p2", "kpis": [{"oid": "k1", "id": "KPI-1"}]}
            ]
        });

        let canonical = decode_tree(&Scorecard::transformer(), wire);
        assert_eq!(canonical["id"], json!("s1"));
        assert_eq!(canonical["name"], json!("Card"));
        assert_eq!(canonical["perspectives"][0]["id"], json!("p1"));
        assert_eq!(canonical["perspectives"][0]["weight"], json!(40));
        assert_eq!(
            canonical["perspectives"][0]["objectives"][0]["keyResults"][0],
            json!({"id": "kr1", "target": 3})
        );
        assert_eq!(
            canonical["perspectives"][1]["kpis"][0],
            json!({"id": "k1", "kpiId": "KPI-1"})
        );
    }

    #[test]
    fn test_encode_tree_reverses_children() {
        let canonical = json!({"id": "s1", "perspectives": [{"id": "p1", "weight": 25}]});
        let wire = encode_tree(&Scorecard::transformer(), canonical);
        assert_eq!(wire, json!({"oid": "s1", "perspectives": [{"oid": "p1", "weight": "25"}]}));
    }

    #[test]
    fn test_non_object_passes_through() {
        assert_eq!(decode_tree(&EntityTransformer::new(), json!([1, 2])), json!([1, 2]));
        assert_eq!(encode_tree(&EntityTransformer::new(), json!("x")), json!("x"));
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 10).map(|n| n * 2);
        assert_eq!(page.items, vec![2, 4, 6]);
        assert_eq!(page.total, 10);
    }
}
