use serde::{Deserialize, Serialize};

use super::{de, Audit, Entity};
use crate::transform::FieldRename;

/// KPI keys whose wire names differ from their canonical names.
///
/// The legacy `id` column is the business key; the surrogate key travels as
/// `oid` like every other record.
pub const KPI_RENAMES: &[FieldRename] = &[
    FieldRename::plain(&["id"], "kpiId"),
    FieldRename::plain(&["forId"], "formulaId"),
    FieldRename::plain(&["aggrId"], "aggregationId"),
];

/// Key performance indicator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub kpi_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub formula_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub aggregation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quasi_range: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Entity for Kpi {
    const MODULE: &'static str = "kpi";
    const RENAMES: &'static [FieldRename] = KPI_RENAMES;

    fn id(&self) -> &str {
        &self.id
    }
}
