use serde::{Deserialize, Serialize};

use super::{de, Audit, Entity};

/// Plan-do-check-act improvement cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdcaCycle {
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub kind: Option<String>,
    /// `PLAN`, `DO`, `CHECK` or `ACT`
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub do_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_content: Option<String>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Entity for PdcaCycle {
    const MODULE: &'static str = "pdca";

    fn id(&self) -> &str {
        &self.id
    }
}
