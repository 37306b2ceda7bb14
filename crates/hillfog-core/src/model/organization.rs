use serde::{Deserialize, Serialize};

use super::{de, Audit, Entity};

/// Department node; `children` nests the sub-departments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub dept_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub manager_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "de::vec_or_null")]
    pub children: Vec<Organization>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Entity for Organization {
    const MODULE: &'static str = "organization";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Organization {
    /// This node and all descendants, depth-first.
    pub fn walk(&self) -> Vec<&Organization> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}
