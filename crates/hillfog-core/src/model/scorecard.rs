use serde::{Deserialize, Serialize};

use super::okr::Objective;
use super::{de, Audit, Entity};

/// Balanced scorecard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "de::vec_or_null")]
    pub perspectives: Vec<Perspective>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Entity for Scorecard {
    const MODULE: &'static str = "scorecard";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Scorecard perspective; only ever carried inside a [`Scorecard`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perspective {
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub scorecard_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "de::vec_or_null")]
    pub objectives: Vec<Objective>,
    #[serde(flatten)]
    pub audit: Audit,
}

/// Score range colour band of a scorecard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardColor {
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub scorecard_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::decode_tree;
    use serde_json::json;

    #[test]
    fn test_scorecard_from_wire() {
        let wire = json!({
            "oid": "s1",
            "name": "Corporate",
            "mission": " Grow ",
            "cdateString": "2024-03-01 08:00:00",
            "cuserid": "admin",
            "perspectives": [{"oid": "p1", "name": "Finance", "weight": "30"}]
        });

        let card: Scorecard = serde_json::from_value(decode_tree(&Scorecard::transformer(), wire)).unwrap();
        assert_eq!(card.id, "s1");
        assert_eq!(card.mission.as_deref(), Some("Grow"));
        assert_eq!(card.audit.created_date.as_deref(), Some("2024-03-01T08:00:00.000Z"));
        assert_eq!(card.audit.created_by.as_deref(), Some("admin"));
        assert_eq!(card.perspectives.len(), 1);
        assert_eq!(card.perspectives[0].weight, Some(30.0));
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let card = Scorecard {
            id: "s1".to_string(),
            name: Some("Corporate".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&card).unwrap(), json!({"id": "s1", "name": "Corporate"}));
    }

    #[test]
    fn test_color_min_max() {
        let color: ScorecardColor = serde_json::from_value(json!({"id": "c1", "min": 0, "max": 59.9, "color": "#FF4D4F"})).unwrap();
        assert_eq!(color.min, Some(0.0));
        assert_eq!(color.max, Some(59.9));
    }
}
