use serde::{Deserialize, Serialize};

use super::{de, Audit, Entity};
use crate::mapper::{date, Frequency};

/// One measured KPI value for a period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureData {
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub kpi_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub key_result_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_string")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Entity for MeasureData {
    const MODULE: &'static str = "measureData";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Selector for the measure-data body of one KPI and period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureDataQuery {
    pub kpi_oid: String,
    /// Period date, ISO-8601 or legacy `YYYY-MM-DD HH:MM:SS`
    pub date: String,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl MeasureDataQuery {
    pub fn new(kpi_oid: impl Into<String>, date: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            kpi_oid: kpi_oid.into(),
            date: date.into(),
            frequency,
            employee_id: None,
            organization_id: None,
        }
    }

    pub fn employee(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    pub fn organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Wire query pairs. The date is sent in legacy form when it parses and
    /// verbatim otherwise.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let date = date::encode(&self.date).unwrap_or_else(|| self.date.clone());
        let mut pairs = vec![
            ("kpiOid".to_string(), self.kpi_oid.clone()),
            ("date".to_string(), date),
            ("frequency".to_string(), self.frequency.code().to_string()),
        ];
        if let Some(employee) = &self.employee_id {
            pairs.push(("employeeId".to_string(), employee.clone()));
        }
        if let Some(organization) = &self.organization_id {
            pairs.push(("organizationId".to_string(), organization.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let query = MeasureDataQuery::new("k1", "2024-05-01T00:00:00.000Z", Frequency::Monthly);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("kpiOid".to_string(), "k1".to_string()),
                ("date".to_string(), "2024-05-01 00:00:00".to_string()),
                ("frequency".to_string(), "M".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_optional_scopes() {
        let pairs = MeasureDataQuery::new("k1", "2024", Frequency::Yearly)
            .employee("e1")
            .to_pairs();
        assert_eq!(pairs[1].1, "2024");
        assert_eq!(pairs[3], ("employeeId".to_string(), "e1".to_string()));
        assert_eq!(pairs.len(), 4);
    }
}
