use hillfog_core::{Entity, Kpi};
use serde_json::Value;
use std::collections::BTreeMap;

use super::{from_wire, EntityApi};
use crate::error::{ApiError, ApiResult};
use crate::transport::ApiRequest;

impl EntityApi<'_, Kpi> {
    /// `GET /kpi/findMap.action`: every KPI keyed by its canonical id
    ///
    /// Accepts either an object keyed by oid or a plain list.
    pub async fn find_map(&self) -> ApiResult<BTreeMap<String, Kpi>> {
        let request = ApiRequest::get(self.path("findMap"));
        let value = self.client().execute(request).await?.into_value();
        let transformer = Kpi::transformer();

        let entries: Vec<(Option<String>, Value)> = match value {
            Value::Object(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
            Value::Array(items) => items.into_iter().map(|v| (None, v)).collect(),
            Value::Null => Vec::new(),
            other => {
                return Err(ApiError::Unknown(format!(
                    "KPI map must be an object or array, found {}",
                    hillfog_core::error::json_kind(&other)
                )))
            }
        };

        let mut kpis = BTreeMap::new();
        for (key, value) in entries {
            let kpi: Kpi = from_wire(&transformer, "kpi", value)?;
            let key = if kpi.id.is_empty() { key.unwrap_or_default() } else { kpi.id.clone() };
            kpis.insert(key, kpi);
        }
        Ok(kpis)
    }
}
