use hillfog_core::{EntityTransformer, FormPayload, Scorecard, ScorecardColor};
use serde_json::Value;

use super::{from_wire, to_wire, EntityApi};
use crate::error::ApiResult;
use crate::transport::ApiRequest;

impl EntityApi<'_, Scorecard> {
    /// `GET /scorecard/colorSettings.action?oid=<id>`
    pub async fn color_settings(&self, id: &str) -> ApiResult<Vec<ScorecardColor>> {
        let request = ApiRequest::get(self.path("colorSettings")).with_query(vec![("oid".to_string(), id.to_string())]);
        let (items, _) = self.client().execute(request).await?.into_page();

        let transformer = EntityTransformer::new();
        items
            .into_iter()
            .map(|item| from_wire(&transformer, "scorecard color", item))
            .collect()
    }

    /// `POST /scorecard/colorSettingsUpdate.action`, bands flattened under
    /// `colors[i].*`
    pub async fn update_color_settings(&self, id: &str, colors: &[ScorecardColor]) -> ApiResult<()> {
        let transformer = EntityTransformer::new();
        let wire = colors
            .iter()
            .map(|color| to_wire(&transformer, color).map(Value::Object))
            .collect::<ApiResult<Vec<Value>>>()?;

        let mut form = FormPayload::new().with("oid", id);
        for (key, value) in FormPayload::flatten(&Value::Array(wire), Some("colors")).into_pairs() {
            form.push(key, value);
        }

        let request = ApiRequest::post(self.path("colorSettingsUpdate")).with_form(form);
        self.client().execute(request).await?;
        Ok(())
    }
}
