use hillfog_core::{Entity, MeasureData, MeasureDataQuery, MultipartPayload, Page};
use serde_json::Value;

use super::{action_path, from_wire, to_wire, HillfogClient};
use crate::error::{ApiError, ApiResult};
use crate::transport::ApiRequest;

/// Measure-data body queries and batch updates
pub struct MeasureDataApi<'a> {
    client: &'a HillfogClient,
}

impl<'a> MeasureDataApi<'a> {
    pub fn new(client: &'a HillfogClient) -> Self {
        Self { client }
    }

    /// `GET /measureData/body.action`
    pub async fn query(&self, query: &MeasureDataQuery) -> ApiResult<Page<MeasureData>> {
        let request = ApiRequest::get(action_path(MeasureData::MODULE, "body")).with_query(query.to_pairs());
        let (items, total) = self.client.execute(request).await?.into_page();

        let transformer = MeasureData::transformer();
        let items = items
            .into_iter()
            .map(|item| from_wire(&transformer, "measure data", item))
            .collect::<ApiResult<Vec<MeasureData>>>()?;
        Ok(Page::new(items, total))
    }

    /// `POST /measureData/update.action`, one `measureDatas[i]` JSON part per
    /// record
    pub async fn update(&self, records: &[MeasureData]) -> ApiResult<()> {
        if records.is_empty() {
            return Err(ApiError::validation(Some("No measure data to update"), Value::Null));
        }

        let transformer = MeasureData::transformer();
        let mut parts = MultipartPayload::new();
        for (i, record) in records.iter().enumerate() {
            let wire = to_wire(&transformer, record)?;
            parts.push_text(format!("measureDatas[{}]", i), Value::Object(wire).to_string());
        }

        let request = ApiRequest::post(action_path(MeasureData::MODULE, "update")).with_multipart(parts);
        self.client.execute(request).await?;
        Ok(())
    }
}
