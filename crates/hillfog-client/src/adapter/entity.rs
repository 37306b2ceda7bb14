use hillfog_core::{Entity, FormPayload, Page, QueryParams};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

use super::{action_path, from_wire, to_wire, Encoding, HillfogClient};
use crate::error::ApiResult;
use crate::transport::ApiRequest;

/// CRUD over one entity's `/<module>/*.action` endpoints
pub struct EntityApi<'a, E: Entity> {
    client: &'a HillfogClient,
    encoding: Encoding,
    _entity: PhantomData<E>,
}

impl<'a, E: Entity> EntityApi<'a, E> {
    pub fn new(client: &'a HillfogClient, encoding: Encoding) -> Self {
        Self {
            client,
            encoding,
            _entity: PhantomData,
        }
    }

    /// Unprefixed form-encoded writes (`name=...`, `oid=...`)
    pub fn with_form(client: &'a HillfogClient) -> Self {
        Self::new(client, Encoding::Form { prefix: None })
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub(crate) fn client(&self) -> &'a HillfogClient {
        self.client
    }

    pub(crate) fn path(&self, operation: &str) -> String {
        action_path(E::MODULE, operation)
    }

    fn decode(&self, value: Value) -> ApiResult<E> {
        from_wire(&E::transformer(), E::MODULE, value)
    }

    /// `GET /<module>/get.action?oid=<id>`
    pub async fn get(&self, id: &str) -> ApiResult<E> {
        let request = ApiRequest::get(self.path("get")).with_query(vec![("oid".to_string(), id.to_string())]);
        let value = self.client.execute(request).await?.into_value();
        self.decode(value)
    }

    /// `GET /<module>/query.action` with paging, search and sort
    pub async fn list(&self, params: &QueryParams) -> ApiResult<Page<E>> {
        let request = ApiRequest::get(self.path("query")).with_query(params.to_pairs(self.client.config().max_page_size));
        let (items, total) = self.client.execute(request).await?.into_page();

        let items = items
            .into_iter()
            .map(|item| self.decode(item))
            .collect::<ApiResult<Vec<E>>>()?;
        Ok(Page::new(items, total))
    }

    /// First page with the configured default page size
    pub async fn list_default(&self) -> ApiResult<Page<E>> {
        let params = QueryParams::new().page_size(self.client.config().default_page_size);
        self.list(&params).await
    }

    /// `POST /<module>/save.action`
    pub async fn create(&self, payload: &impl Serialize) -> ApiResult<E> {
        let wire = to_wire(&E::transformer(), payload)?;
        self.write("save", Value::Object(wire)).await
    }

    /// `POST /<module>/update.action`; `id` overrides any id in the payload.
    pub async fn update(&self, id: &str, payload: &impl Serialize) -> ApiResult<E> {
        let mut wire = to_wire(&E::transformer(), payload)?;
        wire.insert("oid".to_string(), Value::String(id.to_string()));
        self.write("update", Value::Object(wire)).await
    }

    /// `POST /<module>/delete.action` with `oid=<id>`
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let request = ApiRequest::post(self.path("delete")).with_form(FormPayload::new().with("oid", id));
        self.client.execute(request).await?;
        Ok(())
    }

    async fn write(&self, operation: &str, wire: Value) -> ApiResult<E> {
        let body = self.encoding.encode(wire)?;
        let mut request = ApiRequest::post(self.path(operation));
        request.body = body;

        tracing::debug!("{} {}", operation, E::MODULE);
        let value = self.client.execute(request).await?.into_value();
        self.decode(value)
    }
}
