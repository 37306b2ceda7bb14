//! Domain adapter facade
//!
//! [`HillfogClient`] is the single entry point. Every operation runs the same
//! pipeline: encode the canonical payload to wire form, serialize it with the
//! encoding the operation names, send it, classify and unwrap the reply, then
//! decode the wire payload into a typed entity.

mod entity;
mod kpi;
mod measure;
mod scorecard;

pub use entity::EntityApi;
pub use measure::MeasureDataApi;

use hillfog_core::model::{decode_tree, encode_tree};
use hillfog_core::{
    Employee, Entity, EntityTransformer, FormPayload, Kpi, MultipartPayload, Objective, Organization,
    PdcaCycle, Record, Scorecard,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::auth::AuthApi;
use crate::config::ClientConfig;
use crate::envelope::{classify, Normalized};
use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;
use crate::transport::{ApiRequest, HttpTransport, RequestBody, Transport};

/// How a write payload is put on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Flattened `application/x-www-form-urlencoded`, keys under an optional
    /// OGNL prefix
    Form { prefix: Option<&'static str> },
    /// `multipart/form-data` with part names under an optional OGNL prefix.
    /// The listed array fields are sent unprefixed as one JSON text part
    /// shaped `{"items": [...]}`.
    Multipart {
        prefix: Option<&'static str>,
        item_lists: &'static [&'static str],
    },
}

impl Encoding {
    pub fn encode(self, wire: Value) -> ApiResult<RequestBody> {
        match self {
            Encoding::Form { prefix } => Ok(RequestBody::Form(FormPayload::flatten(&wire, prefix))),
            Encoding::Multipart { prefix, item_lists } => {
                let mut record = into_record(wire)?;
                let mut lists = Vec::new();
                for field in item_lists {
                    if let Some(items) = record.remove(*field) {
                        let items = if items.is_null() { Value::Array(Vec::new()) } else { items };
                        lists.push((*field, serde_json::json!({ "items": items }).to_string()));
                    }
                }

                let mut payload = MultipartPayload::from_record_prefixed(&record, prefix);
                for (field, text) in lists {
                    payload.push_text(field, text);
                }
                Ok(RequestBody::Multipart(payload))
            }
        }
    }
}

/// `/<module>/<operation>.action`
pub fn action_path(module: &str, operation: &str) -> String {
    format!("/{}/{}.action", module, operation)
}

pub(crate) fn into_record(value: Value) -> ApiResult<Record> {
    match value {
        Value::Object(record) => Ok(record),
        other => Err(ApiError::Unknown(format!(
            "Payload must be a JSON object, found {}",
            hillfog_core::error::json_kind(&other)
        ))),
    }
}

/// Serialize a caller payload and convert it to wire form.
pub(crate) fn to_wire(transformer: &EntityTransformer, payload: &impl Serialize) -> ApiResult<Record> {
    let value = serde_json::to_value(payload).map_err(|e| ApiError::Unknown(format!("Failed to serialize payload: {}", e)))?;
    into_record(encode_tree(transformer, Value::Object(into_record(value)?)))
}

/// Wire value -> typed canonical value.
pub(crate) fn from_wire<T: DeserializeOwned>(transformer: &EntityTransformer, what: &str, value: Value) -> ApiResult<T> {
    serde_json::from_value(decode_tree(transformer, value)).map_err(|e| ApiError::decode(what, e))
}

/// Client for the Hillfog legacy backend
///
/// Cheap to clone; clones share the transport (and with it the connection
/// pool and cookie jar).
#[derive(Clone)]
pub struct HillfogClient {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
}

impl HillfogClient {
    /// Client over the default reqwest transport
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        config
            .validate()
            .map_err(|e| ApiError::Unknown(format!("Invalid client configuration: {}", e)))?;
        let transport = HttpTransport::new(config.clone())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Client over a caller-supplied transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one request and unwrap the reply.
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<Normalized> {
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        classify(response.status, &response.body, &path)
    }

    pub fn scorecards(&self) -> EntityApi<'_, Scorecard> {
        EntityApi::new(
            self,
            Encoding::Multipart {
                prefix: Some(Scorecard::MODULE),
                item_lists: &["perspectives"],
            },
        )
    }

    pub fn kpis(&self) -> EntityApi<'_, Kpi> {
        EntityApi::with_form(self)
    }

    pub fn employees(&self) -> EntityApi<'_, Employee> {
        EntityApi::with_form(self)
    }

    pub fn objectives(&self) -> EntityApi<'_, Objective> {
        EntityApi::with_form(self)
    }

    pub fn organizations(&self) -> EntityApi<'_, Organization> {
        EntityApi::with_form(self)
    }

    pub fn pdca_cycles(&self) -> EntityApi<'_, PdcaCycle> {
        EntityApi::with_form(self)
    }

    pub fn measure_data(&self) -> MeasureDataApi<'_> {
        MeasureDataApi::new(self)
    }

    pub fn auth(&self, store: Arc<dyn SessionStore>) -> AuthApi<'_> {
        AuthApi::new(self, store)
    }

    /// Generic accessor for any entity, using form encoding.
    pub fn entities<E: Entity>(&self) -> EntityApi<'_, E> {
        EntityApi::with_form(self)
    }
}

impl std::fmt::Debug for HillfogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HillfogClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
