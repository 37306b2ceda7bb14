//! HTTP transport seam
//!
//! Facade methods build an [`ApiRequest`] and hand it to a [`Transport`].
//! [`HttpTransport`] is the reqwest-backed implementation; tests can inject
//! their own.

use async_trait::async_trait;
use hillfog_core::{FormPayload, MultipartPayload, Part};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Request body, always chosen explicitly by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded`
    Form(FormPayload),
    /// `multipart/form-data`
    Multipart(MultipartPayload),
}

/// One outgoing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute action path, e.g. `/kpi/query.action`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn with_form(mut self, form: FormPayload) -> Self {
        self.body = RequestBody::Form(form);
        self
    }

    pub fn with_multipart(mut self, multipart: MultipartPayload) -> Self {
        self.body = RequestBody::Multipart(multipart);
        self
    }
}

/// Status and raw body of a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends requests to the backend
///
/// Implementations return `Err` only when no reply was received at all;
/// every HTTP status, including errors, comes back as a [`RawResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse>;
}

/// reqwest-backed transport with a cookie jar for the session cookie
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| ApiError::Unknown(format!("Invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Unknown(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::Unknown(format!("Failed to build request: {}", err))
    } else {
        ApiError::NetworkUnreachable(err.to_string())
    }
}

fn multipart_form(payload: MultipartPayload) -> ApiResult<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for (name, part) in payload.into_parts() {
        form = match part {
            Part::Text(text) => form.text(name, text),
            Part::File(file) => {
                let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
                if let Some(content_type) = &file.content_type {
                    part = part
                        .mime_str(content_type)
                        .map_err(|e| ApiError::Unknown(format!("Invalid content type {:?}: {}", content_type, e)))?;
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        let url = self.config.url(&request.path);
        tracing::debug!("Request: {} {}", request.method.as_str(), url);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(form) => builder.form(&form.into_pairs()),
            RequestBody::Multipart(multipart) => builder.multipart(multipart_form(multipart)?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::error!("No response from {}: {}", url, e);
            transport_error(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        tracing::debug!("Response: {} {} ({} bytes)", status, request.path, body.len());

        Ok(RawResponse { status, body })
    }
}
