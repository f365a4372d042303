//! Real HTTP transport backed by `reqwest`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

use super::multipart::{MultipartForm, PartValue};
use super::{ApiRequest, RawResponse, RequestBody, Transport};
use crate::error::ApiError;

/// [`Transport`] that performs real HTTP requests.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest` client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport around an existing client (proxies, TLS roots, ...).
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .timeout(request.timeout);

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let body =
                    serde_json::to_vec(&value).map_err(|e| ApiError::Encode(e.to_string()))?;
                builder.body(body)
            }
            RequestBody::Multipart(form) => builder.multipart(to_reqwest_form(form)?),
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        debug!(status, bytes = body.len(), "response received");

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_builder() {
        ApiError::InvalidUrl(err.to_string())
    } else {
        ApiError::Network(err.to_string())
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<reqwest::multipart::Form, ApiError> {
    let mut out = reqwest::multipart::Form::new();
    for part in form.parts() {
        out = match &part.value {
            PartValue::Text(text) => out.text(part.name.clone(), text.clone()),
            PartValue::File(file) => {
                let file_part = reqwest::multipart::Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime_type)
                    .map_err(|e| ApiError::Encode(e.to_string()))?;
                out.part(part.name.clone(), file_part)
            }
        };
    }
    Ok(out)
}
