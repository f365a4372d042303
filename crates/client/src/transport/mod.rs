//! Transport seam between [`ApiClient`](crate::ApiClient) and the network.
//!
//! The client builds an [`ApiRequest`] (method, absolute URL, headers, body,
//! timeout) and hands it to a [`Transport`]. [`ReqwestTransport`] performs
//! real HTTP; [`MemoryTransport`] answers from scripted replies so the
//! services and session core can be exercised without a backend.

mod http;
pub mod memory;
mod multipart;

pub use http::ReqwestTransport;
pub use memory::{MemoryTransport, MockReply};
pub use multipart::{FileUpload, MultipartForm, MultipartPart, PartValue};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;

use crate::error::ApiError;

/// Executes requests built by the API client.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Send one request and return the raw response.
    ///
    /// Implementations return `Ok` for any HTTP status; interpreting the
    /// status is the client's job.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

/// A fully resolved outgoing request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL (base URL + endpoint).
    pub url: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub timeout: Duration,
}

/// Request payload.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// JSON document; the client has already set `Content-Type`.
    Json(serde_json::Value),
    /// Form upload; the transport chooses the boundary and `Content-Type`.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// JSON payload, if this is a JSON body.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Multipart payload, if this is a form upload.
    #[must_use]
    pub const fn as_multipart(&self) -> Option<&MultipartForm> {
        match self {
            Self::Multipart(form) => Some(form),
            _ => None,
        }
    }
}

/// Status, content type and body of a response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Whether the response declares a JSON body (`application/json`,
    /// `application/problem+json`, ...).
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type.as_deref().is_some_and(|ct| {
            let mime = ct.split(';').next().unwrap_or_default().trim();
            mime.eq_ignore_ascii_case("application/json")
                || mime.to_ascii_lowercase().ends_with("+json")
        })
    }
}
