//! Low-level HTTP client for the Crew Lounge REST API.
//!
//! [`ApiClient`] joins endpoints onto the configured base URL, attaches the
//! JSON content type and (on request) the bearer token, enforces the request
//! timeout and turns every response into an [`Envelope`] or an [`ApiError`].
//! It never touches session state.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, FileCredentialStore};
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::transport::{
    ApiRequest, MultipartForm, RawResponse, RequestBody, ReqwestTransport, Transport,
};

/// Whether a request carries the stored bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Auth {
    #[default]
    Anonymous,
    /// Attach `Authorization: Bearer <token>` when a token is stored.
    Bearer,
}

/// Crew Lounge REST client.
///
/// Cheap to clone; clones share the transport and credential store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: String,
    request_timeout: Duration,
    logout_timeout: Duration,
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("request_timeout", &self.inner.request_timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client over an explicit transport and credential store.
    #[must_use]
    pub fn new(
        config: &ClientConfig,
        transport: impl Transport,
        credentials: impl CredentialStore,
    ) -> Self {
        Self::with_shared(config, Arc::new(transport), Arc::new(credentials))
    }

    /// Like [`ApiClient::new`], for callers that keep their own handle on
    /// the transport or store.
    #[must_use]
    pub fn with_shared(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                base_url: config.base_url().to_string(),
                request_timeout: config.request_timeout,
                logout_timeout: config.logout_timeout,
                transport,
                credentials,
            }),
        }
    }

    /// Real HTTP client persisting the token in `config.token_file`.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config,
            ReqwestTransport::new(),
            FileCredentialStore::new(config.token_file.clone()),
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Time budget for the remote half of logout.
    #[must_use]
    pub fn logout_timeout(&self) -> Duration {
        self.inner.logout_timeout
    }

    /// The store the bearer token is read from.
    #[must_use]
    pub fn credentials(&self) -> &dyn CredentialStore {
        self.inner.credentials.as_ref()
    }

    /// `GET endpoint`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        auth: Auth,
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(Method::GET, endpoint, RequestBody::Empty, auth, None)
            .await
    }

    /// `POST endpoint` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn post<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        auth: Auth,
    ) -> Result<Envelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, endpoint, json_body(body)?, auth, None)
            .await
    }

    /// `PUT endpoint` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn put<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        auth: Auth,
    ) -> Result<Envelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PUT, endpoint, json_body(body)?, auth, None)
            .await
    }

    /// `DELETE endpoint`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        auth: Auth,
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(Method::DELETE, endpoint, RequestBody::Empty, auth, None)
            .await
    }

    /// `POST endpoint` as `multipart/form-data`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: MultipartForm,
        auth: Auth,
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(Method::POST, endpoint, RequestBody::Multipart(form), auth, None)
            .await
    }

    /// `PUT endpoint` as `multipart/form-data`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: MultipartForm,
        auth: Auth,
    ) -> Result<Envelope<T>, ApiError> {
        self.execute(Method::PUT, endpoint, RequestBody::Multipart(form), auth, None)
            .await
    }

    /// Send a request and decode its envelope.
    ///
    /// `timeout` overrides the configured request timeout for this call.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] for a non-2xx status, carrying the body's
    ///   `error` (or `message`) field or `"API error: <status>"`
    /// - [`ApiError::Timeout`] / [`ApiError::Network`] from the transport
    /// - [`ApiError::Decode`] if a 2xx JSON body is not a valid envelope
    /// - [`ApiError::Credentials`] if the token cannot be read
    ///
    /// A 2xx envelope with `success: false` is returned as-is; callers fold
    /// it with [`Envelope::into_result`] or [`Envelope::into_data`].
    #[instrument(skip(self, body), fields(base_url = %self.inner.base_url))]
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
        auth: Auth,
        timeout: Option<Duration>,
    ) -> Result<Envelope<T>, ApiError> {
        let mut headers = HeaderMap::new();
        if !matches!(body, RequestBody::Multipart(_)) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if auth == Auth::Bearer {
            if let Some(token) = self.inner.credentials.get().await? {
                let value = HeaderValue::from_str(&token.bearer_header())
                    .map_err(|e| ApiError::Encode(format!("invalid token: {e}")))?;
                headers.insert(AUTHORIZATION, value);
            } else {
                debug!("no stored token, sending without Authorization");
            }
        }

        let request = ApiRequest {
            method,
            url: self.url(endpoint),
            headers,
            body,
            timeout: timeout.unwrap_or(self.inner.request_timeout),
        };

        let response = self.inner.transport.send(request).await?;
        debug!(status = response.status, "api response");
        interpret(&response)
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.inner.base_url)
        } else {
            format!("{}/{endpoint}", self.inner.base_url)
        }
    }
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, ApiError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

fn interpret<T: DeserializeOwned>(response: &RawResponse) -> Result<Envelope<T>, ApiError> {
    if !response.is_success() {
        return Err(http_error(response));
    }
    if response.is_json() && !response.body.is_empty() {
        Envelope::from_slice(&response.body)
    } else {
        Ok(Envelope::empty_success())
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

/// Error for a non-2xx response. The body is parsed as JSON whatever its
/// declared content type.
fn http_error(response: &RawResponse) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| {
            [body.error, body.message]
                .into_iter()
                .flatten()
                .find_map(|value| match value {
                    serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
                    _ => None,
                })
        })
        .unwrap_or_else(|| format!("API error: {}", response.status));

    ApiError::Http {
        status: response.status,
        message,
    }
}
