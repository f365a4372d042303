//! The `{ success, data, error, token }` response envelope.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Response envelope returned by every backend endpoint.
///
/// A 2xx response may still be an application-level failure
/// (`success: false`); [`Envelope::into_result`] folds that case into
/// [`ApiError::Application`].
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    /// Whether the backend considers the call successful.
    #[serde(default)]
    pub success: bool,
    /// Payload, when the endpoint returns one.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Failure message for `success: false`.
    #[serde(default)]
    pub error: Option<String>,
    /// Bearer token issued by login/registration.
    #[serde(default)]
    pub token: Option<String>,
    /// Member record some auth endpoints return next to the token.
    ///
    /// Left undecoded; auth callers fall back to `/auth/me` when it does
    /// not parse as a full member.
    #[serde(default)]
    pub user: Option<serde_json::Value>,
    /// Total number of matching records on list endpoints.
    #[serde(default)]
    pub count: Option<u64>,
}

impl<T> Envelope<T> {
    /// Envelope used for 2xx responses without a JSON body.
    #[must_use]
    pub const fn empty_success() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            token: None,
            user: None,
            count: None,
        }
    }

    /// Convert `success: false` into an error, keeping the envelope otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Application`] carrying the envelope's `error`.
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Application {
                message: self.error,
            })
        }
    }

    /// Unwrap the payload of a successful envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Application`] for `success: false` and
    /// [`ApiError::MissingData`] when no payload was sent.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.into_result()?.data.ok_or(ApiError::MissingData)
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode an envelope from a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body is not a valid envelope.
    pub fn from_slice(body: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
