//! Error types for the Crew Lounge client.

use thiserror::Error;

/// Errors that can occur when talking to the Crew Lounge backend.
///
/// Transport failures (non-2xx status, network, timeout, undecodable body)
/// and application failures (a 2xx envelope with `success: false`) share
/// this one type so callers have a single failure path.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status.
    ///
    /// `message` is the body's `error` field when present, otherwise
    /// `"API error: <status>"`.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Server-provided or synthesized message.
        message: String,
    },

    /// Backend answered 2xx with `success: false`.
    #[error("{}", .message.as_deref().unwrap_or("request was not successful"))]
    Application {
        /// The envelope's `error` field, if any.
        message: Option<String>,
    },

    /// Connection could not be established or was interrupted.
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete within its time budget.
    #[error("request timed out")]
    Timeout,

    /// A success response could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A request payload could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// A success envelope carried no `data`.
    #[error("response contained no data")]
    MissingData,

    /// The operation needs a signed-in member.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Reading or writing the stored credential failed.
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// The base URL or endpoint could not be turned into a request URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status for transport errors that carry one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Text to show a member, falling back to `fallback` when the backend
    /// gave no message.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Http { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Application {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            Self::Http { .. } | Self::Application { .. } | Self::NotAuthenticated => {
                fallback.to_owned()
            }
            other => other.to_string(),
        }
    }
}

/// Errors raised by a [`CredentialStore`](crate::credentials::CredentialStore).
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Filesystem access failed.
    #[error("credential storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored credential file is not valid JSON.
    #[error("credential file is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}
