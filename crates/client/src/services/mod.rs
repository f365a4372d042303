//! Domain services over [`ApiClient`].
//!
//! Each service is a thin, stateless view borrowing the client: it maps one
//! function to one REST call and folds `success: false` into [`ApiError`].
//! [`CrewLounge`] owns the client and hands the services out.
//!
//! # Services
//!
//! - `auth` - Registration, login, logout, profile and verification
//! - `property` - Crashpad and vacation listings with reviews
//! - `layover` - City guides, recommendations and travel tips
//! - `gig` - Short-term aviation jobs
//! - `message` - Member-to-member messaging

mod auth;
mod gig;
mod layover;
mod message;
mod property;

pub use auth::{
    AuthGrant, AuthService, LoginRequest, PasswordChange, RegisterRequest, UpdateDetailsRequest,
};
pub use gig::GigService;
pub use layover::LayoverService;
pub use message::MessageService;
pub use property::PropertyService;

use serde::Serialize;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;

/// The Crew Lounge API as a bundle of services.
///
/// Cheap to clone; clones share one [`ApiClient`].
#[derive(Debug, Clone)]
pub struct CrewLounge {
    client: ApiClient,
}

impl CrewLounge {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Real HTTP client with file-backed credentials from `config`.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(ApiClient::from_config(config))
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub const fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.client)
    }

    #[must_use]
    pub const fn properties(&self) -> PropertyService<'_> {
        PropertyService::new(&self.client)
    }

    #[must_use]
    pub const fn layovers(&self) -> LayoverService<'_> {
        LayoverService::new(&self.client)
    }

    #[must_use]
    pub const fn gigs(&self) -> GigService<'_> {
        GigService::new(&self.client)
    }

    #[must_use]
    pub const fn messages(&self) -> MessageService<'_> {
        MessageService::new(&self.client)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// `path` followed by the url-encoded `query`, or just `path` when every
/// filter is unset.
fn with_query<Q: Serialize + ?Sized>(path: &str, query: &Q) -> Result<String, ApiError> {
    let encoded = serde_urlencoded::to_string(query).map_err(|e| ApiError::Encode(e.to_string()))?;
    if encoded.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{path}?{encoded}"))
    }
}

/// Percent-encode one path segment (an id, zip code or airport code).
fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
