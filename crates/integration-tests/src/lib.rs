//! Integration tests for the Crew Lounge client.
//!
//! # Running Tests
//!
//! ```bash
//! # Scenario tests (in-memory backend)
//! cargo test -p crew-lounge-integration-tests
//!
//! # Also hit a running backend
//! CREW_LOUNGE_API_URL=http://localhost:5002/api/v1 \
//!     cargo test -p crew-lounge-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `session_scenarios` - Sign-in lifecycle and derived permissions
//! - `http_errors` - How failures reach the member
//! - `service_paths` - REST mapping of every service call
//! - `persistence` - File-backed credentials across restarts
//! - `live_backend` - Smoke tests against a real server (ignored by default)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use crew_lounge_client::{
    ApiClient, ClientConfig, CredentialStore, CrewLounge, MemoryCredentialStore, MemoryTransport,
    Session,
};
use reqwest::Method;
use serde_json::{Value, json};

/// Base URL the scenario backend pretends to serve.
pub const TEST_API_URL: &str = "http://crew-lounge.test/api/v1";

/// A session wired to an in-memory backend and credential store.
pub struct TestContext {
    pub session: Session,
    pub backend: MemoryTransport,
    pub credentials: Arc<MemoryCredentialStore>,
}

impl TestContext {
    /// Signed-out context with no stored token.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemoryCredentialStore::new())
    }

    /// Context whose store already holds `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self::with_store(MemoryCredentialStore::with_token(token))
    }

    fn with_store(store: MemoryCredentialStore) -> Self {
        let backend = MemoryTransport::new();
        let credentials = Arc::new(store);
        let config = ClientConfig::new(TEST_API_URL).unwrap_or_default();
        let client = ApiClient::with_shared(
            &config,
            Arc::new(backend.clone()),
            Arc::clone(&credentials) as Arc<dyn CredentialStore>,
        );
        Self {
            session: Session::new(CrewLounge::new(client)),
            backend,
            credentials,
        }
    }

    pub fn services(&self) -> &CrewLounge {
        self.session.services()
    }

    /// Token currently in the store, as a plain string.
    pub async fn stored_token(&self) -> Option<String> {
        self.credentials
            .get()
            .await
            .ok()
            .flatten()
            .map(|t| t.expose().to_string())
    }

    /// Script `POST /auth/login` to issue `token` without a user record.
    pub fn login_issues_token(&self, token: &str) -> &Self {
        self.backend.on_json(
            Method::POST,
            "/auth/login",
            200,
            &json!({"success": true, "token": token}),
        );
        self
    }

    /// Script `GET /auth/me` to return a member with `role` and `status`.
    pub fn me_returns(&self, role: &str, status: &str) -> &Self {
        self.backend.on_json(
            Method::GET,
            "/auth/me",
            200,
            &json!({"success": true, "data": member(role, status)}),
        );
        self
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A member record as the backend returns it.
#[must_use]
pub fn member(role: &str, status: &str) -> Value {
    json!({
        "_id": "64f0c2a1b2c3d4e5f6a7b8c9",
        "name": "Alex Rivera",
        "email": "alex.rivera@example.com",
        "role": role,
        "status": status,
        "airline": "Delta",
        "position": "First Officer",
        "verificationDocuments": [],
        "createdAt": "2024-03-01T12:00:00.000Z"
    })
}
