//! Session core: who is signed in and what they may do.
//!
//! A [`Session`] owns the current member and publishes every change through
//! a `tokio::sync::watch` channel. UIs call [`Session::subscribe`]; scripts
//! read [`Session::snapshot`]. Each operation marks the session as loading,
//! clears the previous error, does its work and always settles `loading`
//! back to `false`, even if the future is dropped midway.
//!
//! Operations are not serialized against each other. Running two at once
//! is allowed and the one that finishes last decides the final state.

mod state;

pub use state::{SessionPhase, SessionSnapshot};

use std::sync::Arc;

use crew_lounge_core::{ApprovalStatus, User};
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::services::{
    CrewLounge, LoginRequest, PasswordChange, RegisterRequest, UpdateDetailsRequest,
};
use crate::transport::FileUpload;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const PROFILE_UPDATE_FAILED: &str = "Profile update failed";
const UPLOAD_FAILED: &str = "Failed to upload document";
const PASSWORD_UPDATE_FAILED: &str = "Password update failed";

/// The signed-in member and their derived permissions.
///
/// Cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    crew: CrewLounge,
    state: watch::Sender<SessionSnapshot>,
}

/// Marks an operation in flight. Dropping it ends the operation.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<SessionSnapshot>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a watch::Sender<SessionSnapshot>) -> Self {
        state.send_modify(|s| {
            s.loading = true;
            s.phase = SessionPhase::Loading;
            s.last_error = None;
        });
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| {
            s.loading = false;
            if s.phase == SessionPhase::Loading {
                s.phase = s.settled_phase();
            }
        });
    }
}

impl Session {
    /// A session in the `Unknown` phase. Call [`Session::bootstrap`] to
    /// restore a stored login.
    #[must_use]
    pub fn new(crew: CrewLounge) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            inner: Arc::new(SessionInner { crew, state }),
        }
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.state.subscribe()
    }

    #[must_use]
    pub fn services(&self) -> &CrewLounge {
        &self.inner.crew
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        self.inner.crew.client()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Restore the member behind a stored token.
    ///
    /// A missing, unreadable or rejected token leaves the session anonymous
    /// with the token removed. This is not reported as an error.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) {
        let _guard = LoadingGuard::begin(&self.inner.state);
        let auth = self.inner.crew.auth();

        let user = match auth.has_stored_token().await {
            Ok(true) => match auth.get_current_user().await {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "stored token rejected, signing out");
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                warn!(error = %e, "could not read stored token");
                None
            }
        };

        if user.is_none() {
            self.discard_token().await;
        }
        self.set_user(user);
    }

    /// Sign in.
    ///
    /// The member comes from the login response, or from `/auth/me` when
    /// the response does not include one.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] that stopped the login. The session is then
    /// anonymous and `last_error` holds the backend's message or
    /// `"Login failed"`.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let _guard = LoadingGuard::begin(&self.inner.state);
        let auth = self.inner.crew.auth();

        let result = match auth.login(request).await {
            Ok(grant) => match grant.user {
                Some(user) => Ok(user),
                None => self.fetch_user_or_discard().await,
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(user) => {
                info!(user = %user.id, role = %user.role, status = %user.status, "signed in");
                self.set_user(Some(user));
                Ok(())
            }
            Err(e) => {
                self.set_user(None);
                Err(self.record_failure(e, LOGIN_FAILED))
            }
        }
    }

    /// Create an account and sign in as it.
    ///
    /// The new member is always `pending`, whatever the response says,
    /// until an admin reviews them.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] that stopped the registration. The session
    /// is then anonymous and `last_error` holds the backend's message or
    /// `"Registration failed"`.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let _guard = LoadingGuard::begin(&self.inner.state);
        let auth = self.inner.crew.auth();

        let result = match auth.register(request).await {
            Ok(grant) => match grant.user {
                Some(user) => Ok(user),
                None => self.fetch_user_or_discard().await,
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(mut user) => {
                user.status = ApprovalStatus::Pending;
                info!(user = %user.id, role = %user.role, "registered");
                self.set_user(Some(user));
                Ok(())
            }
            Err(e) => {
                self.set_user(None);
                Err(self.record_failure(e, REGISTRATION_FAILED))
            }
        }
    }

    /// Sign out. Never fails and is safe to repeat.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let _guard = LoadingGuard::begin(&self.inner.state);
        if let Err(e) = self.inner.crew.auth().logout().await {
            warn!(error = %e, "failed to clear stored credential");
        }
        self.set_user(None);
        info!("signed out");
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Update profile fields. The member is replaced with the record the
    /// backend returns, so role and status always come from the server.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the backend. The current member is
    /// left unchanged and `last_error` holds the message or
    /// `"Profile update failed"`.
    #[instrument(skip(self, details))]
    pub async fn update_profile(&self, details: &UpdateDetailsRequest) -> Result<(), ApiError> {
        let _guard = LoadingGuard::begin(&self.inner.state);
        match self.inner.crew.auth().update_user_details(details).await {
            Ok(user) => {
                self.set_user(Some(user));
                Ok(())
            }
            Err(e) => Err(self.record_failure(e, PROFILE_UPDATE_FAILED)),
        }
    }

    /// Upload an employment document and record it on the current member.
    ///
    /// The backend's reference for the document is appended to
    /// `verification_documents`, or the file name when none is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotAuthenticated`] when nobody is signed in, or
    /// the upload's [`ApiError`]. `last_error` holds the message or
    /// `"Failed to upload document"`.
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn upload_verification_document(&self, file: FileUpload) -> Result<(), ApiError> {
        let _guard = LoadingGuard::begin(&self.inner.state);
        if !self.inner.state.borrow().is_authenticated() {
            return Err(self.record_failure(ApiError::NotAuthenticated, UPLOAD_FAILED));
        }

        let file_name = file.file_name.clone();
        match self.inner.crew.auth().upload_verification_document(file).await {
            Ok(reference) => {
                let reference = reference.unwrap_or(file_name);
                self.inner.state.send_modify(|s| {
                    if let Some(user) = s.user.as_mut() {
                        user.verification_documents.push(reference);
                    }
                });
                Ok(())
            }
            Err(e) => Err(self.record_failure(e, UPLOAD_FAILED)),
        }
    }

    /// Change the password. A token issued with the change replaces the
    /// stored one.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the backend. `last_error` holds the
    /// message or `"Password update failed"`.
    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        let _guard = LoadingGuard::begin(&self.inner.state);
        match self.inner.crew.auth().update_password(change).await {
            Ok(_) => Ok(()),
            Err(e) => Err(self.record_failure(e, PASSWORD_UPDATE_FAILED)),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn set_user(&self, user: Option<User>) {
        self.inner.state.send_modify(|s| s.user = user);
    }

    fn record_failure(&self, err: ApiError, fallback: &str) -> ApiError {
        let message = err.user_message(fallback);
        warn!(error = %err, "{fallback}");
        self.inner.state.send_modify(|s| s.last_error = Some(message));
        err
    }

    /// `/auth/me` after a login that returned no member. If it fails the
    /// fresh token is of no use, so it is dropped.
    async fn fetch_user_or_discard(&self) -> Result<User, ApiError> {
        match self.inner.crew.auth().get_current_user().await {
            Ok(user) => Ok(user),
            Err(e) => {
                self.discard_token().await;
                Err(e)
            }
        }
    }

    async fn discard_token(&self) {
        if let Err(e) = self.client().credentials().clear().await {
            warn!(error = %e, "failed to clear stored credential");
        }
    }
}
