//! Authentication service.
//!
//! Registration, login and logout plus the signed-in member's own profile.
//! Login and registration persist the issued token; logout always clears it.

use crew_lounge_core::{AuthToken, Email, User, UserRole};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::{ApiClient, Auth};
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::transport::{FileUpload, MultipartForm, RequestBody};

/// Multipart field carrying a verification document.
const DOCUMENT_FIELD: &str = "document";

/// Email and password for `POST /auth/login`.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: Email,
    pub password: SecretString,
}

impl LoginRequest {
    #[must_use]
    pub fn new(email: Email, password: impl Into<String>) -> Self {
        Self {
            email,
            password: SecretString::from(password.into()),
        }
    }
}

impl Serialize for LoginRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            email: &'a Email,
            password: &'a str,
        }
        Wire {
            email: &self.email,
            password: self.password.expose_secret(),
        }
        .serialize(serializer)
    }
}

/// Sign-up details for `POST /auth/register`.
///
/// Carries no status field. New accounts always start out
/// pending.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: Email,
    pub password: SecretString,
    pub role: Option<UserRole>,
    pub airline: Option<String>,
    pub position: Option<String>,
}

impl RegisterRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, email: Email, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email,
            password: SecretString::from(password.into()),
            role: None,
            airline: None,
            position: None,
        }
    }

    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn with_airline(mut self, airline: impl Into<String>) -> Self {
        self.airline = Some(airline.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

impl Serialize for RegisterRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            name: &'a str,
            email: &'a Email,
            password: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            role: Option<UserRole>,
            #[serde(skip_serializing_if = "Option::is_none")]
            airline: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            position: Option<&'a str>,
        }
        Wire {
            name: &self.name,
            email: &self.email,
            password: self.password.expose_secret(),
            role: self.role,
            airline: self.airline.as_deref(),
            position: self.position.as_deref(),
        }
        .serialize(serializer)
    }
}

/// Editable profile fields for `PUT /auth/updatedetails`. Unset fields are
/// left unchanged by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Payload for `PUT /auth/updatepassword`.
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub current_password: SecretString,
    pub new_password: SecretString,
}

impl PasswordChange {
    #[must_use]
    pub fn new(current: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            current_password: SecretString::from(current.into()),
            new_password: SecretString::from(new.into()),
        }
    }
}

impl Serialize for PasswordChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire<'a> {
            current_password: &'a str,
            new_password: &'a str,
        }
        Wire {
            current_password: self.current_password.expose_secret(),
            new_password: self.new_password.expose_secret(),
        }
        .serialize(serializer)
    }
}

/// What a successful login or registration handed back.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    pub token: Option<AuthToken>,
    /// The member, when the backend included it (as `user` or `data`).
    pub user: Option<User>,
}

/// Authentication service.
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    // =========================================================================
    // Sign in / sign out
    // =========================================================================

    /// Create an account and persist the issued token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthGrant, ApiError> {
        let envelope: Envelope = self
            .client
            .post("/auth/register", request, Auth::Anonymous)
            .await?;
        self.accept_grant(envelope).await
    }

    /// Sign in and persist the issued token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthGrant, ApiError> {
        let envelope: Envelope = self
            .client
            .post("/auth/login", request, Auth::Anonymous)
            .await?;
        self.accept_grant(envelope).await
    }

    /// Sign out.
    ///
    /// The remote call is best effort and bounded by the client's logout
    /// timeout; its failure is only logged. The stored token is cleared
    /// either way.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Credentials`] only if the token could not be
    /// removed from the store.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let remote = self
            .client
            .execute::<Value>(
                Method::GET,
                "/auth/logout",
                RequestBody::Empty,
                Auth::Anonymous,
                Some(self.client.logout_timeout()),
            )
            .await;
        if let Err(e) = remote {
            warn!(error = %e, "remote logout failed, clearing local credential anyway");
        }

        self.client.credentials().clear().await?;
        Ok(())
    }

    /// Whether a token is currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Credentials`] if the store cannot be read.
    pub async fn has_stored_token(&self) -> Result<bool, ApiError> {
        Ok(self.client.credentials().get().await?.is_some())
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// The member the stored token belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the token is rejected.
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<User, ApiError> {
        self.client
            .get::<User>("/auth/me", Auth::Bearer)
            .await?
            .into_data()
    }

    /// Update profile fields and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self, details))]
    pub async fn update_user_details(
        &self,
        details: &UpdateDetailsRequest,
    ) -> Result<User, ApiError> {
        self.client
            .put::<_, User>("/auth/updatedetails", details, Auth::Bearer)
            .await?
            .into_data()
    }

    /// Change the password. A token issued with the response replaces the
    /// stored one and is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self, change))]
    pub async fn update_password(
        &self,
        change: &PasswordChange,
    ) -> Result<Option<AuthToken>, ApiError> {
        let envelope: Envelope = self
            .client
            .put("/auth/updatepassword", change, Auth::Bearer)
            .await?
            .into_result()?;
        let token = self.store_token(envelope.token).await?;
        Ok(token)
    }

    /// Upload an employment document for admin review.
    ///
    /// Returns the backend's reference for the stored document (a URL or
    /// id) when it sends one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn upload_verification_document(
        &self,
        file: FileUpload,
    ) -> Result<Option<String>, ApiError> {
        let form = MultipartForm::new().file(DOCUMENT_FIELD, file);
        let envelope: Envelope = self
            .client
            .post_multipart("/auth/verificationdocuments", form, Auth::Bearer)
            .await?
            .into_result()?;
        Ok(envelope.data.as_ref().and_then(document_reference))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn accept_grant(&self, envelope: Envelope) -> Result<AuthGrant, ApiError> {
        let envelope = envelope.into_result()?;
        let token = self.store_token(envelope.token).await?;
        let user = [envelope.user, envelope.data]
            .into_iter()
            .flatten()
            .find_map(|record| serde_json::from_value::<User>(record).ok());
        Ok(AuthGrant { token, user })
    }

    async fn store_token(&self, token: Option<String>) -> Result<Option<AuthToken>, ApiError> {
        let Some(token) = token.map(AuthToken::from).filter(|t| !t.is_blank()) else {
            return Ok(None);
        };
        self.client.credentials().set(&token).await?;
        debug!("stored new token");
        Ok(Some(token))
    }
}

/// Reference to an uploaded document: the payload itself when it is a
/// string, otherwise its `url`, `path` or `_id` field.
fn document_reference(data: &Value) -> Option<String> {
    match data {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => ["url", "path", "_id"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}
