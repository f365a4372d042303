//! Crew Lounge Client - HTTP client, domain services and session core.
//!
//! # Architecture
//!
//! - [`ApiClient`] speaks the backend's REST dialect: base URL, JSON
//!   envelope, bearer token, timeouts. It knows nothing about sessions.
//! - [`Transport`] is the seam under the client. [`ReqwestTransport`] does
//!   real HTTP and [`MemoryTransport`] answers from scripted replies.
//! - [`CredentialStore`] keeps the bearer token (memory or a JSON file).
//! - [`CrewLounge`] bundles the per-resource services (auth, properties,
//!   layovers, gigs, messages).
//! - [`Session`] owns the signed-in member and derives what they may do.
//!
//! # Example
//!
//! ```rust,no_run
//! use crew_lounge_client::{ClientConfig, CrewLounge, LoginRequest, Session};
//! use crew_lounge_core::Email;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let session = Session::new(CrewLounge::from_config(&config));
//!
//! session.bootstrap().await;
//! if !session.snapshot().is_authenticated() {
//!     let email = Email::parse("pilot@example.com")?;
//!     session.login(&LoginRequest::new(email, "hunter22")).await?;
//! }
//!
//! if session.snapshot().can_add_listings() {
//!     let crashpads = session.services().properties().get_properties(&Default::default()).await?;
//!     println!("{} listings", crashpads.count.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod services;
pub mod session;
pub mod transport;

pub use client::{ApiClient, Auth};
pub use config::{ClientConfig, ConfigError};
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use envelope::Envelope;
pub use error::{ApiError, CredentialError};
pub use services::{
    AuthGrant, AuthService, CrewLounge, GigService, LayoverService, LoginRequest, MessageService,
    PasswordChange, PropertyService, RegisterRequest, UpdateDetailsRequest,
};
pub use session::{Session, SessionPhase, SessionSnapshot};
pub use transport::{
    FileUpload, MemoryTransport, MockReply, MultipartForm, ReqwestTransport, Transport,
};
