//! Subcommand implementations.
//!
//! Every command runs against a [`Session`] restored from the stored token,
//! so `whoami`, `conversations` and friends see the member from the last
//! `login`.

pub mod auth;
pub mod browse;
pub mod messages;

use crew_lounge_client::{ApiError, ClientConfig, ConfigError, CrewLounge, Session};
use crew_lounge_core::EmailError;
use thiserror::Error;

/// Errors that can end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Not signed in. Run `crew-cli login` first.")]
    NotSignedIn,
}

/// Load configuration and restore the stored session.
pub async fn connect() -> Result<Session, CliError> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(
        base_url = config.base_url(),
        token_file = %config.token_file.display(),
        "connecting"
    );

    let session = Session::new(CrewLounge::from_config(&config));
    session.bootstrap().await;
    Ok(session)
}

/// Fail unless someone is signed in.
fn require_member(session: &Session) -> Result<(), CliError> {
    if session.snapshot().is_authenticated() {
        Ok(())
    } else {
        Err(CliError::NotSignedIn)
    }
}

/// Write lines to stdout.
#[allow(clippy::print_stdout)]
fn emit(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
