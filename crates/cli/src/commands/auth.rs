//! `login`, `register`, `logout` and `whoami`.

use crew_lounge_client::{LoginRequest, RegisterRequest, Session};
use crew_lounge_core::{Email, UserRole};

use super::{CliError, emit};
use crate::output;

/// Sign-up details collected from the command line.
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
    pub airline: Option<String>,
    pub position: Option<String>,
}

/// Sign in and print the member.
pub async fn login(session: &Session, email: &str, password: String) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    session.login(&LoginRequest::new(email, password)).await?;
    emit(&output::member(&session.snapshot()));
    Ok(())
}

/// Create an account and print the (pending) member.
pub async fn register(session: &Session, account: NewAccount) -> Result<(), CliError> {
    let email = Email::parse(&account.email)?;
    let mut request = RegisterRequest::new(account.name, email, account.password);
    request.role = account.role;
    request.airline = account.airline;
    request.position = account.position;

    session.register(&request).await?;
    emit(&output::member(&session.snapshot()));
    Ok(())
}

pub async fn logout(session: &Session) {
    session.logout().await;
    emit(&["Signed out.".to_string()]);
}

pub fn whoami(session: &Session) {
    emit(&output::member(&session.snapshot()));
}
