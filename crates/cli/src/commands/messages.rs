//! `conversations` and `send`.

use crew_lounge_client::Session;
use crew_lounge_core::{NewMessage, UserId};

use super::{CliError, emit, require_member};
use crate::output;

pub async fn conversations(session: &Session) -> Result<(), CliError> {
    require_member(session)?;
    let inbox = session.services().messages().get_conversations().await?;
    emit(&output::conversations(&inbox));
    Ok(())
}

pub async fn send(session: &Session, to: &str, content: String) -> Result<(), CliError> {
    require_member(session)?;
    let message = NewMessage::new(UserId::new(to), content);
    let sent = session.services().messages().send_message(&message).await?;
    emit(&[format!("Sent to {} ({}).", sent.receiver.name, sent.id)]);
    Ok(())
}
