//! Member-to-member messaging service.

use crew_lounge_core::{Conversation, Message, MessageId, NewMessage, UserId};
use serde_json::json;
use tracing::instrument;

use super::segment;
use crate::client::{ApiClient, Auth};
use crate::error::ApiError;

/// Messaging service. Every call needs a signed-in member.
pub struct MessageService<'a> {
    client: &'a ApiClient,
}

impl<'a> MessageService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// The member's inbox, one row per counterpart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self))]
    pub async fn get_conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        self.client
            .get("/messages/conversations", Auth::Bearer)
            .await?
            .into_data()
    }

    /// Full thread with another member, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn get_messages_by_user(&self, user: &UserId) -> Result<Vec<Message>, ApiError> {
        self.client
            .get(&format!("/messages/{}", segment(user.as_str())), Auth::Bearer)
            .await?
            .into_data()
    }

    /// Send a message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self, message), fields(receiver = %message.receiver))]
    pub async fn send_message(&self, message: &NewMessage) -> Result<Message, ApiError> {
        self.client
            .post("/messages", message, Auth::Bearer)
            .await?
            .into_data()
    }

    /// Mark every message from `user` as read.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn mark_as_read(&self, user: &UserId) -> Result<(), ApiError> {
        self.client
            .put::<_, serde_json::Value>(
                &format!("/messages/read/{}", segment(user.as_str())),
                &json!({}),
                Auth::Bearer,
            )
            .await?
            .into_result()
            .map(drop)
    }

    /// Delete one message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_message(&self, id: &MessageId) -> Result<(), ApiError> {
        self.client
            .delete::<serde_json::Value>(
                &format!("/messages/{}", segment(id.as_str())),
                Auth::Bearer,
            )
            .await?
            .into_result()
            .map(drop)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crew_lounge_core::PropertyId;
    use reqwest::Method;

    use super::*;
    use crate::services::test_support::crew;

    #[tokio::test]
    async fn test_send_message_with_property() {
        let (crew, transport) = crew(Some("abc"));
        transport.on_json(
            Method::POST,
            "/messages",
            201,
            &json!({"success": true, "data": {
                "_id": "m1",
                "content": "Is the crashpad free?",
                "sender": {"_id": "u1", "name": "Pilot"},
                "receiver": {"_id": "u2", "name": "Host"}
            }}),
        );

        let message = NewMessage::new(UserId::new("u2"), "Is the crashpad free?")
            .about_property(PropertyId::new("p1"));
        let sent = crew.messages().send_message(&message).await.unwrap();
        assert_eq!(sent.receiver.name, "Host");
        assert_eq!(
            transport.last_request().unwrap().body.as_json().unwrap(),
            &json!({"receiver": "u2", "content": "Is the crashpad free?", "propertyId": "p1"})
        );
    }

    #[tokio::test]
    async fn test_mark_as_read_sends_empty_object() {
        let (crew, transport) = crew(Some("abc"));
        transport.on_json(
            Method::PUT,
            "/messages/read/u2",
            200,
            &json!({"success": true, "data": {}}),
        );

        crew.messages().mark_as_read(&UserId::new("u2")).await.unwrap();
        assert_eq!(transport.last_request().unwrap().body.as_json().unwrap(), &json!({}));
    }

    #[tokio::test]
    async fn test_conversations_require_auth() {
        let (crew, transport) = crew(None);
        transport.on_json(
            Method::GET,
            "/messages/conversations",
            401,
            &json!({"success": false, "error": "Not authorized to access this route"}),
        );

        let err = crew.messages().get_conversations().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Not authorized to access this route");
    }

    #[tokio::test]
    async fn test_conversation_inbox_decodes() {
        let (crew, transport) = crew(Some("abc"));
        transport.on_json(
            Method::GET,
            "/messages/conversations",
            200,
            &json!({"success": true, "data": [{
                "user": {"_id": "u2", "name": "Host"},
                "latestMessage": {"content": "See you", "sender": "u2", "read": false},
                "unreadCount": 3
            }]}),
        );

        let inbox = crew.messages().get_conversations().await.unwrap();
        assert_eq!(inbox[0].unread_count, 3);
        assert_eq!(transport.requests_to(&Method::GET, "/messages/conversations"), 1);
    }
}
