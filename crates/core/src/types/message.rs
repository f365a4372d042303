//! Direct messages between members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{MessageId, PropertyId, UserId};

/// Public profile summary attached to messages and conversations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// Listing a message refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRef {
    #[serde(rename = "_id", alias = "id")]
    pub id: PropertyId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id", alias = "id")]
    pub id: MessageId,
    pub content: String,
    pub sender: Participant,
    pub receiver: Participant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyRef>,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Most recent message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestMessage {
    pub content: String,
    pub sender: UserId,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One row of the inbox: the other member plus the latest exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub user: Participant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_message: Option<LatestMessage>,
    #[serde(default)]
    pub unread_count: u32,
}

/// Payload for `POST /messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub receiver: UserId,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
}

impl NewMessage {
    /// Message to another member, optionally about a listing.
    #[must_use]
    pub fn new(receiver: UserId, content: impl Into<String>) -> Self {
        Self {
            receiver,
            content: content.into(),
            property_id: None,
        }
    }

    /// Attach the listing this message is about.
    #[must_use]
    pub fn about_property(mut self, property_id: PropertyId) -> Self {
        self.property_id = Some(property_id);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_new_message_payload() {
        let msg = NewMessage::new(UserId::new("u2"), "Is the room free?")
            .about_property(PropertyId::new("p9"));
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"receiver": "u2", "content": "Is the room free?", "propertyId": "p9"})
        );
    }

    #[test]
    fn test_conversation_without_messages() {
        let convo: Conversation = serde_json::from_value(json!({
            "user": {"_id": "u3", "name": "Alex", "avatar": "a.png"},
            "unreadCount": 2
        }))
        .unwrap();
        assert_eq!(convo.unread_count, 2);
        assert!(convo.latest_message.is_none());
    }
}
