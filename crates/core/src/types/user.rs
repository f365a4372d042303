//! Member accounts and the authorization rules derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::email::Email;
use super::id::UserId;
use super::status::{ApprovalStatus, UserRole};

/// A Crew Lounge member as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: UserRole,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// References to uploaded employment documents, oldest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub verification_documents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl User {
    /// Whether an admin has approved this member.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }

    /// Approved hosts and admins may publish listings. Pending or rejected
    /// members may not, whatever their role.
    #[must_use]
    pub fn can_add_listings(&self) -> bool {
        self.is_approved() && self.role.lists_properties()
    }
}

/// Authorization flags derived from the current user.
///
/// Always computed from a user snapshot, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    pub is_authenticated: bool,
    pub is_approved: bool,
    pub can_add_listings: bool,
}

impl Permissions {
    /// Derive the flags for an optional current user.
    #[must_use]
    pub fn for_user(user: Option<&User>) -> Self {
        user.map_or_else(Self::default, |user| Self {
            is_authenticated: true,
            is_approved: user.is_approved(),
            can_add_listings: user.can_add_listings(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn member(role: UserRole, status: ApprovalStatus) -> User {
        User {
            id: UserId::new("u1"),
            name: "Jo Pilot".to_owned(),
            email: Email::parse("jo@crew.example").unwrap(),
            role,
            status,
            airline: None,
            position: None,
            avatar: None,
            bio: None,
            phone_number: None,
            verification_documents: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_anonymous_has_no_permissions() {
        assert_eq!(Permissions::for_user(None), Permissions::default());
    }

    #[test]
    fn test_pending_host_cannot_add_listings() {
        let perms = Permissions::for_user(Some(&member(UserRole::Host, ApprovalStatus::Pending)));
        assert!(perms.is_authenticated);
        assert!(!perms.is_approved);
        assert!(!perms.can_add_listings);
    }

    #[test]
    fn test_approved_host_and_admin_can_add_listings() {
        for role in [UserRole::Host, UserRole::Admin] {
            let perms = Permissions::for_user(Some(&member(role, ApprovalStatus::Approved)));
            assert!(perms.can_add_listings, "{role} should list");
        }
    }

    #[test]
    fn test_approved_user_fails_role_gate() {
        let perms = Permissions::for_user(Some(&member(UserRole::User, ApprovalStatus::Approved)));
        assert!(perms.is_approved);
        assert!(!perms.can_add_listings);
    }

    #[test]
    fn test_rejected_admin_cannot_add_listings() {
        assert!(!member(UserRole::Admin, ApprovalStatus::Rejected).can_add_listings());
    }

    #[test]
    fn test_deserialize_backend_record() {
        let user: User = serde_json::from_value(json!({
            "_id": "6521",
            "name": "Sam",
            "email": "sam@crew.example",
            "role": "employer",
            "status": "approved",
            "airline": "Delta",
            "verificationDocuments": ["doc-1"],
            "createdAt": "2024-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.id.as_str(), "6521");
        assert_eq!(user.role, UserRole::Employer);
        assert_eq!(user.verification_documents, vec!["doc-1".to_owned()]);
        assert!(user.created_at.is_some());
        assert!(user.position.is_none());
    }

    #[test]
    fn test_missing_status_means_pending() {
        let user: User = serde_json::from_value(json!({
            "id": "7",
            "name": "New",
            "email": "new@crew.example"
        }))
        .unwrap();
        assert_eq!(user.status, ApprovalStatus::Pending);
        assert_eq!(user.role, UserRole::User);
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let user: User = serde_json::from_value(json!({
            "_id": "8",
            "name": "Kit",
            "email": "kit@crew.example",
            "role": null,
            "status": null,
            "verificationDocuments": null
        }))
        .unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.status, ApprovalStatus::Pending);
        assert!(user.verification_documents.is_empty());
    }
}
