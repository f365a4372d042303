//! Short-term aviation gigs posted by employers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{GigId, UserId};

/// A gig posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gig {
    #[serde(rename = "_id", alias = "id")]
    pub id: GigId,
    #[serde(flatten)]
    pub details: NewGig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<UserId>,
}

/// Payload for creating or updating a gig.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGig {
    pub title: String,
    pub description: String,
    /// Kind of work, e.g. "ferry flight" or "galley cover".
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    pub location: String,
    /// IATA airport code.
    pub airport: String,
    pub compensation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_flexible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

/// Filters accepted by `GET /gigs`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GigQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_gig_round_trips_type_field() {
        let gig: Gig = serde_json::from_value(json!({
            "_id": "g1",
            "title": "Galley cover",
            "description": "Two day trip",
            "type": "flight attendant",
            "location": "Atlanta",
            "airport": "ATL",
            "compensation": "$400/day",
            "startDate": "2024-06-01T00:00:00Z",
            "requirements": ["FAA certificate"],
            "contactEmail": "ops@charter.example"
        }))
        .unwrap();

        assert_eq!(gig.details.kind, "flight attendant");
        assert!(!gig.details.is_flexible);
        assert!(gig.details.end_date.is_none());
        assert_eq!(gig.details.requirements.len(), 1);
    }
}
