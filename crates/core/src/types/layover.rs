//! Layover city guides, crew recommendations and travel tips.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{LayoverId, RecommendationId, TravelTipId, UserId};
use super::status::TipMood;

/// A layover city guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layover {
    #[serde(rename = "_id", alias = "id")]
    pub id: LayoverId,
    #[serde(flatten)]
    pub details: LayoverDetails,
}

/// Everything about a layover guide except its id.
///
/// Also used as the payload when creating or updating a guide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoverDetails {
    pub city: String,
    pub country: String,
    /// IATA airport code, e.g. `LHR`.
    pub airport: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attractions: Vec<Attraction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restaurants: Vec<Restaurant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub transportation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_tips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kilometres from the airport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_airport: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_airport: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_airport: Option<f64>,
    #[serde(default)]
    pub has_crew_rates: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A crew member's recommendation for a place near a layover airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecommendationId,
    #[serde(flatten)]
    pub details: NewRecommendation,
    #[serde(default)]
    pub comments: Vec<RecommendationComment>,
}

/// Payload for `POST /layovers/{id}/recommendations`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecommendation {
    pub name: String,
    /// Free-form kind such as "restaurant" or "gym".
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_discount: Option<String>,
    #[serde(default)]
    pub recommended_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationComment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A short travel tip with a mood marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelTip {
    #[serde(rename = "_id", alias = "id")]
    pub id: TravelTipId,
    pub text: String,
    pub mood: TipMood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /layovers/{id}/travelTips`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTravelTip {
    pub text: String,
    pub mood: TipMood,
}

/// Filters accepted by `GET /layovers`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LayoverQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
