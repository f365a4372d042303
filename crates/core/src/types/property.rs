//! Crashpad and vacation rental listings.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{PropertyId, UserId};
use super::price::Price;
use super::status::PropertyCategory;

/// A property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id", alias = "id")]
    pub id: PropertyId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PropertyCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Billing period label such as "Per Night".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_to_airport: Option<String>,
    #[serde(default)]
    pub amenities: BTreeMap<String, bool>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

impl Property {
    /// Listing price in dollars, if the host set one.
    #[must_use]
    pub fn price(&self) -> Option<Price> {
        self.price.map(Price::usd)
    }

    /// Names of the amenities marked available, sorted.
    pub fn available_amenities(&self) -> impl Iterator<Item = &str> {
        self.amenities
            .iter()
            .filter(|(_, available)| **available)
            .map(|(name, _)| name.as_str())
    }
}

/// Payload for creating or updating a listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PropertyCategory>,
    pub location: String,
    pub price: Decimal,
    pub price_per_unit: String,
    pub property_type: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_to_airport: Option<String>,
    pub amenities: BTreeMap<String, bool>,
}

/// Filters accepted by `GET /properties`.
///
/// Unset fields are left out of the query string entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PropertyCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "price[gte]", skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(rename = "price[lte]", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
