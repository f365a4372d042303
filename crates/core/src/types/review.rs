//! Reviews left on properties and layovers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ReviewId, UserId};

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// A published review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", alias = "id")]
    pub id: ReviewId,
    pub title: String,
    pub text: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Errors raised while building a [`NewReview`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("rating must be between {MIN_RATING} and {MAX_RATING} (got {0})")]
    RatingOutOfRange(u8),
    #[error("review title cannot be empty")]
    EmptyTitle,
}

/// Payload for `POST /{resource}/{id}/reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReview {
    title: String,
    text: String,
    rating: u8,
}

impl NewReview {
    /// Build a review payload.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError`] if the rating is outside 1-5 or the title is
    /// blank.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        rating: u8,
    ) -> Result<Self, ReviewError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ReviewError::EmptyTitle);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewError::RatingOutOfRange(rating));
        }
        Ok(Self {
            title,
            text: text.into(),
            rating,
        })
    }

    #[must_use]
    pub const fn rating(&self) -> u8 {
        self.rating
    }
}
