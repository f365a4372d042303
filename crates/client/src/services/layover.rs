//! Layover city guides, with crew recommendations, travel tips and reviews.

use crew_lounge_core::{
    Layover, LayoverDetails, LayoverId, LayoverQuery, NewRecommendation, NewReview, NewTravelTip,
    Recommendation, RecommendationId, Review, TravelTip, TravelTipId,
};
use serde::Serialize;
use tracing::instrument;

use super::{segment, with_query};
use crate::client::{ApiClient, Auth};
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::transport::{FileUpload, MultipartForm};

/// Multipart field carrying a guide's cover image.
const IMAGE_FIELD: &str = "image";

#[derive(Serialize)]
struct CommentBody<'a> {
    text: &'a str,
}

/// Layover guide service.
pub struct LayoverService<'a> {
    client: &'a ApiClient,
}

impl<'a> LayoverService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn layover_path(id: &LayoverId, rest: &str) -> String {
        format!("/layovers/{}{rest}", segment(id.as_str()))
    }

    // =========================================================================
    // Guides
    // =========================================================================

    /// Guides matching `query`. The envelope keeps the backend's `count`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self))]
    pub async fn get_layovers(
        &self,
        query: &LayoverQuery,
    ) -> Result<Envelope<Vec<Layover>>, ApiError> {
        let endpoint = with_query("/layovers", query)?;
        self.client.get(&endpoint, Auth::Anonymous).await?.into_result()
    }

    /// A single guide.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the guide does not exist.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_layover(&self, id: &LayoverId) -> Result<Layover, ApiError> {
        self.client
            .get(&Self::layover_path(id, ""), Auth::Anonymous)
            .await?
            .into_data()
    }

    /// Publish a guide.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self, details), fields(city = %details.city))]
    pub async fn create_layover(&self, details: &LayoverDetails) -> Result<Layover, ApiError> {
        self.client
            .post("/layovers", details, Auth::Bearer)
            .await?
            .into_data()
    }

    /// Publish a guide with its cover image as one form upload. Nested
    /// lists (attractions, hotels, ...) travel as JSON text fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self, details, image), fields(city = %details.city))]
    pub async fn create_layover_with_image(
        &self,
        details: &LayoverDetails,
        image: FileUpload,
    ) -> Result<Layover, ApiError> {
        let form = MultipartForm::new()
            .json_fields(details)?
            .file(IMAGE_FIELD, image);
        self.client
            .post_multipart("/layovers", form, Auth::Bearer)
            .await?
            .into_data()
    }

    /// Replace a guide's cover image. Returns the stored image reference
    /// when the backend sends one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self, image), fields(id = %id))]
    pub async fn upload_layover_image(
        &self,
        id: &LayoverId,
        image: FileUpload,
    ) -> Result<Option<String>, ApiError> {
        let form = MultipartForm::new().file(IMAGE_FIELD, image);
        let envelope = self
            .client
            .put_multipart::<serde_json::Value>(
                &Self::layover_path(id, "/image"),
                form,
                Auth::Bearer,
            )
            .await?
            .into_result()?;
        Ok(envelope.data.and_then(|data| match data {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        }))
    }

    /// Replace a guide's details.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self, details), fields(id = %id))]
    pub async fn update_layover(
        &self,
        id: &LayoverId,
        details: &LayoverDetails,
    ) -> Result<Layover, ApiError> {
        self.client
            .put(&Self::layover_path(id, ""), details, Auth::Bearer)
            .await?
            .into_data()
    }

    /// Remove a guide.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_layover(&self, id: &LayoverId) -> Result<(), ApiError> {
        self.client
            .delete::<serde_json::Value>(&Self::layover_path(id, ""), Auth::Bearer)
            .await?
            .into_result()
            .map(drop)
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Reviews left on a guide.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    pub async fn get_layover_reviews(&self, id: &LayoverId) -> Result<Vec<Review>, ApiError> {
        self.client
            .get(&Self::layover_path(id, "/reviews"), Auth::Anonymous)
            .await?
            .into_data()
    }

    /// Review a guide.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self, review), fields(id = %id))]
    pub async fn add_layover_review(
        &self,
        id: &LayoverId,
        review: &NewReview,
    ) -> Result<Review, ApiError> {
        self.client
            .post(&Self::layover_path(id, "/reviews"), review, Auth::Bearer)
            .await?
            .into_data()
    }

    // =========================================================================
    // Recommendations
    // =========================================================================

    /// Crew recommendations near a layover airport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    pub async fn get_recommendations(
        &self,
        id: &LayoverId,
    ) -> Result<Vec<Recommendation>, ApiError> {
        self.client
            .get(&Self::layover_path(id, "/recommendations"), Auth::Anonymous)
            .await?
            .into_data()
    }

    /// One recommendation with its comments.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or it does not exist.
    pub async fn get_recommendation(
        &self,
        id: &LayoverId,
        recommendation: &RecommendationId,
    ) -> Result<Recommendation, ApiError> {
        let rest = format!("/recommendations/{}", segment(recommendation.as_str()));
        self.client
            .get(&Self::layover_path(id, &rest), Auth::Anonymous)
            .await?
            .into_data()
    }

    /// Recommend a place.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self, recommendation), fields(id = %id, name = %recommendation.name))]
    pub async fn add_recommendation(
        &self,
        id: &LayoverId,
        recommendation: &NewRecommendation,
    ) -> Result<Recommendation, ApiError> {
        self.client
            .post(&Self::layover_path(id, "/recommendations"), recommendation, Auth::Bearer)
            .await?
            .into_data()
    }

    /// Comment on a recommendation. Returns the recommendation with its
    /// updated comment list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self, text), fields(id = %id, recommendation = %recommendation))]
    pub async fn add_recommendation_comment(
        &self,
        id: &LayoverId,
        recommendation: &RecommendationId,
        text: &str,
    ) -> Result<Recommendation, ApiError> {
        let rest = format!("/recommendations/{}/comments", segment(recommendation.as_str()));
        self.client
            .post(&Self::layover_path(id, &rest), &CommentBody { text }, Auth::Bearer)
            .await?
            .into_data()
    }

    // =========================================================================
    // Travel tips
    // =========================================================================

    /// Travel tips for a layover.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    pub async fn get_travel_tips(&self, id: &LayoverId) -> Result<Vec<TravelTip>, ApiError> {
        self.client
            .get(&Self::layover_path(id, "/travelTips"), Auth::Anonymous)
            .await?
            .into_data()
    }

    /// Add a travel tip.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self, tip), fields(id = %id, mood = %tip.mood))]
    pub async fn add_travel_tip(
        &self,
        id: &LayoverId,
        tip: &NewTravelTip,
    ) -> Result<TravelTip, ApiError> {
        self.client
            .post(&Self::layover_path(id, "/travelTips"), tip, Auth::Bearer)
            .await?
            .into_data()
    }

    /// Delete one of the member's travel tips.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(id = %id, tip = %tip))]
    pub async fn delete_travel_tip(
        &self,
        id: &LayoverId,
        tip: &TravelTipId,
    ) -> Result<(), ApiError> {
        let rest = format!("/travelTips/{}", segment(tip.as_str()));
        self.client
            .delete::<serde_json::Value>(&Self::layover_path(id, &rest), Auth::Bearer)
            .await?
            .into_result()
            .map(drop)
    }
}
