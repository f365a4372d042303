//! Property listing service (crashpads and vacation rentals).

use crew_lounge_core::{
    NewProperty, NewReview, Property, PropertyCategory, PropertyId, PropertyQuery, Review,
};
use tracing::instrument;

use super::{segment, with_query};
use crate::client::{ApiClient, Auth};
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::transport::{FileUpload, MultipartForm};

/// Multipart field carrying listing photos.
const IMAGES_FIELD: &str = "images";

/// Property listing service.
pub struct PropertyService<'a> {
    client: &'a ApiClient,
}

impl<'a> PropertyService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Listings matching `query`. The envelope keeps the backend's `count`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self))]
    pub async fn get_properties(
        &self,
        query: &PropertyQuery,
    ) -> Result<Envelope<Vec<Property>>, ApiError> {
        let endpoint = with_query("/properties", query)?;
        self.client.get(&endpoint, Auth::Anonymous).await?.into_result()
    }

    /// Listings in one category.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    pub async fn get_properties_by_category(
        &self,
        category: PropertyCategory,
    ) -> Result<Vec<Property>, ApiError> {
        let query = PropertyQuery {
            category: Some(category),
            ..PropertyQuery::default()
        };
        self.get_properties(&query).await?.into_data()
    }

    /// A single listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the listing does not exist.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_property(&self, id: &PropertyId) -> Result<Property, ApiError> {
        self.client
            .get(&format!("/properties/{}", segment(id.as_str())), Auth::Anonymous)
            .await?
            .into_data()
    }

    /// Publish a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the member may not list.
    #[instrument(skip(self, property), fields(title = %property.title))]
    pub async fn create_property(&self, property: &NewProperty) -> Result<Property, ApiError> {
        self.client
            .post("/properties", property, Auth::Bearer)
            .await?
            .into_data()
    }

    /// Publish a listing together with its photos as one form upload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the member may not list.
    #[instrument(
        skip(self, property, images),
        fields(title = %property.title, images = images.len())
    )]
    pub async fn create_property_with_images(
        &self,
        property: &NewProperty,
        images: Vec<FileUpload>,
    ) -> Result<Property, ApiError> {
        let form = images
            .into_iter()
            .fold(MultipartForm::new().json_fields(property)?, |form, image| {
                form.file(IMAGES_FIELD, image)
            });
        self.client
            .post_multipart("/properties", form, Auth::Bearer)
            .await?
            .into_data()
    }

    /// Replace a listing's details.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the member does not own
    /// the listing.
    #[instrument(skip(self, property), fields(id = %id))]
    pub async fn update_property(
        &self,
        id: &PropertyId,
        property: &NewProperty,
    ) -> Result<Property, ApiError> {
        self.client
            .put(&format!("/properties/{}", segment(id.as_str())), property, Auth::Bearer)
            .await?
            .into_data()
    }

    /// Remove a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the member does not own
    /// the listing.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_property(&self, id: &PropertyId) -> Result<(), ApiError> {
        self.client
            .delete::<serde_json::Value>(
                &format!("/properties/{}", segment(id.as_str())),
                Auth::Bearer,
            )
            .await?
            .into_result()
            .map(drop)
    }

    /// Listings within `distance` miles of a zip code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self))]
    pub async fn get_properties_in_radius(
        &self,
        zipcode: &str,
        distance: u32,
    ) -> Result<Vec<Property>, ApiError> {
        self.client
            .get(
                &format!("/properties/radius/{}/{distance}", segment(zipcode)),
                Auth::Anonymous,
            )
            .await?
            .into_data()
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Reviews left on a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    pub async fn get_property_reviews(&self, id: &PropertyId) -> Result<Vec<Review>, ApiError> {
        self.client
            .get(&format!("/properties/{}/reviews", segment(id.as_str())), Auth::Anonymous)
            .await?
            .into_data()
    }

    /// Review a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects the
    /// review.
    #[instrument(skip(self, review), fields(id = %id, rating = review.rating()))]
    pub async fn add_property_review(
        &self,
        id: &PropertyId,
        review: &NewReview,
    ) -> Result<Review, ApiError> {
        self.client
            .post(&format!("/properties/{}/reviews", segment(id.as_str())), review, Auth::Bearer)
            .await?
            .into_data()
    }
}
