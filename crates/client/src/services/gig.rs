//! Gig board service.

use crew_lounge_core::{Gig, GigId, GigQuery, NewGig};
use tracing::instrument;

use super::{segment, with_query};
use crate::client::{ApiClient, Auth};
use crate::envelope::Envelope;
use crate::error::ApiError;

/// Gig board service.
pub struct GigService<'a> {
    client: &'a ApiClient,
}

impl<'a> GigService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Gigs matching `query`. The envelope keeps the backend's `count`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self))]
    pub async fn get_gigs(&self, query: &GigQuery) -> Result<Envelope<Vec<Gig>>, ApiError> {
        let endpoint = with_query("/gigs", query)?;
        self.client.get(&endpoint, Auth::Anonymous).await?.into_result()
    }

    /// A single gig.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the gig does not exist.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_gig(&self, id: &GigId) -> Result<Gig, ApiError> {
        self.client
            .get(&format!("/gigs/{}", segment(id.as_str())), Auth::Anonymous)
            .await?
            .into_data()
    }

    /// Post a gig.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self, gig), fields(title = %gig.title, airport = %gig.airport))]
    pub async fn create_gig(&self, gig: &NewGig) -> Result<Gig, ApiError> {
        self.client.post("/gigs", gig, Auth::Bearer).await?.into_data()
    }

    /// Replace a gig's details.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self, gig), fields(id = %id))]
    pub async fn update_gig(&self, id: &GigId, gig: &NewGig) -> Result<Gig, ApiError> {
        self.client
            .put(&format!("/gigs/{}", segment(id.as_str())), gig, Auth::Bearer)
            .await?
            .into_data()
    }

    /// Take a gig down.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_gig(&self, id: &GigId) -> Result<(), ApiError> {
        self.client
            .delete::<serde_json::Value>(&format!("/gigs/{}", segment(id.as_str())), Auth::Bearer)
            .await?
            .into_result()
            .map(drop)
    }

    /// Gigs at one airport, by IATA code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend reports
    /// `success: false`.
    #[instrument(skip(self))]
    pub async fn get_gigs_by_airport(&self, airport_code: &str) -> Result<Vec<Gig>, ApiError> {
        self.client
            .get(&format!("/gigs/airport/{}", segment(airport_code)), Auth::Anonymous)
            .await?
            .into_data()
    }
}
