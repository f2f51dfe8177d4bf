//! The venue currently selected for quoting.
//!
//! Selecting a venue always discards the previous venue's pricing before
//! fetching, so a failed fetch leaves nothing loaded rather than stale data
//! from another venue.

use dopc_core::{
    calculate_price_breakdown, validate_request, PriceBreakdown, RawFormInput, VenuePricing,
    VenueSlug,
};

use crate::client::VenueClient;
use crate::error::{QuoteError, VenueError};

pub struct VenueSession {
    client: VenueClient,
    loaded: Option<(VenueSlug, VenuePricing)>,
}

impl VenueSession {
    #[must_use]
    pub fn new(client: VenueClient) -> Self {
        Self {
            client,
            loaded: None,
        }
    }

    /// Switches to `slug` and loads its pricing.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after logging it; the session is left with
    /// no venue loaded.
    pub async fn select(&mut self, slug: VenueSlug) -> Result<&VenuePricing, VenueError> {
        self.loaded = None;

        match self.client.fetch_pricing(slug).await {
            Ok(pricing) => {
                tracing::info!(slug = %slug, "venue selected");
                Ok(&self.loaded.insert((slug, pricing)).1)
            }
            Err(err) => {
                tracing::error!(slug = %slug, error = %err, "failed to load venue data");
                Err(err)
            }
        }
    }

    /// Slug of the loaded venue, if any.
    #[must_use]
    pub fn selected(&self) -> Option<VenueSlug> {
        self.loaded.as_ref().map(|(slug, _)| *slug)
    }

    #[must_use]
    pub fn pricing(&self) -> Option<&VenuePricing> {
        self.loaded.as_ref().map(|(_, pricing)| pricing)
    }

    /// Validates `input` and prices it against the loaded venue.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::Invalid`] with every failing field.
    /// - [`QuoteError::VenueNotLoaded`] if pricing for the requested venue
    ///   is not loaded.
    /// - [`QuoteError::Pricing`] if the venue does not deliver that far.
    pub fn quote(&self, input: &RawFormInput) -> Result<PriceBreakdown, QuoteError> {
        let request = validate_request(input)?;

        let pricing = match &self.loaded {
            Some((slug, pricing)) if *slug == request.venue_slug() => pricing,
            _ => return Err(QuoteError::VenueNotLoaded),
        };

        let breakdown = calculate_price_breakdown(&request, pricing)?;
        tracing::debug!(
            slug = %request.venue_slug(),
            distance = breakdown.delivery_distance,
            total = breakdown.total_price,
            "quote computed"
        );
        Ok(breakdown)
    }
}
