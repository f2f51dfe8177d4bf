//! HTTP client for the venue API.
//!
//! Each venue is served as two JSON documents, `{base}/{slug}/static` and
//! `{base}/{slug}/dynamic`. [`VenueClient::fetch_pricing`] requests both
//! concurrently and combines them into a [`VenuePricing`].

use std::time::Duration;

use dopc_core::{AppConfig, VenuePricing, VenueSlug};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::VenueError;
use crate::types::{into_venue_pricing, DynamicVenueResponse, StaticVenueResponse};

/// Client for the venue API.
///
/// Use [`VenueClient::from_config`] in the binary or
/// [`VenueClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct VenueClient {
    client: Client,
    base_url: Url,
}

impl VenueClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::InvalidBaseUrl`] if the configured base URL
    /// does not parse, or [`VenueError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, VenueError> {
        Self::with_base_url(
            &config.venue_api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit base URL, timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::InvalidBaseUrl`] if `base_url` is not a valid
    /// URL, or [`VenueError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, VenueError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so `Url::join` appends
        // below the base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| VenueError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Fetches the venue's static document (location).
    ///
    /// # Errors
    ///
    /// - [`VenueError::NotFound`] on HTTP 404.
    /// - [`VenueError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`VenueError::Http`] on network failure.
    /// - [`VenueError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_static(&self, slug: VenueSlug) -> Result<StaticVenueResponse, VenueError> {
        let url = self.venue_url(slug, "static")?;
        self.get_json(url, &format!("static venue {slug}")).await
    }

    /// Fetches the venue's dynamic document (delivery pricing).
    ///
    /// # Errors
    ///
    /// Same as [`VenueClient::fetch_static`].
    pub async fn fetch_dynamic(
        &self,
        slug: VenueSlug,
    ) -> Result<DynamicVenueResponse, VenueError> {
        let url = self.venue_url(slug, "dynamic")?;
        self.get_json(url, &format!("dynamic venue {slug}")).await
    }

    /// Fetches both venue documents concurrently and combines them.
    ///
    /// # Errors
    ///
    /// Returns the first error from either request; no partial pricing is
    /// ever returned.
    pub async fn fetch_pricing(&self, slug: VenueSlug) -> Result<VenuePricing, VenueError> {
        let (static_venue, dynamic_venue) =
            tokio::try_join!(self.fetch_static(slug), self.fetch_dynamic(slug))?;

        let pricing = into_venue_pricing(&static_venue, dynamic_venue);
        tracing::debug!(
            slug = %slug,
            latitude = pricing.location.latitude,
            longitude = pricing.location.longitude,
            order_minimum = pricing.order_minimum,
            base_price = pricing.base_price,
            ranges = pricing.distance_ranges.len(),
            "venue pricing loaded"
        );
        Ok(pricing)
    }

    /// Builds `{base}/{slug}/{document}`.
    fn venue_url(&self, slug: VenueSlug, document: &str) -> Result<Url, VenueError> {
        self.base_url
            .join(&format!("{}/{document}", slug.as_str()))
            .map_err(|e| VenueError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends a GET request, maps non-2xx statuses to typed errors, and
    /// deserializes the body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, VenueError> {
        tracing::debug!(url = %url, "fetching venue document");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(VenueError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(VenueError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| VenueError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
