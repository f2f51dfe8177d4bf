use dopc_core::{PricingError, ValidationErrors};
use thiserror::Error;

/// Errors returned by the venue API client.
#[derive(Debug, Error)]
pub enum VenueError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("venue not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid venue API base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Why a quote could not be produced.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// One or more form fields failed validation.
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationErrors),

    /// No pricing is loaded for the requested venue, either because it was
    /// never selected or because the last fetch failed.
    #[error("Venue data not loaded yet")]
    VenueNotLoaded,

    #[error(transparent)]
    Pricing(#[from] PricingError),
}
