//! Pure validation and pricing logic for the delivery order price calculator.
//!
//! Nothing in this crate performs I/O. Venue metadata is supplied by the
//! caller (see `dopc-venue`), and raw form input arrives as untrusted JSON
//! values.

pub mod app_config;
pub mod config;
pub mod error;
pub mod money;
pub mod pricing;
pub mod validation;
pub mod venue;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use money::format_euro;
pub use pricing::{
    calculate_price_breakdown, delivery_distance, delivery_fee, small_order_surcharge,
    PriceBreakdown, PricingError,
};
pub use validation::{
    validate_request, Axis, Field, FieldError, RawFormInput, ValidatedRequest, ValidationErrors,
    MAX_CART_VALUE,
};
pub use venue::{
    Coordinates, DistanceLimit, DistanceRange, UnknownVenueSlug, VenuePricing, VenueSlug,
};
