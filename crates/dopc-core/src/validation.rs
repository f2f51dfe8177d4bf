//! Validation of raw calculator form input.
//!
//! Every field is checked independently and every failure is reported, so a
//! caller can show all problems at once. A [`ValidatedRequest`] can only be
//! obtained through [`validate_request`].

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::venue::{Coordinates, VenueSlug};

/// Unsigned decimal with at most two fractional digits.
static CART_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").expect("valid cart value regex"));

/// Optionally negative integer or decimal.
static COORDINATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("valid coordinate regex"));

static COORDINATE_PRECISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+\.[0-9]{5}$").expect("valid precision regex"));

/// Untrusted form input as it arrives from a UI or a JSON request body.
///
/// Values are kept as raw JSON so that wrong shapes (arrays, objects, null)
/// can be reported instead of failing deserialization outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFormInput {
    #[serde(default)]
    pub venue_slug: Value,
    #[serde(default)]
    pub cart_value: Value,
    #[serde(default, rename = "userLatitude")]
    pub latitude: Value,
    #[serde(default, rename = "userLongitude")]
    pub longitude: Value,
}

impl RawFormInput {
    /// Builds input from four text fields, as typed into a form.
    #[must_use]
    pub fn from_text(venue_slug: &str, cart_value: &str, latitude: &str, longitude: &str) -> Self {
        Self {
            venue_slug: Value::from(venue_slug),
            cart_value: Value::from(cart_value),
            latitude: Value::from(latitude),
            longitude: Value::from(longitude),
        }
    }
}

/// Form fields in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    VenueSlug,
    CartValue,
    Latitude,
    Longitude,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::VenueSlug,
        Field::CartValue,
        Field::Latitude,
        Field::Longitude,
    ];

    /// Key used for the field in request bodies and error maps.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::VenueSlug => "venueSlug",
            Field::CartValue => "cartValue",
            Field::Latitude => "userLatitude",
            Field::Longitude => "userLongitude",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which coordinate a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Inclusive bounds in degrees.
    #[must_use]
    pub fn bounds(self) -> (i32, i32) {
        match self {
            Axis::Latitude => (-90, 90),
            Axis::Longitude => (-180, 180),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Why a single field was rejected. The `Display` text is the user-facing
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Invalid venue slug")]
    InvalidVenueSlug,

    #[error("Cart value is required")]
    CartValueRequired,

    #[error("Cart value must be a number")]
    CartValueNotANumber,

    #[error("Cart value must be a valid number")]
    CartValueInvalid,

    #[error("Cart value must be greater than 0")]
    CartValueNotPositive,

    #[error("{axis} must be a plain value, not an object or array")]
    CoordinateNotScalar { axis: Axis },

    #[error("{axis} is required")]
    CoordinateRequired { axis: Axis },

    #[error("{axis} must be a valid number")]
    CoordinateInvalid { axis: Axis },

    #[error("{axis} must have exactly 5 digits after the decimal point")]
    CoordinatePrecision { axis: Axis },

    #[error("{axis} must be in a range from {min} to {max}")]
    CoordinateOutOfRange { axis: Axis, min: i32, max: i32 },
}

/// Failing fields and their messages. Only failing fields are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// The first failing field in document order, i.e. the one a form
    /// should focus.
    #[must_use]
    pub fn first(&self) -> Option<(Field, &FieldError)> {
        self.0.iter().next().map(|(field, err)| (*field, err))
    }

    /// Failing fields in document order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, err)| (*field, err))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn record<T>(&mut self, field: Field, result: &Result<T, FieldError>) {
        if let Err(err) = result {
            self.0.insert(field, err.clone());
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, err) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {err}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, err) in &self.0 {
            map.serialize_entry(field.as_str(), &err.to_string())?;
        }
        map.end()
    }
}

/// Form input that passed every rule. Cart value is in minor units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedRequest {
    venue_slug: VenueSlug,
    cart_value: i64,
    location: Coordinates,
}

impl ValidatedRequest {
    #[must_use]
    pub fn venue_slug(&self) -> VenueSlug {
        self.venue_slug
    }

    #[must_use]
    pub fn cart_value(&self) -> i64 {
        self.cart_value
    }

    #[must_use]
    pub fn location(&self) -> Coordinates {
        self.location
    }
}

/// Validate all four fields of `input`.
///
/// # Errors
///
/// Returns every failing field's message when any rule is violated.
pub fn validate_request(input: &RawFormInput) -> Result<ValidatedRequest, ValidationErrors> {
    let venue_slug = validate_venue_slug(&input.venue_slug);
    let cart_value = validate_cart_value(&input.cart_value);
    let latitude = validate_coordinate(&input.latitude, Axis::Latitude);
    let longitude = validate_coordinate(&input.longitude, Axis::Longitude);

    match (venue_slug, cart_value, latitude, longitude) {
        (Ok(venue_slug), Ok(cart_value), Ok(latitude), Ok(longitude)) => Ok(ValidatedRequest {
            venue_slug,
            cart_value,
            location: Coordinates::new(latitude, longitude),
        }),
        (venue_slug, cart_value, latitude, longitude) => {
            let mut errors = ValidationErrors::default();
            errors.record(Field::VenueSlug, &venue_slug);
            errors.record(Field::CartValue, &cart_value);
            errors.record(Field::Latitude, &latitude);
            errors.record(Field::Longitude, &longitude);
            Err(errors)
        }
    }
}

/// The slug must name a known venue exactly; no trimming is applied.
///
/// # Errors
///
/// [`FieldError::InvalidVenueSlug`] for anything else, including non-strings.
pub fn validate_venue_slug(input: &Value) -> Result<VenueSlug, FieldError> {
    input
        .as_str()
        .and_then(|s| VenueSlug::from_str(s).ok())
        .ok_or(FieldError::InvalidVenueSlug)
}

/// Largest accepted cart value in minor units (one trillion euros). Keeps
/// every later sum well inside `i64`.
pub const MAX_CART_VALUE: i64 = 100_000_000_000_000;

/// Convert a cart value to minor units.
///
/// Text is read as major units (euros). Rules, first failure wins: must be
/// non-blank, must parse as a number, must be greater than zero, must be an
/// unsigned decimal with at most two fractional digits. A JSON number is
/// already in minor units and must be a whole number of at least 1. Either
/// way the result may not exceed [`MAX_CART_VALUE`].
///
/// # Errors
///
/// Returns the [`FieldError`] for the first rule violated.
pub fn validate_cart_value(input: &Value) -> Result<i64, FieldError> {
    let cents = match input {
        Value::String(text) => cart_text_to_cents(text)?,
        Value::Number(n) => whole_number(n).ok_or(FieldError::CartValueNotANumber)?,
        _ => return Err(FieldError::CartValueNotANumber),
    };

    if cents < 1 {
        return Err(FieldError::CartValueNotPositive);
    }
    if cents > MAX_CART_VALUE {
        return Err(FieldError::CartValueInvalid);
    }

    Ok(cents)
}

fn cart_text_to_cents(text: &str) -> Result<i64, FieldError> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(FieldError::CartValueRequired);
    }

    // `f64::from_str` also takes `inf`, `infinity` and `nan` in any case;
    // only the exact `Infinity` spellings count as numbers here.
    let parsed = match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => match trimmed {
            "Infinity" | "+Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            _ => return Err(FieldError::CartValueNotANumber),
        },
    };

    if parsed <= 0.0 {
        return Err(FieldError::CartValueNotPositive);
    }

    if !CART_VALUE_RE.is_match(trimmed) {
        return Err(FieldError::CartValueInvalid);
    }

    Decimal::from_str(trimmed)
        .ok()
        .and_then(|major| major.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|minor| minor.round().to_i64())
        .ok_or(FieldError::CartValueInvalid)
}

/// An integral JSON number, including floats like `1000.0`. Values outside
/// `i64` saturate so the caller's upper bound rejects them.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn whole_number(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        return Some(i64::MAX);
    }
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i64)
}

/// Validate a latitude or longitude in decimal degrees.
///
/// Rules, first failure wins: must be a scalar, must be non-blank, must be a
/// plain (optionally negative) decimal, must have exactly five fractional
/// digits, must lie within [`Axis::bounds`].
///
/// # Errors
///
/// Returns the [`FieldError`] for the first rule violated.
pub fn validate_coordinate(input: &Value, axis: Axis) -> Result<f64, FieldError> {
    let text = match input {
        Value::Null => return Err(FieldError::CoordinateRequired { axis }),
        Value::Array(_) | Value::Object(_) => {
            return Err(FieldError::CoordinateNotScalar { axis });
        }
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
    };
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(FieldError::CoordinateRequired { axis });
    }

    if !COORDINATE_RE.is_match(trimmed) {
        return Err(FieldError::CoordinateInvalid { axis });
    }

    if !COORDINATE_PRECISION_RE.is_match(trimmed) {
        return Err(FieldError::CoordinatePrecision { axis });
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| FieldError::CoordinateInvalid { axis })?;

    let (min, max) = axis.bounds();
    if value < f64::from(min) || value > f64::from(max) {
        return Err(FieldError::CoordinateOutOfRange { axis, min, max });
    }

    Ok(value)
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
