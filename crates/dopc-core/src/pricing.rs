//! Delivery price computation.
//!
//! All functions here are pure. Amounts are in minor units, distances in
//! whole meters.

use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidatedRequest;
use crate::venue::{Coordinates, DistanceRange, VenuePricing};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The venue's fee schedule has no tier covering the distance. This is a
    /// venue configuration problem, not bad user input.
    #[error("Delivery not available at this distance ({distance} m)")]
    DeliveryNotAvailable { distance: u32 },

    /// A fee or total does not fit in `i64` minor units. Only reachable
    /// with extreme venue data.
    #[error("Price exceeds the supported range")]
    AmountOverflow,
}

/// Result of pricing one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub cart_value: i64,
    pub small_order_surcharge: i64,
    pub delivery_fee: i64,
    /// Meters.
    pub delivery_distance: u32,
    pub total_price: i64,
}

/// Great-circle distance in meters between the user and the venue, rounded
/// to the nearest meter. Returns 0 when the venue location is unknown.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn delivery_distance(user: Coordinates, venue: Option<Coordinates>) -> u32 {
    let Some(venue) = venue else {
        return 0;
    };

    let user_lat = user.latitude.to_radians();
    let venue_lat = venue.latitude.to_radians();
    let delta_lat = (venue.latitude - user.latitude).to_radians();
    let delta_lon = (venue.longitude - user.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + user_lat.cos() * venue_lat.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    // At most half the Earth's circumference (~20 015 km), well inside u32.
    (EARTH_RADIUS_METERS * c).round() as u32
}

/// `max(0, order_minimum - cart_value)`; 0 when the minimum is unknown.
#[must_use]
pub fn small_order_surcharge(order_minimum: Option<i64>, cart_value: i64) -> i64 {
    order_minimum.map_or(0, |minimum| minimum.saturating_sub(cart_value).max(0))
}

/// Fee for delivering over `distance` meters.
///
/// Tiers are sorted by `min` before lookup since venue data does not
/// guarantee ordering. Returns 0 when the base price or the tiers are
/// unknown.
///
/// # Errors
///
/// [`PricingError::DeliveryNotAvailable`] if no tier covers `distance`, or
/// [`PricingError::AmountOverflow`] if the fee does not fit in `i64`.
pub fn delivery_fee(
    distance: u32,
    base_price: Option<i64>,
    ranges: Option<&[DistanceRange]>,
) -> Result<i64, PricingError> {
    let (Some(base_price), Some(ranges)) = (base_price, ranges) else {
        return Ok(0);
    };

    let mut sorted: Vec<&DistanceRange> = ranges.iter().collect();
    sorted.sort_by_key(|range| range.min);

    let range = sorted
        .into_iter()
        .find(|range| range.contains(distance))
        .ok_or(PricingError::DeliveryNotAvailable { distance })?;

    // `as` saturates, so a huge product cannot wrap.
    #[allow(clippy::cast_possible_truncation)]
    let variable_fee = (range.b * f64::from(distance) / 10.0).round() as i64;

    base_price
        .checked_add(range.a)
        .and_then(|fee| fee.checked_add(variable_fee))
        .ok_or(PricingError::AmountOverflow)
}

/// Price an order from `venue` for a validated request.
///
/// # Errors
///
/// [`PricingError::DeliveryNotAvailable`] if the venue does not deliver to
/// the computed distance, or [`PricingError::AmountOverflow`] if the total
/// does not fit in `i64`.
pub fn calculate_price_breakdown(
    request: &ValidatedRequest,
    venue: &VenuePricing,
) -> Result<PriceBreakdown, PricingError> {
    let cart_value = request.cart_value();
    let distance = delivery_distance(request.location(), Some(venue.location));
    let surcharge = small_order_surcharge(Some(venue.order_minimum), cart_value);
    let fee = delivery_fee(
        distance,
        Some(venue.base_price),
        Some(venue.distance_ranges.as_slice()),
    )?;

    let total_price = cart_value
        .checked_add(surcharge)
        .and_then(|total| total.checked_add(fee))
        .ok_or(PricingError::AmountOverflow)?;

    Ok(PriceBreakdown {
        cart_value,
        small_order_surcharge: surcharge,
        delivery_fee: fee,
        delivery_distance: distance,
        total_price,
    })
}

#[cfg(test)]
#[path = "pricing_test.rs"]
mod tests;
