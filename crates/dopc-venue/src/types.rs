//! Venue API response types.
//!
//! The API serves two documents per venue: a static one with the venue's
//! location and a dynamic one with its delivery pricing. Only the fields the
//! calculator needs are modelled; everything else is ignored.

use dopc_core::{Coordinates, DistanceLimit, DistanceRange, VenuePricing};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// GET /{slug}/static
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct StaticVenueResponse {
    pub venue_raw: StaticVenueRaw,
}

#[derive(Debug, Deserialize)]
pub struct StaticVenueRaw {
    pub location: VenueLocation,
}

/// GeoJSON-style point: `[longitude, latitude]`.
#[derive(Debug, Deserialize)]
pub struct VenueLocation {
    pub coordinates: [f64; 2],
}

impl VenueLocation {
    #[must_use]
    pub fn to_coordinates(&self) -> Coordinates {
        let [longitude, latitude] = self.coordinates;
        Coordinates::new(latitude, longitude)
    }
}

// ---------------------------------------------------------------------------
// GET /{slug}/dynamic
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DynamicVenueResponse {
    pub venue_raw: DynamicVenueRaw,
}

#[derive(Debug, Deserialize)]
pub struct DynamicVenueRaw {
    pub delivery_specs: DeliverySpecs,
}

#[derive(Debug, Deserialize)]
pub struct DeliverySpecs {
    /// Cart value below which a small order surcharge applies, in cents.
    pub order_minimum_no_surcharge: i64,
    pub delivery_pricing: DeliveryPricing,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryPricing {
    pub base_price: i64,
    pub distance_ranges: Vec<WireDistanceRange>,
}

/// Distance tier as served by the API, where `max == 0` means "no upper
/// bound".
#[derive(Debug, Deserialize)]
pub struct WireDistanceRange {
    pub min: u32,
    pub max: u32,
    pub a: i64,
    pub b: f64,
}

impl From<WireDistanceRange> for DistanceRange {
    fn from(wire: WireDistanceRange) -> Self {
        let max = if wire.max == 0 {
            DistanceLimit::Unbounded
        } else {
            DistanceLimit::Bounded(wire.max)
        };
        DistanceRange {
            min: wire.min,
            max,
            a: wire.a,
            b: wire.b,
        }
    }
}

/// Combine the two venue documents into the calculator's pricing record.
#[must_use]
pub fn into_venue_pricing(
    static_venue: &StaticVenueResponse,
    dynamic_venue: DynamicVenueResponse,
) -> VenuePricing {
    let specs = dynamic_venue.venue_raw.delivery_specs;
    VenuePricing {
        location: static_venue.venue_raw.location.to_coordinates(),
        order_minimum: specs.order_minimum_no_surcharge,
        base_price: specs.delivery_pricing.base_price,
        distance_ranges: specs
            .delivery_pricing
            .distance_ranges
            .into_iter()
            .map(DistanceRange::from)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_is_longitude_first() {
        let location = VenueLocation {
            coordinates: [24.92813, 60.17012],
        };
        assert_eq!(location.to_coordinates(), Coordinates::new(60.17012, 24.92813));
    }

    #[test]
    fn zero_max_becomes_unbounded() {
        let wire: WireDistanceRange =
            serde_json::from_str(r#"{"min": 2000, "max": 0, "a": 0, "b": 0.0, "flag": null}"#)
                .unwrap();
        let range = DistanceRange::from(wire);
        assert_eq!(range.min, 2000);
        assert_eq!(range.max, DistanceLimit::Unbounded);
    }

    #[test]
    fn non_zero_max_stays_bounded() {
        let wire: WireDistanceRange =
            serde_json::from_str(r#"{"min": 500, "max": 1000, "a": 100, "b": 1}"#).unwrap();
        let range = DistanceRange::from(wire);
        assert_eq!(range.max, DistanceLimit::Bounded(1000));
        assert_eq!(range.a, 100);
        assert!((range.b - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_min_is_rejected() {
        let parsed = serde_json::from_str::<WireDistanceRange>(
            r#"{"min": -1, "max": 0, "a": 0, "b": 0}"#,
        );
        assert!(parsed.is_err());
    }
}
