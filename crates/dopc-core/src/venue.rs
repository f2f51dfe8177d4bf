use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Venues the calculator knows how to price.
///
/// Membership in this enum is the whole of venue-slug validation, so adding
/// a venue means adding a variant here and to [`VenueSlug::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueSlug {
    #[serde(rename = "home-assignment-venue-helsinki")]
    Helsinki,
}

impl VenueSlug {
    pub const ALL: [VenueSlug; 1] = [VenueSlug::Helsinki];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VenueSlug::Helsinki => "home-assignment-venue-helsinki",
        }
    }
}

impl std::fmt::Display for VenueSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown venue slug: '{0}'")]
pub struct UnknownVenueSlug(pub String);

impl std::str::FromStr for VenueSlug {
    type Err = UnknownVenueSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VenueSlug::ALL
            .into_iter()
            .find(|slug| slug.as_str() == s)
            .ok_or_else(|| UnknownVenueSlug(s.to_string()))
    }
}

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Upper end of a [`DistanceRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceLimit {
    /// Exclusive upper bound in meters.
    Bounded(u32),
    /// No upper bound: the range covers everything at or above its `min`.
    Unbounded,
}

/// One tier of a venue's delivery fee schedule.
///
/// The fee for a distance `d` inside this tier is
/// `base_price + a + round(b * d / 10)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    /// Inclusive lower bound in meters.
    pub min: u32,
    pub max: DistanceLimit,
    /// Flat addend in minor units.
    pub a: i64,
    /// Per-distance coefficient.
    pub b: f64,
}

impl DistanceRange {
    /// Whether `distance` (meters) falls in `[min, max)`, or `[min, ∞)` when
    /// the range is unbounded.
    #[must_use]
    pub fn contains(&self, distance: u32) -> bool {
        if distance < self.min {
            return false;
        }
        match self.max {
            DistanceLimit::Bounded(max) => distance < max,
            DistanceLimit::Unbounded => true,
        }
    }
}

/// Everything needed to price a delivery from one venue.
///
/// Obtained fresh whenever the selected venue changes and never mutated
/// afterwards. Currency amounts are in minor units (cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenuePricing {
    pub location: Coordinates,
    pub order_minimum: i64,
    pub base_price: i64,
    pub distance_ranges: Vec<DistanceRange>,
}
