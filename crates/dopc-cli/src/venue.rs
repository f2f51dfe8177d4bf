//! `dopc venue` and `dopc venues`.

use std::fmt::{self, Write as _};

use dopc_core::{AppConfig, DistanceLimit, VenuePricing, VenueSlug};
use dopc_venue::VenueClient;

use crate::quote::euros;

/// Fetches and prints the pricing data for `slug`.
///
/// # Errors
///
/// Returns an error if the slug is unknown or the venue API request fails.
pub(crate) async fn run_venue(config: &AppConfig, slug: &str, json: bool) -> anyhow::Result<()> {
    let slug: VenueSlug = slug.parse()?;
    let client = VenueClient::from_config(config)?;
    let pricing = client.fetch_pricing(slug).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pricing)?);
    } else {
        print!("{}", render_pricing(slug, &pricing)?);
    }

    Ok(())
}

pub(crate) fn run_venues() {
    for slug in VenueSlug::ALL {
        println!("{slug}");
    }
}

pub(crate) fn render_pricing(
    slug: VenueSlug,
    pricing: &VenuePricing,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Venue:         {slug}")?;
    writeln!(
        out,
        "Location:      {:.5}, {:.5}",
        pricing.location.latitude, pricing.location.longitude
    )?;
    writeln!(out, "Order minimum: {}", euros(pricing.order_minimum))?;
    writeln!(out, "Base price:    {}", euros(pricing.base_price))?;
    writeln!(out)?;

    let mut ranges: Vec<_> = pricing.distance_ranges.iter().collect();
    ranges.sort_by_key(|range| range.min);

    writeln!(out, "{:<10}{:<10}{:<10}B", "MIN (m)", "MAX (m)", "A")?;
    for range in ranges {
        let max = match range.max {
            DistanceLimit::Bounded(max) => max.to_string(),
            DistanceLimit::Unbounded => "\u{2014}".to_string(),
        };
        writeln!(
            out,
            "{:<10}{:<10}{:<10}{}",
            range.min,
            max,
            euros(range.a),
            range.b
        )?;
    }
    Ok(out)
}
