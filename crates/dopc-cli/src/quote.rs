//! `dopc quote`: validate form input, load the venue and print the price.

use std::fmt::{self, Write as _};
use std::path::Path;

use dopc_core::{
    format_euro, validate_request, AppConfig, PriceBreakdown, RawFormInput, ValidationErrors,
};
use dopc_venue::{VenueClient, VenueSession};

/// Builds form input from CLI flags. A missing flag is an empty field.
pub(crate) fn input_from_flags(
    venue: Option<String>,
    cart_value: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
) -> RawFormInput {
    RawFormInput::from_text(
        &venue.unwrap_or_default(),
        &cart_value.unwrap_or_default(),
        &lat.unwrap_or_default(),
        &lon.unwrap_or_default(),
    )
}

/// Reads a JSON object with the form's field keys from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object.
pub(crate) fn read_request_file(path: &Path) -> anyhow::Result<RawFormInput> {
    let body = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    parse_request(&body)
        .map_err(|e| anyhow::anyhow!("invalid request file {}: {e}", path.display()))
}

pub(crate) fn parse_request(body: &str) -> Result<RawFormInput, serde_json::Error> {
    serde_json::from_str(body)
}

/// Validates `input`, loads the requested venue and prints its price.
///
/// Validation runs before any network call.
///
/// # Errors
///
/// Returns an error if any field is invalid, the venue cannot be loaded, or
/// the venue does not deliver to the user's location.
pub(crate) async fn run_quote(
    config: &AppConfig,
    input: &RawFormInput,
    json: bool,
) -> anyhow::Result<()> {
    let request = match validate_request(input) {
        Ok(request) => request,
        Err(errors) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&errors)?);
            } else {
                eprint!("{}", render_errors(&errors)?);
            }
            anyhow::bail!("{} invalid field(s)", errors.len());
        }
    };

    tracing::debug!(
        slug = %request.venue_slug(),
        cart_value = request.cart_value(),
        "input validated"
    );
    let client = VenueClient::from_config(config)?;
    let mut session = VenueSession::new(client);
    session.select(request.venue_slug()).await?;

    let breakdown = session.quote(input)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print!("{}", render_breakdown(&breakdown)?);
    }

    Ok(())
}

pub(crate) fn render_breakdown(breakdown: &PriceBreakdown) -> Result<String, fmt::Error> {
    let rows = [
        ("Cart value", euros(breakdown.cart_value)),
        ("Delivery fee", euros(breakdown.delivery_fee)),
        ("Delivery distance", format!("{} m", breakdown.delivery_distance)),
        ("Small order surcharge", euros(breakdown.small_order_surcharge)),
        ("Total price", euros(breakdown.total_price)),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        writeln!(out, "{:<23}{value}", format!("{label}:"))?;
    }
    Ok(out)
}

pub(crate) fn render_errors(errors: &ValidationErrors) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for (field, err) in errors.iter() {
        writeln!(out, "{field}: {err}")?;
    }
    Ok(out)
}

pub(crate) fn euros(cents: i64) -> String {
    format!("{} \u{20ac}", format_euro(cents))
}
