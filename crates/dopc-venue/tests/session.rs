//! Integration tests for `VenueSession` using wiremock HTTP mocks.

use dopc_core::{format_euro, Field, FieldError, RawFormInput, VenueSlug};
use dopc_venue::{QuoteError, VenueClient, VenueSession};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HELSINKI: &str = "home-assignment-venue-helsinki";

fn test_session(server: &MockServer) -> VenueSession {
    let client =
        VenueClient::with_base_url(&format!("{}/venues", server.uri()), 30, "dopc-test/0.1")
            .expect("client construction should not fail");
    VenueSession::new(client)
}

async fn mount_venue(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/venues/{HELSINKI}/static")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "venue_raw": { "location": { "coordinates": [24.94018, 60.17094] } }
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/venues/{HELSINKI}/dynamic")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "venue_raw": {
                "delivery_specs": {
                    "order_minimum_no_surcharge": 1000,
                    "delivery_pricing": {
                        "base_price": 190,
                        "distance_ranges": [
                            { "min": 1000, "max": 0, "a": 0, "b": 0, "flag": null },
                            { "min": 0, "max": 500, "a": 0, "b": 0, "flag": null },
                            { "min": 500, "max": 1000, "a": 0, "b": 0, "flag": null }
                        ]
                    }
                }
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn quote_before_select_is_venue_not_loaded() {
    let server = MockServer::start().await;
    let session = test_session(&server);

    let input = RawFormInput::from_text(HELSINKI, "10.00", "60.18130", "24.95781");
    let err = session.quote(&input).unwrap_err();

    assert!(matches!(err, QuoteError::VenueNotLoaded));
    assert_eq!(err.to_string(), "Venue data not loaded yet");
}

#[tokio::test]
async fn select_then_quote_prices_the_order() {
    let server = MockServer::start().await;
    mount_venue(&server).await;
    let mut session = test_session(&server);

    let pricing = session
        .select(VenueSlug::Helsinki)
        .await
        .expect("venue should load");
    assert_eq!(pricing.base_price, 190);
    assert_eq!(session.selected(), Some(VenueSlug::Helsinki));

    let input = RawFormInput::from_text(HELSINKI, "10.00", "60.18130", "24.95781");
    let breakdown = session.quote(&input).expect("quote should succeed");

    assert_eq!(breakdown.delivery_distance, 1509);
    assert_eq!(format_euro(breakdown.delivery_fee), "1.90");
    assert_eq!(format_euro(breakdown.small_order_surcharge), "0.00");
    assert_eq!(format_euro(breakdown.total_price), "11.90");
}

#[tokio::test]
async fn invalid_input_is_reported_even_with_venue_loaded() {
    let server = MockServer::start().await;
    mount_venue(&server).await;
    let mut session = test_session(&server);
    session.select(VenueSlug::Helsinki).await.unwrap();

    let input = RawFormInput::from_text(HELSINKI, "-1", "60.20", "24.95781");
    let err = session.quote(&input).unwrap_err();

    let QuoteError::Invalid(errors) = err else {
        panic!("expected validation errors, got: {err:?}");
    };
    assert_eq!(
        errors.get(Field::CartValue),
        Some(&FieldError::CartValueNotPositive)
    );
    assert_eq!(
        errors.get(Field::Latitude).map(ToString::to_string).as_deref(),
        Some("latitude must have exactly 5 digits after the decimal point")
    );
}

#[tokio::test]
async fn failed_reselect_discards_previous_pricing() {
    let server = MockServer::start().await;
    mount_venue(&server).await;
    let mut session = test_session(&server);
    session.select(VenueSlug::Helsinki).await.unwrap();
    assert!(session.pricing().is_some());

    server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(session.select(VenueSlug::Helsinki).await.is_err());
    assert!(session.pricing().is_none());
    assert_eq!(session.selected(), None);

    let input = RawFormInput::from_text(HELSINKI, "10.00", "60.18130", "24.95781");
    assert!(matches!(
        session.quote(&input),
        Err(QuoteError::VenueNotLoaded)
    ));
}

#[tokio::test]
async fn uncovered_distance_is_a_pricing_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/venues/{HELSINKI}/static")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "venue_raw": { "location": { "coordinates": [24.94018, 60.17094] } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/venues/{HELSINKI}/dynamic")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "venue_raw": {
                "delivery_specs": {
                    "order_minimum_no_surcharge": 1000,
                    "delivery_pricing": {
                        "base_price": 190,
                        "distance_ranges": [
                            { "min": 0, "max": 1000, "a": 0, "b": 0, "flag": null }
                        ]
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let mut session = test_session(&server);
    session.select(VenueSlug::Helsinki).await.unwrap();

    let input = RawFormInput::from_text(HELSINKI, "10.00", "60.18130", "24.95781");
    let err = session.quote(&input).unwrap_err();
    assert!(
        matches!(err, QuoteError::Pricing(_)),
        "expected pricing error, got: {err:?}"
    );
}
