//! HTTP adapter tests against a wiremock server.

use std::time::Duration;

use skycast_core::{
    Dashboard, ForecastProvider, Geocoder, Location, LocationResolver, OpenMeteoGeocoder,
    OpenMeteoProvider, UnitSystem, WeatherError, config::Endpoints,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Seven days of hourly and daily data starting Monday 2024-01-15.
fn sample_forecast_response(hours: usize) -> serde_json::Value {
    let hourly_time: Vec<String> = (0..hours)
        .map(|h| format!("2024-01-{:02}T{:02}:00", 15 + h / 24, h % 24))
        .collect();
    let hourly_temp: Vec<f64> = (0..hours).map(|h| (h % 24) as f64).collect();
    let hourly_codes = vec![3; hours];

    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.419998,
        "timezone": "Europe/Berlin",
        "timezone_abbreviation": "CET",
        "current": {
            "time": "2024-01-15T12:00",
            "interval": 900,
            "temperature_2m": 5.5,
            "apparent_temperature": 2.0,
            "relative_humidity_2m": 75,
            "wind_speed_10m": 12.5,
            "precipitation": 0.3,
            "weather_code": 61
        },
        "hourly": {
            "time": hourly_time,
            "temperature_2m": hourly_temp,
            "weather_code": hourly_codes
        },
        "daily": {
            "time": ["2024-01-15", "2024-01-16", "2024-01-17", "2024-01-18",
                     "2024-01-19", "2024-01-20", "2024-01-21"],
            "weather_code": [61, 3, 0, 71, 95, 45, 2],
            "temperature_2m_max": [8.0, 6.0, 10.0, -1.0, 12.0, 4.0, 7.5],
            "temperature_2m_min": [2.0, 1.0, 3.0, -6.0, 5.0, 0.0, 1.5]
        }
    })
}

fn sample_search_response() -> serde_json::Value {
    serde_json::json!({
        "results": [
            {
                "id": 2950159,
                "name": "Berlin",
                "latitude": 52.52437,
                "longitude": 13.41053,
                "country_code": "DE",
                "country": "Germany",
                "admin1": "Land Berlin"
            },
            {
                "id": 5083330,
                "name": "Berlin",
                "latitude": 44.46867,
                "longitude": -71.18508,
                "country_code": "US",
                "country": "United States",
                "admin1": "New Hampshire"
            }
        ],
        "generationtime_ms": 0.7
    })
}

fn sample_reverse_response() -> serde_json::Value {
    serde_json::json!({
        "place_id": 123,
        "lat": "48.8566",
        "lon": "2.3522",
        "name": "",
        "display_name": "Paris, Île-de-France, France",
        "address": {
            "city": "Paris",
            "state": "Île-de-France",
            "country": "France",
            "country_code": "fr"
        }
    })
}

fn endpoints(server: &MockServer) -> Endpoints {
    Endpoints::with_base(&server.uri())
}

fn provider(server: &MockServer) -> OpenMeteoProvider {
    OpenMeteoProvider::new(endpoints(server).forecast_url, Duration::from_secs(5))
        .expect("Failed to create provider")
}

fn geocoder(server: &MockServer) -> OpenMeteoGeocoder {
    OpenMeteoGeocoder::new(&endpoints(server), Duration::from_secs(5))
        .expect("Failed to create geocoder")
}

fn fallback() -> Location {
    Location::new("London", "United Kingdom", 51.5074, -0.1278)
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Forecast fetcher
// ============================================================================

#[tokio::test]
async fn forecast_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("forecast_days", "7"))
        .and(query_param("timezone", "auto"))
        .and(query_param("temperature_unit", "celsius"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response(168)))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = provider(&server).fetch_forecast(52.52, 13.41).await;
    assert!(forecast.is_ok(), "Expected success, got: {forecast:?}");

    let forecast = forecast.unwrap();
    assert_eq!(forecast.daily.len(), 7);
    assert_eq!(forecast.hourly.len(), 168);
    assert!((forecast.current.temperature_c - 5.5).abs() < 1e-9);
    assert!((forecast.current.humidity_pct - 75.0).abs() < 1e-9);
    assert_eq!(forecast.current.weather_code, 61);
    assert!((forecast.daily[3].temp_min_c + 6.0).abs() < 1e-9);
}

#[tokio::test]
async fn forecast_server_error_is_network_error() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(500).set_body_string("Internal Server Error")).await;

    let result = provider(&server).fetch_forecast(52.52, 13.41).await;
    assert!(
        matches!(result, Err(WeatherError::Network(ref msg)) if msg.contains("500")),
        "Expected Network error, got: {result:?}"
    );
}

#[tokio::test]
async fn forecast_invalid_json_is_network_error() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_string("not valid json")).await;

    let result = provider(&server).fetch_forecast(52.52, 13.41).await;
    assert!(matches!(result, Err(WeatherError::Network(_))), "got: {result:?}");
}

#[tokio::test]
async fn forecast_invalid_coordinates_make_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response(168)))
        .expect(0)
        .mount(&server)
        .await;

    let result = provider(&server).fetch_forecast(f64::NAN, 13.41).await;
    assert!(matches!(result, Err(WeatherError::Validation(_))), "got: {result:?}");
}

// ============================================================================
// Geocoding
// ============================================================================

#[tokio::test]
async fn search_returns_candidates_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_search_response()))
        .mount(&server)
        .await;

    let places = geocoder(&server).search("Berlin").await.unwrap();
    assert_eq!(places.len(), 2);
    assert_eq!(places[0].country.as_deref(), Some("Germany"));
    assert_eq!(places[1].admin1.as_deref(), Some("New Hampshire"));
}

#[tokio::test]
async fn search_without_results_key_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"generationtime_ms": 0.2})),
        )
        .mount(&server)
        .await;

    let resolver = LocationResolver::new(geocoder(&server), fallback());
    let err = resolver.resolve_by_query("Qwxyz").await.unwrap_err();
    assert!(err.is_not_found(), "got: {err:?}");
}

#[tokio::test]
async fn search_server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let resolver = LocationResolver::new(geocoder(&server), fallback());
    let err = resolver.resolve_by_query("Berlin").await.unwrap_err();
    assert!(err.is_network(), "got: {err:?}");
}

#[tokio::test]
async fn reverse_uses_address_chain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "jsonv2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_reverse_response()))
        .mount(&server)
        .await;

    let resolver = LocationResolver::new(geocoder(&server), fallback());
    let location = resolver.resolve_by_coordinates(48.8566, 2.3522).await.unwrap();
    assert_eq!(location, Location::new("Paris", "France", 48.8566, 2.3522));
}

#[tokio::test]
async fn reverse_error_body_means_no_place() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "Unable to geocode"})),
        )
        .mount(&server)
        .await;

    let resolver = LocationResolver::new(geocoder(&server), fallback());
    let location = resolver.resolve_by_coordinates(0.0, -30.0).await.unwrap();
    assert_eq!(location, Location::new("Location", "", 0.0, -30.0));
}

#[tokio::test]
async fn reverse_service_failure_returns_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let resolver = LocationResolver::new(geocoder(&server), fallback());
    let location = resolver.resolve_by_coordinates(48.8566, 2.3522).await.unwrap();
    assert_eq!(location, fallback());
}

#[tokio::test]
async fn reverse_with_nan_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_reverse_response()))
        .expect(0)
        .mount(&server)
        .await;

    let resolver = LocationResolver::new(geocoder(&server), fallback());
    let err = resolver.resolve_by_coordinates(f64::NAN, 10.0).await.unwrap_err();
    assert!(err.is_validation());
}

// ============================================================================
// Full dashboard flow
// ============================================================================

#[tokio::test]
async fn dashboard_search_then_switch_units() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_search_response()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.52437"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response(150)))
        .expect(1)
        .mount(&server)
        .await;

    let mut dash = Dashboard::new(
        LocationResolver::new(geocoder(&server), fallback()),
        provider(&server),
        UnitSystem::Metric,
    );

    let view = dash.search("Berlin").await.unwrap();
    assert_eq!(view.current.location, "Berlin, Germany");
    assert_eq!(view.current.date, "Monday, Jan 15, 2024");
    assert_eq!(view.current.temperature, "6°");
    assert_eq!(view.current.precipitation, "0.3 mm");
    assert_eq!(view.current.emoji, "🌧️");
    assert_eq!(view.daily.len(), 7);
    assert_eq!(view.daily[0].label, "Today");
    assert_eq!(view.daily[1].label, "Tue");
    assert_eq!(view.days[1].label, "Tuesday");
    assert_eq!(view.hourly.len(), 8);

    let view = dash.set_units(UnitSystem::Imperial).unwrap();
    assert_eq!(view.current.temperature, "42°");
    assert_eq!(view.current.wind, "8 mph");
    assert_eq!(view.current.precipitation, "0.01 in");
    assert_eq!(view.daily[3].low, "21°");

    assert!(dash.select_day(6));
    let view = dash.view().unwrap();
    assert_eq!(view.hourly.len(), 2);
    assert_eq!(view.hourly[1].time, "3 AM");
}
