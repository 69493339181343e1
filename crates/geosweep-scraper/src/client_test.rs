use super::*;

fn client(base_url: &str) -> LocationClient {
    LocationClient::new(base_url, 5, "geosweep-test/0.1").expect("failed to build test client")
}

#[test]
fn location_search_url_formats_coordinates() {
    let url = client("https://www.instagram.com").location_search_url(QueryPoint::new(40.0, -73.0));
    assert_eq!(
        url.as_str(),
        "https://www.instagram.com/location_search/?latitude=40&longitude=-73&__a=1"
    );
}

#[test]
fn location_search_url_separates_sub_microdegree_points() {
    let client = client("https://www.instagram.com");
    let center = QueryPoint::new(40.0, -73.0);
    let nudged = QueryPoint::new(40.0 + 3e-7, -73.0 - 1e-9);

    let center_url = client.location_search_url(center);
    let nudged_url = client.location_search_url(nudged);
    assert_ne!(center_url, nudged_url);

    let pairs: std::collections::HashMap<String, String> =
        nudged_url.query_pairs().into_owned().collect();
    let lat: f64 = pairs["latitude"].parse().unwrap();
    let lng: f64 = pairs["longitude"].parse().unwrap();
    assert_eq!(lat.to_bits(), nudged.lat.to_bits());
    assert_eq!(lng.to_bits(), nudged.lng.to_bits());
}

#[test]
fn location_search_url_keeps_base_path() {
    let url = client("http://localhost:8080/proxy/").location_search_url(QueryPoint::new(1.5, 2.25));
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/proxy/location_search/?latitude=1.5&longitude=2.25&__a=1"
    );
}

#[test]
fn topsearch_url_encodes_query() {
    let url = client("https://www.instagram.com").topsearch_url("times square");
    assert_eq!(
        url.as_str(),
        "https://www.instagram.com/web/search/topsearch/?context=place&query=times+square"
    );
}

#[test]
fn new_rejects_relative_base_url() {
    let result = LocationClient::new("not-a-url", 5, "ua");
    assert!(
        matches!(result, Err(ScraperError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn new_rejects_non_http_scheme() {
    let result = LocationClient::new("ftp://example.com", 5, "ua");
    assert!(matches!(result, Err(ScraperError::InvalidBaseUrl { .. })));
}

#[test]
fn body_url_strips_query() {
    let url = reqwest::Url::parse("https://example.com/location_search/?latitude=1").unwrap();
    assert_eq!(body_url(&url), "https://example.com/location_search/");
}

#[test]
fn decode_records_keeps_every_object() {
    let values = vec![
        serde_json::json!({"external_id": 1, "lat": 1.0, "lng": 2.0}),
        serde_json::json!({"external_id": 2, "lat": "north", "address": 123}),
        serde_json::json!("not an object"),
        serde_json::json!({"name": "no id", "address": null}),
        serde_json::json!(null),
    ];
    let records = decode_records(values);

    assert_eq!(records.len(), 3);
    assert_eq!(records[1].external_id(), Some(geosweep_core::ExternalId::Numeric(2)));
    assert_eq!(records[1].lat(), None);
    assert_eq!(records[1].get("address"), Some(&serde_json::json!(123)));
    assert!(records[2].get("address").is_some_and(Value::is_null));
}
