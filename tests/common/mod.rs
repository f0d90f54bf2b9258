//! Shared fixtures for the mock-mirror tests.

#![allow(dead_code)]

use radio_curator::models::Config;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config with no delays and short timeouts.
pub fn test_config(endpoints: Vec<String>, fallback: String) -> Config {
    let mut config = Config::default();
    config.fetch.request_timeout_secs = 5;
    config.fetch.probe_timeout_secs = 5;
    config.fetch.retry_delay_ms = 0;
    config.fetch.page_delay_ms = 0;
    config.fetch.max_attempts = 2;
    config.mirrors.endpoints = endpoints;
    config.mirrors.fallback = fallback;
    config
}

/// A well-formed station record.
pub fn station(id: usize, country: &str, votes: i64) -> Value {
    json!({
        "stationuuid": format!("uuid-{id}"),
        "name": format!("Station {id}"),
        "country": country,
        "countrycode": "",
        "url": format!("http://stream.example/{id}"),
        "url_resolved": format!("https://stream.example/{id}"),
        "tags": "jazz,news",
        "language": "English",
        "votes": votes,
        "clickcount": 1,
        "geo_lat": null,
        "geo_long": null,
        "lastcheckok": 1
    })
}

/// Stations `range.start..range.end`, all in France with one vote each.
pub fn stations(range: std::ops::Range<usize>) -> Value {
    Value::Array(range.map(|id| station(id, "France", 1)).collect())
}

/// Answer `limit=1` requests with one station and an optional count header.
pub async fn mount_count(server: &MockServer, total: Option<u64>) {
    let mut template = ResponseTemplate::new(200).set_body_json(stations(0..1));
    if let Some(total) = total {
        template = template.insert_header("x-total-count", total.to_string().as_str());
    }
    Mock::given(method("GET"))
        .and(path("/stations"))
        .and(query_param("limit", "1"))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Answer one page request with `body`.
pub async fn mount_page(server: &MockServer, offset: u64, limit: u64, body: Value) {
    Mock::given(method("GET"))
        .and(path("/stations"))
        .and(query_param("offset", offset.to_string().as_str()))
        .and(query_param("limit", limit.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// A mirror that fails every request with `status`.
pub async fn failing_mirror(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}
