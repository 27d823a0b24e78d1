//! End-to-end tests over a real TCP connection.
//!
//! The server binds an ephemeral loopback port with a fixed clock, and the
//! tests speak plain HTTP/1.1 through a `TcpStream`, asserting on status
//! lines and bodies as a client would see them.

use chrono::{TimeZone, Utc};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;

use cityclock::config::Config;
use cityclock::logger::Log;
use cityclock::registry::CityRegistry;
use cityclock::server::Server;
use cityclock::time_source::FixedTimeSource;

fn start_server() -> SocketAddr {
    Log::set_enabled(false);
    let registry = Arc::new(CityRegistry::load().unwrap());
    // Monday 2025-06-09 12:00 UTC: 17:00 in Karachi, June, odd local hour.
    let instant = Utc.with_ymd_and_hms(2025, 6, 9, 12, 0, 0).unwrap();
    let server = Arc::new(Server::new(
        registry,
        Config::default(),
        Arc::new(FixedTimeSource(instant)),
        false,
    ));
    server.spawn_ephemeral().unwrap()
}

/// Issue a GET and return (status line, body).
fn get(addr: SocketAddr, path: &str) -> (String, String) {
    let mut stream = TcpStream::connect(addr).unwrap();
    write!(
        stream,
        "GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
    )
    .unwrap();

    let mut raw = String::new();
    stream.read_to_string(&mut raw).unwrap();
    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let status_line = head.lines().next().unwrap().to_string();
    (status_line, body.to_string())
}

#[test]
fn known_city_serves_full_time_payload() {
    let addr = start_server();
    let (status, body) = get(addr, "/api/time/Karachi");
    assert!(status.contains("200"), "unexpected status: {status}");

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["time"], "17:00:00");
    assert_eq!(json["date"], "Monday, Jun 09 2025");
    assert_eq!(json["utc_offset"], "+0500");
    assert_eq!(json["time_of_day"], "Day");
    assert_eq!(json["sunrise_sunset"]["sunrise"], "06:45");
    assert_eq!(json["sunrise_sunset"]["sunset"], "20:30");
    assert_eq!(json["sunrise_sunset"]["duration"], "14h 00m");
    assert_eq!(json["country"], "Pakistan");
}

#[test]
fn unknown_city_is_404_with_error_body() {
    let addr = start_server();
    let (status, body) = get(addr, "/api/time/Atlantis");
    assert!(status.contains("404"), "unexpected status: {status}");
    assert_eq!(body, r#"{"error":"City not found"}"#);
}

#[test]
fn cities_endpoint_lists_the_whole_table_idempotently() {
    let addr = start_server();
    let (status, first) = get(addr, "/api/cities");
    assert!(status.contains("200"));

    let json: serde_json::Value = serde_json::from_str(&first).unwrap();
    let cities = json.as_object().unwrap();
    assert_eq!(cities.len(), 20);
    for (name, entry) in cities {
        assert!(entry["timezone"].is_string(), "{name} missing timezone");
        assert!(entry["country"].is_string(), "{name} missing country");
        assert!(entry["lat"].is_number(), "{name} missing lat");
        assert!(entry["lon"].is_number(), "{name} missing lon");
    }

    let (_, second) = get(addr, "/api/cities");
    assert_eq!(first, second);
}

#[test]
fn index_page_is_html() {
    let addr = start_server();
    let (status, body) = get(addr, "/");
    assert!(status.contains("200"));
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("Karachi"));
    assert!(body.contains("17:00:00"));
}

#[test]
fn percent_encoded_names_resolve() {
    let addr = start_server();
    let (status, body) = get(addr, "/api/time/New%20York");
    assert!(status.contains("200"), "unexpected status: {status}");
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["utc_offset"], "-0400");
}
