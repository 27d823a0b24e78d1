//! HTTP façade composing the registry, resolver, classifier, and estimator.
//!
//! Three routes: the HTML index, `/api/cities`, and `/api/time/{city}`. All
//! handlers are synchronous and total; the only shared state is the immutable
//! registry, so no locking is needed anywhere. Route dispatch is separated
//! from socket handling so every response can be asserted on without a
//! listener.
//!
//! The listener itself is a plain blocking accept loop. SIGINT/SIGTERM flip a
//! shutdown flag and unblock the loop so the process exits cleanly.

pub mod page;

use anyhow::{Context, Result};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::json;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::clock;
use crate::config::Config;
use crate::phase::DayPhase;
use crate::registry::CityRegistry;
use crate::sun::SunWindow;
use crate::time_source::TimeSource;

/// A computed response, independent of the transport.
#[derive(Debug, PartialEq, Eq)]
pub struct ResponsePayload {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl ResponsePayload {
    fn json(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body,
        }
    }
}

/// JSON body for `/api/time/{city}`. Field order is the serialized order.
#[derive(Serialize)]
struct CityTimeBody {
    time: String,
    date: String,
    timezone: String,
    utc_offset: String,
    time_of_day: &'static str,
    sunrise_sunset: SunWindow,
    country: &'static str,
}

/// The world clock HTTP server.
///
/// Holds the registry, the resolved configuration, and the clock source.
/// Everything is injected at construction; there is no global state.
pub struct Server {
    registry: Arc<CityRegistry>,
    config: Config,
    time_source: Arc<dyn TimeSource>,
    debug_enabled: bool,
}

impl Server {
    pub fn new(
        registry: Arc<CityRegistry>,
        config: Config,
        time_source: Arc<dyn TimeSource>,
        debug_enabled: bool,
    ) -> Self {
        Self {
            registry,
            config,
            time_source,
            debug_enabled,
        }
    }

    /// Bind the configured address and serve until SIGINT/SIGTERM.
    pub fn run(&self) -> Result<()> {
        let address = self.config.bind_address();
        let http = tiny_http::Server::http(&address)
            .map_err(|e| anyhow::anyhow!("Failed to bind {address}: {e}"))?;

        log_block_start!("Listening on http://{address}");
        log_indented!("main city: {}", self.config.main_city);
        log_indented!("featured: {}", self.config.featured_cities.join(", "));

        self.serve(http)
    }

    /// Serve requests on an already-bound listener.
    ///
    /// Split from [`run`](Self::run) so tests can bind an ephemeral port.
    pub fn serve(&self, http: tiny_http::Server) -> Result<()> {
        let http = Arc::new(http);
        let running = Arc::new(AtomicBool::new(true));

        let mut signals =
            Signals::new([SIGINT, SIGTERM]).context("Failed to register signal handler")?;
        {
            let http = Arc::clone(&http);
            let running = Arc::clone(&running);
            std::thread::spawn(move || {
                if signals.forever().next().is_some() {
                    running.store(false, Ordering::SeqCst);
                    http.unblock();
                }
            });
        }

        while running.load(Ordering::SeqCst) {
            // recv() returns Err once unblock() fires during shutdown.
            let request = match http.recv() {
                Ok(request) => request,
                Err(_) => break,
            };
            self.respond(request);
        }

        log_block_start!("Shutting down");
        Ok(())
    }

    /// Bind an ephemeral loopback port and serve on a background thread.
    ///
    /// Returns the bound address. Used by integration tests; the production
    /// path is [`run`](Self::run).
    #[cfg(any(test, feature = "testing-support"))]
    pub fn spawn_ephemeral(self: Arc<Self>) -> Result<std::net::SocketAddr> {
        let http = tiny_http::Server::http("127.0.0.1:0")
            .map_err(|e| anyhow::anyhow!("Failed to bind ephemeral port: {e}"))?;
        let addr = http
            .server_addr()
            .to_ip()
            .context("Listener has no IP address")?;
        std::thread::spawn(move || {
            let _ = self.serve(http);
        });
        Ok(addr)
    }

    /// Answer one request and log it in debug mode.
    fn respond(&self, request: tiny_http::Request) {
        let method = request.method().clone();
        let url = request.url().to_string();

        let payload = if method == tiny_http::Method::Get {
            self.handle(&url)
        } else {
            ResponsePayload::json(405, error_json("Method not allowed"))
        };

        if self.debug_enabled {
            log_debug!("{} {} -> {}", method, url, payload.status);
        }

        let header = tiny_http::Header::from_bytes(
            &b"Content-Type"[..],
            payload.content_type.as_bytes(),
        )
        .expect("static header is valid");
        let response = tiny_http::Response::from_string(payload.body)
            .with_status_code(payload.status)
            .with_header(header);
        if let Err(e) = request.respond(response) {
            log_warning!("Failed to write response for {}: {}", url, e);
        }
    }

    /// Dispatch a GET request path to a handler.
    ///
    /// Pure with respect to the transport: same path and instant, same bytes.
    pub fn handle(&self, path: &str) -> ResponsePayload {
        // The city segment may carry a query string from client polling.
        let path = path.split('?').next().unwrap_or(path);

        match path {
            "/" => ResponsePayload::html(self.render_index()),
            "/api/cities" => ResponsePayload::json(200, self.cities_body()),
            _ => match path.strip_prefix("/api/time/") {
                Some(segment) => self.city_time(segment),
                None => ResponsePayload::json(404, error_json("Not found")),
            },
        }
    }

    /// `/api/cities`: every registry entry, keyed by name, in table order.
    fn cities_body(&self) -> String {
        let mut cities = serde_json::Map::new();
        for record in self.registry.all() {
            cities.insert(
                record.name.to_string(),
                json!({
                    "timezone": record.zone_id,
                    "country": record.country,
                    "lat": record.latitude,
                    "lon": record.longitude,
                }),
            );
        }
        serde_json::Value::Object(cities).to_string()
    }

    /// `/api/time/{city}`: snapshot, phase, and sun window for one city.
    fn city_time(&self, segment: &str) -> ResponsePayload {
        let name = match percent_decode_str(segment).decode_utf8() {
            Ok(name) => name,
            Err(_) => return ResponsePayload::json(404, error_json("City not found")),
        };

        let Some(record) = self.registry.lookup(&name) else {
            return ResponsePayload::json(404, error_json("City not found"));
        };

        let now = self.time_source.now();
        let snapshot = clock::resolve(record, now);
        let body = CityTimeBody {
            time: snapshot.time,
            date: snapshot.date,
            timezone: snapshot.timezone,
            utc_offset: snapshot.utc_offset,
            time_of_day: DayPhase::classify(clock::local_hour(record, now)).as_str(),
            sunrise_sunset: SunWindow::estimate(Some(record), now),
            country: record.country,
        };
        match serde_json::to_string(&body) {
            Ok(body) => ResponsePayload::json(200, body),
            // Serialization of plain strings cannot fail; keep the route total anyway.
            Err(_) => ResponsePayload::json(500, error_json("Internal error")),
        }
    }

    fn render_index(&self) -> String {
        page::render_index(self.registry.as_ref(), &self.config, self.time_source.now())
    }
}

fn error_json(message: &str) -> String {
    json!({ "error": message }).to_string()
}
