//! Immutable city registry.
//!
//! The registry is built once at startup from a fixed literal table and never
//! mutated afterwards. Every entry's IANA zone identifier is parsed during
//! construction; an unresolvable zone is a fatal configuration error, never a
//! per-request one. Iteration order is the table literal order, which the
//! city listing endpoints rely on for deterministic output.

use anyhow::{Context, Result};
use chrono_tz::Tz;

/// One raw row of the city table: name, IANA zone id, country, latitude,
/// longitude. Coordinates are served as-is and never enter any calculation.
type CityRow = (&'static str, &'static str, &'static str, f64, f64);

/// The fixed city table. Order here is the order every listing renders in.
const CITY_TABLE: &[CityRow] = &[
    ("Karachi", "Asia/Karachi", "Pakistan", 24.8607, 67.0011),
    ("Lahore", "Asia/Karachi", "Pakistan", 31.5204, 74.3587),
    ("Islamabad", "Asia/Karachi", "Pakistan", 33.6844, 73.0479),
    ("London", "Europe/London", "United Kingdom", 51.5074, -0.1278),
    ("New York", "America/New_York", "United States", 40.7128, -74.0060),
    ("Los Angeles", "America/Los_Angeles", "United States", 34.0522, -118.2437),
    ("Toronto", "America/Toronto", "Canada", 43.6532, -79.3832),
    ("Mexico City", "America/Mexico_City", "Mexico", 19.4326, -99.1332),
    ("Sao Paulo", "America/Sao_Paulo", "Brazil", -23.5505, -46.6333),
    ("Paris", "Europe/Paris", "France", 48.8566, 2.3522),
    ("Berlin", "Europe/Berlin", "Germany", 52.5200, 13.4050),
    ("Moscow", "Europe/Moscow", "Russia", 55.7558, 37.6173),
    ("Istanbul", "Europe/Istanbul", "Turkey", 41.0082, 28.9784),
    ("Cairo", "Africa/Cairo", "Egypt", 30.0444, 31.2357),
    ("Dubai", "Asia/Dubai", "United Arab Emirates", 25.2048, 55.2708),
    ("Mumbai", "Asia/Kolkata", "India", 19.0760, 72.8777),
    ("Singapore", "Asia/Singapore", "Singapore", 1.3521, 103.8198),
    ("Beijing", "Asia/Shanghai", "China", 39.9042, 116.4074),
    ("Tokyo", "Asia/Tokyo", "Japan", 35.6762, 139.6503),
    ("Sydney", "Australia/Sydney", "Australia", -33.8688, 151.2093),
];

/// A single city with its resolved timezone.
///
/// Records are constructed once by [`CityRegistry::load`] and shared
/// immutably for the process lifetime.
#[derive(Debug, Clone)]
pub struct CityRecord {
    pub name: &'static str,
    /// The IANA zone identifier as written in the table (e.g. "Asia/Karachi").
    pub zone_id: &'static str,
    pub country: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Zone rules resolved from `zone_id` at startup.
    pub tz: Tz,
}

/// Read-only name-to-city mapping preserving table order.
#[derive(Debug)]
pub struct CityRegistry {
    records: Vec<CityRecord>,
}

impl CityRegistry {
    /// Build the registry from the fixed table, resolving every zone id.
    ///
    /// Fails if any entry carries an IANA identifier the bundled timezone
    /// database cannot resolve. The table is static, so this can only happen
    /// when an entry is edited incorrectly; the service must not start in
    /// that state.
    pub fn load() -> Result<Self> {
        let mut records = Vec::with_capacity(CITY_TABLE.len());
        for &(name, zone_id, country, latitude, longitude) in CITY_TABLE {
            let tz: Tz = zone_id
                .parse()
                .ok()
                .with_context(|| format!("Invalid IANA zone id {zone_id:?} for city {name:?}"))?;
            records.push(CityRecord {
                name,
                zone_id,
                country,
                latitude,
                longitude,
                tz,
            });
        }
        Ok(Self { records })
    }

    /// Look up a city by exact name. Case-sensitive, no normalization.
    pub fn lookup(&self, name: &str) -> Option<&CityRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    /// All cities in table order.
    pub fn all(&self) -> impl Iterator<Item = &CityRecord> {
        self.records.iter()
    }

    /// Number of cities in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table is empty. Never the case for the shipped table,
    /// but keeps the type honest.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
