//! Synthetic sunrise/sunset window estimation.
//!
//! This is deliberately not an ephemeris. The window is a deterministic
//! function of the city's local hour and month only: months March through
//! September get earlier sunrises and later sunsets, and the minute fields
//! alternate with the parity of the current hour. The duration string is
//! derived from the hour components alone, ignoring the minute fields — that
//! inconsistency is part of the served contract and is reproduced as-is
//! rather than corrected.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;

use crate::registry::CityRecord;

/// Sunrise/sunset/duration strings served under `sunrise_sunset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SunWindow {
    pub sunrise: String,
    pub sunset: String,
    pub duration: String,
}

impl SunWindow {
    /// Fixed window returned when no city record is available.
    pub fn fallback() -> Self {
        Self {
            sunrise: "07:00".to_string(),
            sunset: "19:00".to_string(),
            duration: "12h 00m".to_string(),
        }
    }

    /// Estimate the window for a city at `instant`.
    ///
    /// `None` (unknown city) yields the fixed fallback window. For a known
    /// city the result depends only on the local hour and month in the
    /// city's zone, so it is pure and never fails.
    pub fn estimate(city: Option<&CityRecord>, instant: DateTime<Utc>) -> Self {
        let Some(record) = city else {
            return Self::fallback();
        };

        let local = instant.with_timezone(&record.tz);
        let hour = local.hour();
        let month = local.month();

        let (sunrise_hour, sunset_hour) = if (3..=9).contains(&month) {
            (6u32, 20u32)
        } else {
            (7u32, 18u32)
        };

        let (sunrise_minute, sunset_minute) = if hour % 2 == 0 { (30, 15) } else { (45, 30) };

        // Duration intentionally ignores the minute fields.
        let hour_span = sunset_hour - sunrise_hour;
        Self {
            sunrise: format!("{sunrise_hour:02}:{sunrise_minute:02}"),
            sunset: format!("{sunset_hour:02}:{sunset_minute:02}"),
            duration: format!("{hour_span}h {:02}m", (hour_span * 60) % 60),
        }
    }
}
