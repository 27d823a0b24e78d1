//! Wall-clock resolution for registry cities.
//!
//! Converts an instant into a city's local wall-clock fields using the zone
//! rules resolved at registry load. DST is handled by the zone itself: the
//! registry stores zone identifiers, not fixed offsets, so the offset printed
//! here is whatever the zone's rules say applies at the given instant.

use chrono::{DateTime, Timelike, Utc};

use crate::registry::CityRecord;

/// Formatted local-time fields for one city at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSnapshot {
    /// Zero-padded 24-hour clock, `HH:MM:SS`.
    pub time: String,
    /// Human-readable date, e.g. `Monday, Jun 09 2025`.
    pub date: String,
    /// Zone abbreviation and offset together, e.g. `PKT +0500`.
    pub timezone: String,
    /// Signed offset only, `±HHMM`. Sign is always present.
    pub utc_offset: String,
}

/// Resolve a city's wall-clock fields at `instant`.
///
/// Total for any registry record: the zone was validated at load, and every
/// instant has a defined local time in every zone.
pub fn resolve(record: &CityRecord, instant: DateTime<Utc>) -> TimeSnapshot {
    let local = instant.with_timezone(&record.tz);
    TimeSnapshot {
        time: local.format("%H:%M:%S").to_string(),
        date: local.format("%A, %b %d %Y").to_string(),
        timezone: local.format("%Z %z").to_string(),
        utc_offset: local.format("%z").to_string(),
    }
}

/// The city's local hour-of-day (0-23) at `instant`.
///
/// Feeds the day-phase classifier; split out so callers do not reparse the
/// formatted snapshot.
pub fn local_hour(record: &CityRecord, instant: DateTime<Utc>) -> u32 {
    instant.with_timezone(&record.tz).hour()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CityRegistry;
    use chrono::TimeZone;

    fn registry() -> CityRegistry {
        CityRegistry::load().unwrap()
    }

    #[test]
    fn karachi_fields_at_fixed_instant() {
        let registry = registry();
        let karachi = registry.lookup("Karachi").unwrap();
        let instant = Utc.with_ymd_and_hms(2025, 6, 9, 12, 0, 0).unwrap();
        let snapshot = resolve(karachi, instant);

        assert_eq!(snapshot.time, "17:00:00");
        assert_eq!(snapshot.date, "Monday, Jun 09 2025");
        assert_eq!(snapshot.utc_offset, "+0500");
        assert!(snapshot.timezone.ends_with("+0500"));
        assert_eq!(local_hour(karachi, instant), 17);
    }

    #[test]
    fn dst_offsets_follow_the_zone_rules() {
        let registry = registry();
        let new_york = registry.lookup("New York").unwrap();

        let summer = Utc.with_ymd_and_hms(2025, 6, 9, 12, 0, 0).unwrap();
        let snapshot = resolve(new_york, summer);
        assert_eq!(snapshot.time, "08:00:00");
        assert_eq!(snapshot.utc_offset, "-0400");
        assert!(snapshot.timezone.starts_with("EDT"));

        let winter = Utc.with_ymd_and_hms(2025, 12, 25, 12, 0, 0).unwrap();
        let snapshot = resolve(new_york, winter);
        assert_eq!(snapshot.time, "07:00:00");
        assert_eq!(snapshot.utc_offset, "-0500");
        assert!(snapshot.timezone.starts_with("EST"));
    }

    #[test]
    fn midnight_rolls_the_date_in_the_city_zone() {
        let registry = registry();
        let tokyo = registry.lookup("Tokyo").unwrap();
        // 20:30 UTC on the 9th is already 05:30 on the 10th in Tokyo.
        let instant = Utc.with_ymd_and_hms(2025, 6, 9, 20, 30, 0).unwrap();
        let snapshot = resolve(tokyo, instant);
        assert_eq!(snapshot.time, "05:30:00");
        assert_eq!(snapshot.date, "Tuesday, Jun 10 2025");
        assert_eq!(snapshot.utc_offset, "+0900");
    }

    #[test]
    fn every_city_formats_consistently() {
        let registry = registry();
        let instant = Utc.with_ymd_and_hms(2025, 6, 9, 12, 0, 0).unwrap();
        for record in registry.all() {
            let snapshot = resolve(record, instant);
            assert_eq!(snapshot.time.len(), 8, "time for {}", record.name);
            assert!(snapshot.time.as_bytes()[2] == b':' && snapshot.time.as_bytes()[5] == b':');
            assert_eq!(snapshot.utc_offset.len(), 5, "offset for {}", record.name);
            assert!(snapshot.utc_offset.starts_with('+') || snapshot.utc_offset.starts_with('-'));
            assert!(
                snapshot.utc_offset[1..].chars().all(|c| c.is_ascii_digit()),
                "offset digits for {}",
                record.name
            );
            assert!(snapshot.timezone.ends_with(&snapshot.utc_offset));
        }
    }
}
