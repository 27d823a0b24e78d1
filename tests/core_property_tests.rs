//! Property tests for the pure core: day-phase classification, sun-window
//! estimation, and snapshot formatting.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use cityclock::clock;
use cityclock::phase::DayPhase;
use cityclock::registry::CityRegistry;
use cityclock::sun::SunWindow;

/// Generate instants between 2000-01-01 and 2100-01-01.
fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..4_102_444_800i64)
        .prop_map(|secs| Utc.timestamp_opt(secs, 0).single().unwrap())
}

fn hour_strategy() -> impl Strategy<Value = u32> {
    0u32..24
}

proptest! {
    /// Every hour maps to exactly one phase, and the mapping follows the
    /// half-open range boundaries.
    #[test]
    fn classification_is_total_and_range_based(hour in hour_strategy()) {
        let phase = DayPhase::classify(hour);
        let expected = match hour {
            h if (6..12).contains(&h) => DayPhase::Morning,
            h if (12..18).contains(&h) => DayPhase::Day,
            h if (18..22).contains(&h) => DayPhase::Evening,
            _ => DayPhase::Night,
        };
        prop_assert_eq!(phase, expected);
    }

    /// For every registry city and any instant, the sun window is one of the
    /// four shapes the formula can produce, and the duration ignores minutes.
    #[test]
    fn sun_window_shape_is_closed(instant in instant_strategy()) {
        let registry = CityRegistry::load().unwrap();
        for record in registry.all() {
            let window = SunWindow::estimate(Some(record), instant);
            let shape = (
                window.sunrise.as_str(),
                window.sunset.as_str(),
                window.duration.as_str(),
            );
            prop_assert!(
                matches!(
                    shape,
                    ("06:30", "20:15", "14h 00m")
                        | ("06:45", "20:30", "14h 00m")
                        | ("07:30", "18:15", "11h 00m")
                        | ("07:45", "18:30", "11h 00m")
                ),
                "unexpected window {:?} for {}",
                shape,
                record.name
            );
        }
    }

    /// Snapshot formatting invariants from the contract: `HH:MM:SS` time and
    /// a signed four-digit offset, with the combined timezone string ending
    /// in that offset.
    #[test]
    fn snapshot_formats_hold_for_all_cities(instant in instant_strategy()) {
        let registry = CityRegistry::load().unwrap();
        for record in registry.all() {
            let snapshot = clock::resolve(record, instant);

            let time = snapshot.time.as_bytes();
            prop_assert_eq!(time.len(), 8);
            prop_assert!(time[2] == b':' && time[5] == b':');
            let time_chars_ok = time.iter().enumerate().all(|(i, b)| {
                if i == 2 || i == 5 { *b == b':' } else { b.is_ascii_digit() }
            });
            prop_assert!(time_chars_ok);

            let offset = snapshot.utc_offset.as_bytes();
            prop_assert_eq!(offset.len(), 5);
            prop_assert!(offset[0] == b'+' || offset[0] == b'-');
            prop_assert!(offset[1..].iter().all(|b| b.is_ascii_digit()));

            prop_assert!(snapshot.timezone.ends_with(snapshot.utc_offset.as_str()));

            // The hour feeding the classifier agrees with the formatted time.
            let hour = clock::local_hour(record, instant);
            let formatted_hour: u32 = snapshot.time[..2].parse().unwrap();
            prop_assert_eq!(hour, formatted_hour);
        }
    }

    /// The unknown-city fallback never varies with the instant.
    #[test]
    fn fallback_window_is_constant(instant in instant_strategy()) {
        let window = SunWindow::estimate(None, instant);
        prop_assert_eq!(window, SunWindow::fallback());
    }
}
