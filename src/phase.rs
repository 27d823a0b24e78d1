//! Coarse day-phase classification from local hour-of-day.

use std::fmt;

/// One of four coarse labels for a city's local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Morning,
    Day,
    Evening,
    Night,
}

impl DayPhase {
    /// Classify an hour-of-day (0-23) into a phase.
    ///
    /// Ranges are half-open: `[6,12)` morning, `[12,18)` day, `[18,22)`
    /// evening, everything else night. Total over the valid hour range.
    pub fn classify(hour: u32) -> Self {
        match hour {
            6..=11 => DayPhase::Morning,
            12..=17 => DayPhase::Day,
            18..=21 => DayPhase::Evening,
            _ => DayPhase::Night,
        }
    }

    /// Label used in JSON responses and the HTML page.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayPhase::Morning => "Morning",
            DayPhase::Day => "Day",
            DayPhase::Evening => "Evening",
            DayPhase::Night => "Night",
        }
    }
}

impl fmt::Display for DayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
