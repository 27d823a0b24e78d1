//! Clock abstraction separating "now" from the code that formats it.
//!
//! The server takes a `TimeSource` at construction so production uses the
//! system clock while tests pin a fixed instant and get byte-stable responses.

use chrono::{DateTime, Utc};

/// Source of the current instant.
pub trait TimeSource: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Production source backed by the system clock.
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed-instant source for deterministic tests.
#[cfg(any(test, feature = "testing-support"))]
pub struct FixedTimeSource(pub DateTime<Utc>);

#[cfg(any(test, feature = "testing-support"))]
impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
