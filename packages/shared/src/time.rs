//! Wall-clock access for login times and chat timestamps.
//!
//! Usecases take an `Arc<dyn Clock>` so tests can pin the time.

use chrono::{DateTime, TimeZone, Utc};

/// Layout of every timestamp sent to clients.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// The current time as `YYYY-MM-DD HH:MM:SS` (UTC).
    fn now_formatted(&self) -> String {
        format_datetime(self.now_millis())
    }
}

/// Reads the system time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Always reports the instant it was built with.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    millis: i64,
}

impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self { millis }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis
    }
}

/// Render epoch milliseconds with [`DATETIME_FORMAT`] in UTC.
///
/// Sub-second precision is dropped. Out-of-range input renders as the epoch.
pub fn format_datetime(timestamp_millis: i64) -> String {
    let dt: DateTime<Utc> = Utc
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .unwrap_or_default();
    dt.format(DATETIME_FORMAT).to_string()
}
