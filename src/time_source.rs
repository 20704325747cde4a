//! Time source abstraction for supporting both real and frozen time.
//!
//! This module provides a trait-based abstraction that allows the application
//! to read either the actual system clock or a fixed instant. The fixed mode
//! backs the `simulate` command and lets tests exercise the display pipeline
//! against a known moment instead of waiting for real time to pass.

use chrono::{DateTime, FixedOffset, Local};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration as StdDuration;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current time with the viewer's UTC offset attached
    fn now(&self) -> DateTime<FixedOffset>;

    /// Sleep for the specified duration (or skip it)
    fn sleep(&self, duration: StdDuration);

    /// Check if this is a simulated time source
    fn is_simulated(&self) -> bool;
}

/// Real-time implementation that uses the actual system clock.
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Frozen time source for the `simulate` command and tests.
///
/// Always reports the same instant and treats sleeps as elapsed immediately,
/// since nothing real is being waited for.
pub struct FixedTimeSource {
    instant: DateTime<FixedOffset>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }

    fn sleep(&self, _duration: StdDuration) {
        // Frozen clock, nothing to wait for
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Get the current time from the global time source
pub fn now() -> DateTime<FixedOffset> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource)).now()
}

/// Sleep for the specified duration using the global time source
pub fn sleep(duration: StdDuration) {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .sleep(duration)
}

/// Check if we're running against a frozen clock
pub fn is_simulated() -> bool {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .is_simulated()
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS", interpreted
/// in the viewer's local timezone.
pub fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, String> {
    use chrono::{NaiveDateTime, TimeZone};

    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| {
            Local
                .from_local_datetime(&naive)
                .single()
                .map(|local| local.fixed_offset())
                .ok_or_else(|| "Ambiguous or invalid local time".to_string())
        })
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))
        .and_then(|r| r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_source_reports_its_instant() {
        let instant = parse_datetime("2025-10-21 12:30:00").expect("valid datetime");
        let source = FixedTimeSource::new(instant);
        assert_eq!(source.now(), instant);
        assert!(source.is_simulated());
    }

    #[test]
    fn rejects_malformed_datetime() {
        assert!(parse_datetime("2025-10-21").is_err());
        assert!(parse_datetime("not a date").is_err());
        assert!(parse_datetime("2025-13-40 99:99:99").is_err());
    }
}
