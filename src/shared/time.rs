//! Date formatting helpers.
//!
//! Entity date columns and email bodies carry dates as formatted strings,
//! so every producer goes through the same formatter.

use chrono::{DateTime, Utc};

/// Canonical date-time format used in persisted date strings and emails.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp with the canonical format.
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format(DATE_FORMAT).to_string()
}

/// Convert a Unix timestamp in seconds (as delivered by Stripe) to a UTC
/// date-time. Out-of-range timestamps collapse to the epoch.
pub fn timestamp_to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 14, 9, 26, 53).unwrap();
        assert_eq!(format_datetime(dt), "2024-03-14 09:26:53");
    }

    #[test]
    fn test_timestamp_to_datetime_roundtrip() {
        let dt = timestamp_to_datetime(1_700_000_000);
        assert_eq!(dt.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_out_of_range_timestamp_is_epoch() {
        let dt = timestamp_to_datetime(i64::MAX);
        assert_eq!(dt.timestamp(), 0);
    }
}
