//! Timestamp utilities

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current UTC time as an ISO-8601 string with millisecond precision
///
/// Matches the `2024-05-01T12:34:56.789Z` shape browsers produce, which is
/// what the sinks have always received.
pub fn now_iso8601() -> String {
    to_iso8601(&now())
}

/// Format a timestamp as ISO-8601 with millisecond precision and `Z` suffix
pub fn to_iso8601(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
