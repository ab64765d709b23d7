//! Tolerant timestamp parsing for backend payloads.
//!
//! The backend emits RFC 3339 timestamps for cache entries
//! (`2024-05-01T10:00:00Z`) and naive ISO-8601 datetimes for database rows
//! (`2024-05-01T10:00:00`). Naive values are interpreted as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parse either an RFC 3339 timestamp or a naive datetime (taken as UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    let normalized = raw.replacen(' ', "T", 1);
    normalized
        .parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}

/// Serde adapter for `#[serde(deserialize_with = "...")]`.
///
/// # Errors
///
/// Returns a deserialization error when the value is not a string or matches
/// neither accepted format.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use rstest::rstest;

    use super::parse_timestamp;

    #[rstest]
    #[case("2024-05-01T10:00:00Z")]
    #[case("2024-05-01T10:00:00")]
    #[case("2024-05-01T10:00:00.123456")]
    #[case("2024-05-01 10:00:00")]
    #[case("2024-05-01T12:00:00+02:00")]
    fn accepts_backend_formats(#[case] raw: &str) {
        let parsed = parse_timestamp(raw).expect("timestamp should parse");
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.month(), 5);
        assert_eq!(parsed.hour(), 10);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
