// SPDX-License-Identifier: Apache-2.0

//! Multi-format timestamp parsing shared by the query translator and the
//! log line parser.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Parse a timestamp literal, trying formats from most to least specific:
/// RFC 3339 instant or offset date-time, local date-time interpreted in the
/// process-local zone, then a bare date at midnight local. The first form
/// that parses wins.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return local_to_utc(naive);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).and_then(local_to_utc);
    }
    None
}

/// Format an instant the way the search index stores timestamps: RFC 3339
/// UTC with a `Z` suffix and subseconds only when nonzero.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_instant() {
        let dt = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(format_instant(&dt), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn parses_offset_datetime() {
        let dt = parse_timestamp("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(format_instant(&dt), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn parses_local_datetime_and_bare_date() {
        assert!(parse_timestamp("2024-01-01T10:30:00").is_some());
        assert!(parse_timestamp("2024-01-01T10:30:00.250").is_some());
        assert!(parse_timestamp("2024-01-01").is_some());
    }

    #[test]
    fn subseconds_appear_only_when_nonzero() {
        let dt = parse_timestamp("2024-01-01T00:00:00.500Z").unwrap();
        assert_eq!(format_instant(&dt), "2024-01-01T00:00:00.500Z");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(parse_timestamp("  2024-01-01T00:00:00Z ").is_some());
    }

    #[test]
    fn rejects_garbage_and_empty() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("  ").is_none());
        assert!(parse_timestamp("not-a-time").is_none());
        assert!(parse_timestamp("01/02/2024").is_none());
    }
}
