//! Timestamp text formats for the conversion layer.
//!
//! Dates travel as RFC 1123 text (`Sun, 06 Nov 1994 08:49:37 GMT`) and
//! are accepted in either RFC 1123 or ISO 8601 form. All instants are
//! UTC; offsets in ISO 8601 input are normalized away.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

const RFC1123: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Parse RFC 1123 text, then ISO 8601 text, in that order.
pub fn parse(text: &str) -> Option<DateTime<Utc>> {
    parse_rfc1123(text).or_else(|| parse_iso8601(text))
}

/// Parse strictly RFC 1123 text with a literal `GMT` zone.
pub fn parse_rfc1123(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, RFC1123)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse ISO 8601 / RFC 3339 text, normalizing any offset to UTC.
pub fn parse_iso8601(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|fixed| fixed.with_timezone(&Utc))
}

/// Format as RFC 1123 with a literal `GMT` zone.
pub fn format_rfc1123(instant: &DateTime<Utc>) -> String {
    instant.format(RFC1123).to_string()
}

/// Format as ISO 8601 with millisecond precision and a `Z` zone.
pub fn format_iso8601(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Instant from a millisecond epoch offset.
///
/// `None` only for offsets outside chrono's representable range.
pub fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc1123_round_trip() {
        let text = "Sun, 06 Nov 1994 08:49:37 GMT";
        let parsed = parse_rfc1123(text).unwrap();
        assert_eq!(format_rfc1123(&parsed), text);
    }

    #[test]
    fn test_parse_falls_back_to_iso8601() {
        let parsed = parse("1994-11-06T08:49:37.000Z").unwrap();
        assert_eq!(format_rfc1123(&parsed), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_iso8601_offset_normalized_to_utc() {
        let parsed = parse_iso8601("1994-11-06T10:49:37.000+02:00").unwrap();
        assert_eq!(format_iso8601(&parsed), "1994-11-06T08:49:37.000Z");
    }

    #[test]
    fn test_from_millis() {
        let instant = from_millis(0).unwrap();
        assert_eq!(format_rfc1123(&instant), "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse("yesterday-ish").is_none());
        assert!(parse_rfc1123("1994-11-06T08:49:37.000Z").is_none());
    }
}
