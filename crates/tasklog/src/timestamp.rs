use chrono::{DateTime, NaiveDateTime, Utc};

/// Formats without an offset observed in backend dumps. Parsed as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// Parses an ISO-ish backend timestamp, tolerating the common variants
/// (RFC 3339, naive `T`-separated, naive space-separated, with or without
/// fractional seconds).
///
/// Returns `None` on anything unparsable; callers treat such lines as
/// "always included" rather than erroring.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    None
}
