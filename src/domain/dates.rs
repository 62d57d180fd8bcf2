use chrono::{DateTime, NaiveDate, Utc};

/// Shown when a feed date is missing or cannot be parsed.
pub const DATE_UNAVAILABLE: &str = "Date unavailable";

/// Parse a feed date leniently. RFC 2822 (RSS), RFC 3339 (Atom) and bare
/// `YYYY-MM-DD` are accepted; everything is normalized to UTC.
pub fn parse_feed_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Short form, e.g. "Jan 1, 2024".
pub fn format_date(raw: &str, fallback: &str) -> String {
    parse_feed_date(raw)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// Long form, e.g. "January 1, 2024".
pub fn format_date_long(raw: &str, fallback: &str) -> String {
    parse_feed_date(raw)
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| fallback.to_string())
}
