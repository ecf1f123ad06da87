use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Render a backend timestamp as `DD/MM/YYYY` using UTC calendar fields.
///
/// Timestamps with an offset are converted to UTC first. Timestamps without
/// one, and plain dates, are taken as written. Anything unparseable is
/// returned unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%d/%m/%Y").to_string();
    }
    // rfc3339 needs seconds; accept `HH:MM` with `Z` or a numeric offset too
    let zoned = match raw.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => raw.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_str(&zoned, "%Y-%m-%dT%H:%M%:z") {
        return dt.with_timezone(&Utc).format("%d/%m/%Y").to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return naive.format("%d/%m/%Y").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}
