use chrono::{DateTime, NaiveDateTime, Utc};

/// Naive timestamp layouts the backend has been seen to emit
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a backend timestamp.
/// Accepts RFC 3339 and a few naive layouts; naive times are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2026-10-19T09:30:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 10, 19, 7, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_naive() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2026-10-19T09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-19 09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-19 09:30"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-19T09:30:00.000"), Some(expected));
    }

    #[test]
    fn test_parse_timestamp_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("tomorrow"), None);
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Hello", 3), "Hel");
    }
}
