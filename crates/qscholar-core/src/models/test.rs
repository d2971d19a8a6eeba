use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::parse_timestamp;

/// Whether a test can currently be taken, judged from its time window.
/// Informational only; the backend decides at attempt initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Upcoming,
    Open,
    Closed,
    Unknown,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Upcoming => write!(f, "Upcoming"),
            Availability::Open => write!(f, "Open"),
            Availability::Closed => write!(f, "Closed"),
            Availability::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Test {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub test_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub test_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub test_start_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub test_end_time: Option<String>,
}

impl Test {
    pub fn id_display(&self) -> String {
        self.test_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn name(&self) -> &str {
        self.test_name.as_deref().unwrap_or("Unknown Test")
    }

    pub fn start_display(&self) -> &str {
        self.test_start_time.as_deref().unwrap_or("")
    }

    pub fn end_display(&self) -> &str {
        self.test_end_time.as_deref().unwrap_or("")
    }

    /// One-line summary used by the test list
    pub fn display_line(&self) -> String {
        format!(
            "{} | {} | Start: {} | End: {}",
            self.id_display(),
            self.name(),
            self.start_display(),
            self.end_display()
        )
    }

    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.test_start_time.as_deref().and_then(parse_timestamp)
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.test_end_time.as_deref().and_then(parse_timestamp)
    }

    pub fn availability(&self, now: DateTime<Utc>) -> Availability {
        match (self.starts_at(), self.ends_at()) {
            (None, None) => Availability::Unknown,
            (Some(start), _) if now < start => Availability::Upcoming,
            (_, Some(end)) if now > end => Availability::Closed,
            _ => Availability::Open,
        }
    }
}

/// Accept an identifier sent either as a JSON number or a numeric string.
pub(crate) fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let raw: Option<RawId> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawId::Int(id)) => Some(id),
        Some(RawId::Float(f)) if f.fract() == 0.0 => Some(f as i64),
        Some(RawId::Float(_)) => None,
        Some(RawId::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Accept any scalar for a display field; numbers and booleans keep their JSON text.
fn deserialize_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window(start: Option<&str>, end: Option<&str>) -> Test {
        Test {
            test_id: Some(1),
            test_name: Some("Physics".to_string()),
            test_start_time: start.map(str::to_string),
            test_end_time: end.map(str::to_string),
        }
    }

    #[test]
    fn test_display_line() {
        let test = window(Some("2026-10-19 09:00:00"), Some("2026-10-19 11:00:00"));
        assert_eq!(
            test.display_line(),
            "1 | Physics | Start: 2026-10-19 09:00:00 | End: 2026-10-19 11:00:00"
        );
    }

    #[test]
    fn test_display_line_missing_fields() {
        let test = Test::default();
        assert_eq!(test.display_line(), "N/A | Unknown Test | Start:  | End: ");
    }

    #[test]
    fn test_parse_id_variants() {
        let numeric: Test = serde_json::from_str(r#"{"test_id": 42}"#).unwrap();
        assert_eq!(numeric.test_id, Some(42));

        let text: Test = serde_json::from_str(r#"{"test_id": " 7 "}"#).unwrap();
        assert_eq!(text.test_id, Some(7));

        let null: Test = serde_json::from_str(r#"{"test_id": null}"#).unwrap();
        assert_eq!(null.test_id, None);

        let bogus: Test = serde_json::from_str(r#"{"test_id": "abc"}"#).unwrap();
        assert_eq!(bogus.test_id, None);

        let missing: Test = serde_json::from_str(r#"{"test_name": "Math"}"#).unwrap();
        assert_eq!(missing.test_id, None);
        assert_eq!(missing.name(), "Math");
    }

    #[test]
    fn test_availability() {
        let test = window(Some("2026-10-19T09:00:00Z"), Some("2026-10-19T11:00:00Z"));
        let at = |h| Utc.with_ymd_and_hms(2026, 10, 19, h, 0, 0).unwrap();

        assert_eq!(test.availability(at(8)), Availability::Upcoming);
        assert_eq!(test.availability(at(10)), Availability::Open);
        assert_eq!(test.availability(at(12)), Availability::Closed);
    }

    #[test]
    fn test_availability_open_ended() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
        assert_eq!(window(Some("2026-10-18 00:00:00"), None).availability(now), Availability::Open);
        assert_eq!(window(None, Some("2026-10-18 00:00:00")).availability(now), Availability::Closed);
        assert_eq!(window(Some("soon"), Some("later")).availability(now), Availability::Unknown);
    }

    #[test]
    fn test_non_string_display_fields() {
        let test: Test = serde_json::from_str(
            r#"{"test_id": 3, "test_name": 101, "test_start_time": 1760000000, "test_end_time": null}"#,
        )
        .unwrap();
        assert_eq!(test.display_line(), "3 | 101 | Start: 1760000000 | End: ");

        let tests: Vec<Test> = serde_json::from_str(
            r#"[{"test_id": 1, "test_name": "Math"}, {"test_id": 2, "test_name": true}]"#,
        )
        .unwrap();
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[1].name(), "true");
    }
}
