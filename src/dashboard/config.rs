//! The configuration record the host persists on the widget's behalf.
//!
//! Field names on the wire are camelCase:
//!
//! ```json
//! {
//!   "countdownDateTime": "2030-01-01T00:00:00.000Z",
//!   "countdownTitle": "New Year",
//!   "totalDiffMs": 31536000000,
//!   "showSeconds": true
//! }
//! ```
//!
//! `countdownDateTime` is also accepted as epoch milliseconds when read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Target instant.
    #[serde(with = "timestamp")]
    pub countdown_date_time: DateTime<Utc>,

    /// Title shown in the heading.
    #[serde(default)]
    pub countdown_title: String,

    /// Duration captured when the target was last picked; the progress bar
    /// denominator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_diff_ms: Option<i64>,

    /// Whether the seconds column is drawn. Missing means `true`.
    #[serde(default = "default_show_seconds")]
    pub show_seconds: bool,
}

fn default_show_seconds() -> bool {
    true
}

impl WidgetConfig {
    /// The chrome title for this countdown, `Time to: <title>`.
    pub fn title_for_host(&self) -> String {
        format!("Time to: {}", self.countdown_title)
    }
}

mod timestamp {
    use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        FractionalMillis(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        match Raw::deserialize(d)? {
            Raw::Millis(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| de::Error::custom(format!("timestamp {ms} is out of range"))),
            Raw::FractionalMillis(ms) => Utc
                .timestamp_millis_opt(ms.floor() as i64)
                .single()
                .ok_or_else(|| de::Error::custom(format!("timestamp {ms} is out of range"))),
            Raw::Text(s) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| de::Error::custom(format!("invalid timestamp '{s}': {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample() -> WidgetConfig {
        WidgetConfig {
            countdown_date_time: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            countdown_title: "New Year".to_string(),
            total_diff_ms: Some(86_400_000),
            show_seconds: false,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "countdownDateTime": "2030-01-01T00:00:00.000Z",
                "countdownTitle": "New Year",
                "totalDiffMs": 86_400_000,
                "showSeconds": false,
            })
        );
    }

    #[test]
    fn test_epoch_millis_accepted() {
        let cfg: WidgetConfig = serde_json::from_str(
            r#"{"countdownDateTime": 1893456000000, "countdownTitle": "New Year",
                "totalDiffMs": 86400000, "showSeconds": false}"#,
        )
        .unwrap();
        assert_eq!(cfg, sample());
    }

    #[test]
    fn test_show_seconds_defaults_to_true() {
        let cfg: WidgetConfig = serde_json::from_str(
            r#"{"countdownDateTime": "2030-01-01T00:00:00Z", "countdownTitle": "x"}"#,
        )
        .unwrap();
        assert!(cfg.show_seconds);
        assert_eq!(cfg.total_diff_ms, None);
    }

    #[test]
    fn test_missing_total_is_not_written() {
        let mut cfg = sample();
        cfg.total_diff_ms = None;
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("totalDiffMs"));
    }

    #[test]
    fn test_invalid_timestamp_rejected() {
        let err = serde_json::from_str::<WidgetConfig>(
            r#"{"countdownDateTime": "next tuesday", "countdownTitle": "x"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_host_title() {
        assert_eq!(sample().title_for_host(), "Time to: New Year");
    }
}
