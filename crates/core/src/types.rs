//! Core data types for the agent tools.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rendering used in messages for a field that is absent or null.
pub const ABSENT_LABEL: &str = "None";

/// Render an optional JSON field for a human-readable message.
///
/// Strings render bare, absent or null values as [`ABSENT_LABEL`]. Every
/// other value renders as its JSON text, so booleans read `true`/`false`.
pub fn json_label(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => ABSENT_LABEL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Safe nested lookup through JSON objects. Returns `None` as soon as a key
/// is missing or an intermediate value is not an object.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// Summary statistics over the close series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    /// First collected close (most recent record).
    pub current: f64,
    /// Highest close.
    pub highest: f64,
    /// Lowest close.
    pub lowest: f64,
    /// Mean close.
    pub average: f64,
    /// First close minus last close. Needs two or more closes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    /// `change` relative to the last close, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

/// Summary statistics over the volume series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
}

/// Output of the trend analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Close price statistics.
    pub price_stats: PriceStats,
    /// Number of input records, including ones without a usable close.
    pub data_points: usize,
    /// Present only when at least one volume was collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_stats: Option<VolumeStats>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_label() {
        assert_eq!(json_label(Some(&json!("AMBER-1"))), "AMBER-1");
        assert_eq!(json_label(Some(&json!(42))), "42");
        assert_eq!(json_label(Some(&json!(true))), "true");
        assert_eq!(json_label(Some(&json!({"code": 3}))), r#"{"code":3}"#);
        assert_eq!(json_label(Some(&Value::Null)), "None");
        assert_eq!(json_label(None), "None");
    }

    #[test]
    fn test_lookup_nested() {
        let doc = json!({"resolution_details": {"child_status": "safe"}});
        assert_eq!(
            lookup(&doc, &["resolution_details", "child_status"]),
            Some(&json!("safe"))
        );
        assert_eq!(lookup(&doc, &["resolution_details", "location"]), None);
        assert_eq!(lookup(&json!({"resolution_details": "n/a"}), &["resolution_details", "child_status"]), None);
        assert_eq!(lookup(&json!([1, 2]), &["resolution_details"]), None);
    }

    #[test]
    fn test_trend_analysis_omits_optional_blocks() {
        let analysis = TrendAnalysis {
            price_stats: PriceStats {
                current: 10.0,
                highest: 10.0,
                lowest: 10.0,
                average: 10.0,
                change: None,
                change_percent: None,
            },
            data_points: 1,
            volume_stats: None,
        };

        let value = serde_json::to_value(&analysis).unwrap();
        assert!(value.get("volume_stats").is_none());
        assert!(value["price_stats"].get("change").is_none());
        assert_eq!(value["data_points"], json!(1));
    }
}
