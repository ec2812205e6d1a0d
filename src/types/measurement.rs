//! Per-station measurement records and the column schema that names their features.

use crate::types::station::StationRecord;
use crate::types::window::DateWindow;
use serde_json::{Number, Value};
use std::fmt;

/// Positional feature key for column `index` (`p0`, `p1`, ...).
pub fn positional_key(index: usize) -> String {
    format!("p{index}")
}

/// Maps positional feature keys to human-readable labels, in the order the archive listed
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<(String, String)>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<(String, String)>) -> Self {
        Self { columns }
    }

    /// Number of features every record of the response is expected to carry.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(k, l)| (k.as_str(), l.as_str()))
    }
}

/// A single feature value. `Missing` stands in for features the archive left out.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(Number),
    Text(String),
    Missing,
}

impl FeatureValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FeatureValue::Missing,
            Value::Number(n) => FeatureValue::Number(n.clone()),
            Value::String(s) => FeatureValue::Text(s.clone()),
            other => FeatureValue::Text(other.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FeatureValue::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

/// Numbers print in `serde_json`'s shortest form (`10.50` prints as `10.5`); `Missing` prints
/// as an empty string.
impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Number(n) => write!(f, "{n}"),
            FeatureValue::Text(s) => write!(f, "{s}"),
            FeatureValue::Missing => Ok(()),
        }
    }
}

/// One measurement record. `features[i]` holds positional key `p{i}`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    /// Record identifier as listed upstream, e.g. `_38573460`.
    pub id: String,
    /// The integer part of `id`: minutes since an archive-defined origin.
    pub offset: i64,
    pub features: Vec<FeatureValue>,
}

impl MeasurementRecord {
    pub fn feature(&self, key: &str) -> Option<&FeatureValue> {
        let index = key.strip_prefix('p')?.parse::<usize>().ok()?;
        self.features.get(index)
    }
}

/// Schema and records parsed from one measurement response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationResponse {
    pub schema: ColumnSchema,
    pub records: Vec<MeasurementRecord>,
}

/// Everything one station contributed to a window.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTable {
    pub station: StationRecord,
    pub window: DateWindow,
    pub schema: ColumnSchema,
    pub records: Vec<MeasurementRecord>,
}

impl MeasurementTable {
    pub fn new(station: StationRecord, window: DateWindow, response: StationResponse) -> Self {
        Self {
            station,
            window,
            schema: response.schema,
            records: response.records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feature_values_from_json() {
        assert_eq!(FeatureValue::from_json(&json!(null)), FeatureValue::Missing);
        assert_eq!(FeatureValue::from_json(&json!(80)).as_f64(), Some(80.0));
        assert_eq!(
            FeatureValue::from_json(&json!("12.5")),
            FeatureValue::Text("12.5".to_string())
        );
        assert_eq!(
            FeatureValue::from_json(&json!(true)),
            FeatureValue::Text("true".to_string())
        );
    }

    #[test]
    fn feature_values_display_shortest_form() {
        assert_eq!(FeatureValue::from_json(&json!(10)).to_string(), "10");
        assert_eq!(FeatureValue::from_json(&json!(-2.5)).to_string(), "-2.5");
        assert_eq!(FeatureValue::from_json(&json!(10.50)).to_string(), "10.5");
        assert_eq!(FeatureValue::Missing.to_string(), "");
    }

    #[test]
    fn record_feature_lookup_by_positional_key() {
        let record = MeasurementRecord {
            id: "_5".to_string(),
            offset: 5,
            features: vec![FeatureValue::Missing, FeatureValue::from_json(&json!(80))],
        };
        assert_eq!(record.feature("p0"), Some(&FeatureValue::Missing));
        assert_eq!(record.feature("p1").and_then(FeatureValue::as_f64), Some(80.0));
        assert_eq!(record.feature("p2"), None);
        assert_eq!(record.feature("x1"), None);
    }

    #[test]
    fn schema_lookup() {
        let schema = ColumnSchema::new(vec![
            ("p0".to_string(), "Temp".to_string()),
            ("p1".to_string(), "Humidity".to_string()),
        ]);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.label("p1"), Some("Humidity"));
        assert_eq!(schema.label("p2"), None);
        assert_eq!(positional_key(1), "p1");
    }
}
