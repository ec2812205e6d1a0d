//! The merged result of one window: every station's records with their reconstructed
//! timestamps, convertible to a Polars `DataFrame` for output.

use crate::types::measurement::FeatureValue;
use crate::types::station::StationRecord;
use crate::types::window::DateWindow;
use chrono::NaiveDateTime;
use polars::prelude::*;

/// Descriptive columns that precede the feature columns, in output order.
pub const FIXED_COLUMNS: [&str; 9] = [
    "record",
    "timestamp",
    "station_id",
    "station_type",
    "station_name",
    "station_lon",
    "station_lat",
    "date_from",
    "date_to",
];

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    pub record: String,
    pub offset: i64,
    pub timestamp: NaiveDateTime,
    pub station: StationRecord,
    /// Aligned with [`Dataset::columns`].
    pub features: Vec<FeatureValue>,
}

/// Row-wise union of all station tables of a window.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub window: DateWindow,
    /// Feature column labels, after renaming from positional keys.
    pub columns: Vec<String>,
    pub rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn empty(window: DateWindow) -> Self {
        Self {
            window,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All output column names: the fixed ones followed by the feature labels.
    pub fn column_names(&self) -> Vec<&str> {
        FIXED_COLUMNS
            .iter()
            .copied()
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&FeatureValue> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.features.get(index)
    }

    /// Builds the output frame.
    ///
    /// A feature column holding only numbers (and gaps) becomes `Float64`; as soon as one
    /// value is text the whole column is `String`. Missing values are nulls.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let rows = &self.rows;
        let mut columns: Vec<Column> = Vec::with_capacity(FIXED_COLUMNS.len() + self.columns.len());

        columns.push(Column::new(
            "record".into(),
            rows.iter().map(|r| r.record.as_str()).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "timestamp".into(),
            rows.iter().map(|r| r.timestamp).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "station_id".into(),
            rows.iter().map(|r| r.station.id.as_str()).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "station_type".into(),
            rows.iter().map(|r| r.station.station_type).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "station_name".into(),
            rows.iter().map(|r| r.station.name.as_str()).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "station_lon".into(),
            rows.iter().map(|r| r.station.longitude.as_str()).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "station_lat".into(),
            rows.iter().map(|r| r.station.latitude.as_str()).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "date_from".into(),
            vec![self.window.start(); rows.len()],
        ));
        columns.push(Column::new(
            "date_to".into(),
            vec![self.window.end(); rows.len()],
        ));

        for (index, label) in self.columns.iter().enumerate() {
            let values: Vec<&FeatureValue> = rows.iter().map(|r| &r.features[index]).collect();
            columns.push(feature_column(label, &values));
        }

        DataFrame::new(columns)
    }
}

fn feature_column(label: &str, values: &[&FeatureValue]) -> Column {
    let numeric = values.iter().all(|v| !matches!(v, FeatureValue::Text(_)));
    if numeric {
        let data: Vec<Option<f64>> = values.iter().map(|v| v.as_f64()).collect();
        Column::new(label.into(), data)
    } else {
        let data: Vec<Option<String>> = values
            .iter()
            .map(|v| (!v.is_missing()).then(|| v.to_string()))
            .collect();
        Column::new(label.into(), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn window() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        )
        .unwrap()
    }

    fn row(record: &str, features: Vec<FeatureValue>) -> DatasetRow {
        DatasetRow {
            record: record.to_string(),
            offset: record[1..].parse().unwrap(),
            timestamp: window().start_of_day(),
            station: StationRecord {
                id: "_101".to_string(),
                name: "Test".to_string(),
                longitude: "14.5".to_string(),
                latitude: "46.0".to_string(),
                altitude: 300,
                station_type: 4,
            },
            features,
        }
    }

    #[test]
    fn empty_dataset_has_fixed_columns_only() -> PolarsResult<()> {
        let df = Dataset::empty(window()).to_dataframe()?;
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), FIXED_COLUMNS.len());
        Ok(())
    }

    #[test]
    fn feature_columns_are_typed_by_content() -> PolarsResult<()> {
        let dataset = Dataset {
            window: window(),
            columns: vec!["Temp".to_string(), "Note".to_string()],
            rows: vec![
                row(
                    "_5",
                    vec![FeatureValue::Missing, FeatureValue::Text("ok".to_string())],
                ),
                row(
                    "_35",
                    vec![FeatureValue::from_json(&json!(3.5)), FeatureValue::from_json(&json!(1))],
                ),
            ],
        };
        let df = dataset.to_dataframe()?;
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("Temp")?.dtype(), &DataType::Float64);
        assert_eq!(df.column("Temp")?.null_count(), 1);
        assert_eq!(df.column("Note")?.dtype(), &DataType::String);
        assert_eq!(df.column("station_type")?.dtype(), &DataType::Int32);
        assert_eq!(df.column("date_from")?.dtype(), &DataType::Date);
        assert_eq!(
            dataset.column_names(),
            vec![
                "record",
                "timestamp",
                "station_id",
                "station_type",
                "station_name",
                "station_lon",
                "station_lat",
                "date_from",
                "date_to",
                "Temp",
                "Note"
            ]
        );
        assert_eq!(dataset.value(1, "Note"), Some(&FeatureValue::from_json(&json!(1))));
        Ok(())
    }
}
