//! Merges per-station tables into one [`Dataset`]: feature renaming and timestamp
//! reconstruction.

use crate::measurements::error::MeasurementError;
use crate::types::dataset::{Dataset, DatasetRow, FIXED_COLUMNS};
use crate::types::measurement::{positional_key, ColumnSchema, FeatureValue, MeasurementTable};
use crate::types::window::DateWindow;
use chrono::TimeDelta;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Which row a record's offset is measured against when rebuilding timestamps.
///
/// `Global` measures every row against the first row of the merged dataset, which is what
/// the archive tooling has always produced. It is only correct when all stations' record ids
/// share an origin; `PerStation` measures against each station's own first row instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    #[default]
    Global,
    PerStation,
}

/// How differing column schemas across stations are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaPolicy {
    /// Feature columns are the union of positional keys, renamed with the schema of the last
    /// station only.
    #[default]
    LastStation,
    /// Every station must report the same labels as the first one.
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub reference: ReferencePolicy,
    pub schema_policy: SchemaPolicy,
}

impl fmt::Display for ReferencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferencePolicy::Global => write!(f, "global"),
            ReferencePolicy::PerStation => write!(f, "per-station"),
        }
    }
}

impl FromStr for ReferencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(ReferencePolicy::Global),
            "per-station" => Ok(ReferencePolicy::PerStation),
            other => Err(format!(
                "unknown reference policy '{other}' (expected 'global' or 'per-station')"
            )),
        }
    }
}

impl fmt::Display for SchemaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaPolicy::LastStation => write!(f, "last-station"),
            SchemaPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for SchemaPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-station" => Ok(SchemaPolicy::LastStation),
            "strict" => Ok(SchemaPolicy::Strict),
            other => Err(format!(
                "unknown schema policy '{other}' (expected 'last-station' or 'strict')"
            )),
        }
    }
}

/// Concatenates station tables (in the given order) into the dataset for `window`.
///
/// Timestamps are `window start at 00:00 + (offset - reference offset)` minutes, where the
/// reference is chosen by `options.reference`.
pub fn assemble(
    window: DateWindow,
    tables: Vec<MeasurementTable>,
    options: ExtractOptions,
) -> Result<Dataset, MeasurementError> {
    if options.schema_policy == SchemaPolicy::Strict {
        check_schemas(&tables)?;
    }

    let width = tables
        .iter()
        .filter(|t| !t.records.is_empty())
        .map(|t| t.schema.len())
        .max()
        .unwrap_or(0);
    let columns = feature_labels(width, tables.last().map(|t| &t.schema));

    let global_reference = tables
        .iter()
        .find_map(|t| t.records.first())
        .map(|r| r.offset);
    let origin = window.start_of_day();

    let mut rows = Vec::with_capacity(tables.iter().map(|t| t.records.len()).sum());
    for table in tables {
        let reference = match options.reference {
            ReferencePolicy::Global => global_reference,
            ReferencePolicy::PerStation => table.records.first().map(|r| r.offset),
        }
        .unwrap_or_default();

        for record in table.records {
            let timestamp = record
                .offset
                .checked_sub(reference)
                .and_then(TimeDelta::try_minutes)
                .and_then(|delta| origin.checked_add_signed(delta))
                .ok_or_else(|| MeasurementError::TimestampOverflow {
                    station: table.station.id.clone(),
                    record: record.id.clone(),
                })?;
            let mut features = record.features;
            features.resize(width, FeatureValue::Missing);
            rows.push(DatasetRow {
                record: record.id,
                offset: record.offset,
                timestamp,
                station: table.station.clone(),
                features,
            });
        }
    }

    Ok(Dataset {
        window,
        columns,
        rows,
    })
}

fn check_schemas(tables: &[MeasurementTable]) -> Result<(), MeasurementError> {
    let Some(first) = tables.first() else {
        return Ok(());
    };
    match tables.iter().find(|t| t.schema != first.schema) {
        Some(table) => Err(MeasurementError::SchemaMismatch {
            station: table.station.id.clone(),
            expected: first.schema.len(),
            found: table.schema.len(),
        }),
        None => Ok(()),
    }
}

/// Labels for `p0..p(width-1)`. Keys the schema does not name keep their positional key;
/// a label clashing with a fixed column or an earlier label gets `_<key>` appended.
fn feature_labels(width: usize, schema: Option<&ColumnSchema>) -> Vec<String> {
    let mut taken: HashSet<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    (0..width)
        .map(|i| {
            let key = positional_key(i);
            let label = schema
                .and_then(|s| s.label(&key))
                .map_or_else(|| key.clone(), str::to_string);
            let label = if taken.contains(&label) {
                format!("{label}_{key}")
            } else {
                label
            };
            taken.insert(label.clone());
            label
        })
        .collect()
}
