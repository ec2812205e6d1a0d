//! Parsing of a single station's measurement response: the `params` block naming the
//! columns and the `points` block holding the records.

use crate::literal::error::LiteralError;
use crate::literal::{
    find_object_block, find_object_span, parse_object, top_level_entries, Entry,
};
use crate::measurements::error::MeasurementError;
use crate::types::measurement::{
    positional_key, ColumnSchema, FeatureValue, MeasurementRecord, StationResponse,
};
use log::debug;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Parses one measurement response.
///
/// `station` only labels errors. The `params` block must come before the `points` block.
pub fn parse_station_response(
    station: &str,
    text: &str,
) -> Result<StationResponse, MeasurementError> {
    let format_error = |source: LiteralError| MeasurementError::UpstreamFormat {
        station: station.to_string(),
        source,
    };

    let params = find_object_span(text, "params").map_err(format_error)?;
    let schema = parse_schema(station, &text[params.clone()])?;
    let points = find_object_block(&text[params.end..], "points").map_err(format_error)?;
    let records = parse_records(station, points, schema.len())?;
    debug!(
        "Station {}: {} columns, {} records",
        station,
        schema.len(),
        records.len()
    );
    Ok(StationResponse { schema, records })
}

/// Reduces `{p0:{..., l:"Label"}, ...}` to positional key → label, keeping upstream order.
pub fn parse_schema(station: &str, params: &str) -> Result<ColumnSchema, MeasurementError> {
    let format_error = |source: LiteralError| MeasurementError::UpstreamFormat {
        station: station.to_string(),
        source,
    };

    let mut columns = Vec::new();
    for entry in top_level_entries(params).map_err(format_error)? {
        let definition = parse_object(entry.value).map_err(format_error)?;
        let label = match definition.get("l") {
            Some(Value::String(label)) => label.clone(),
            Some(Value::Null) | None => {
                return Err(MeasurementError::MissingLabel {
                    station: station.to_string(),
                    key: entry.key.to_string(),
                })
            }
            Some(other) => other.to_string(),
        };
        columns.push((entry.key.to_string(), label));
    }
    Ok(ColumnSchema::new(columns))
}

fn is_record_id(key: &str) -> bool {
    key.strip_prefix('_')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Record entries of `literal` in source order, depth first.
///
/// A record entry whose body holds record entries itself (a per-station wrapper) is listed
/// and then descended into.
fn collect_record_entries<'a>(
    literal: &'a str,
    out: &mut Vec<Entry<'a>>,
) -> Result<(), LiteralError> {
    for entry in top_level_entries(literal)? {
        if !is_record_id(entry.key) {
            continue;
        }
        out.push(entry);
        if entry.value.starts_with('{')
            && top_level_entries(entry.value)?
                .iter()
                .any(|nested| is_record_id(nested.key))
        {
            collect_record_entries(entry.value, out)?;
        }
    }
    Ok(())
}

/// Extracts the records of a `points` block, normalised to `width` features each.
///
/// Record ids are collected at every depth in source order. The first one is a header
/// artifact of the archive (or the station wrapper) and is always dropped. A record id
/// listed more than once yields one record, at its first position after the header,
/// carrying the body of its first occurrence in the block.
pub fn parse_records(
    station: &str,
    points: &str,
    width: usize,
) -> Result<Vec<MeasurementRecord>, MeasurementError> {
    let mut ids = Vec::new();
    collect_record_entries(points, &mut ids).map_err(|source| {
        MeasurementError::UpstreamFormat {
            station: station.to_string(),
            source,
        }
    })?;

    let mut first_body: HashMap<&str, &str> = HashMap::with_capacity(ids.len());
    for entry in &ids {
        first_body.entry(entry.key).or_insert(entry.value);
    }

    let mut seen = HashSet::with_capacity(ids.len());
    let mut records = Vec::with_capacity(ids.len().saturating_sub(1));
    for entry in ids.iter().skip(1) {
        if !seen.insert(entry.key) {
            continue;
        }
        let body = first_body[entry.key];
        let values = parse_object(body).map_err(|source| MeasurementError::UpstreamFormat {
            station: station.to_string(),
            source,
        })?;
        let offset = entry.key[1..]
            .parse::<i64>()
            .map_err(|_| MeasurementError::InvalidRecordId {
                station: station.to_string(),
                record: entry.key.to_string(),
            })?;
        let features = (0..width)
            .map(|i| {
                values
                    .get(&positional_key(i))
                    .map_or(FeatureValue::Missing, FeatureValue::from_json)
            })
            .collect();
        records.push(MeasurementRecord {
            id: entry.key.to_string(),
            offset,
            features,
        });
    }
    Ok(records)
}
