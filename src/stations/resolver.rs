//! Resolves the list of stations the archive offers for a station type and date window.

use crate::literal::find_object_block;
use crate::loader::ArchiveLoader;
use crate::stations::error::DirectoryError;
use crate::types::station::{StationDirectory, StationRecord};
use crate::types::window::DateWindow;
use log::{debug, info};
use regex::Regex;
use std::sync::LazyLock;

// `_<id>:{name:"...", lon:<num>, lat:<num>, alt:<int>, type:<int>}`
static STATION_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"_(\d+)\s*:\s*\{\s*name\s*:\s*"([^"]*)"\s*,\s*lon\s*:\s*([^,}]+?)\s*,\s*lat\s*:\s*([^,}]+?)\s*,\s*alt\s*:\s*(-?\d+)\s*,\s*type\s*:\s*(\d+)\s*\}"#,
    )
    .expect("station entry pattern is valid")
});

/// Parses a location listing into station records, in listing order.
///
/// The listing must contain a `points:{...}` block. Entries inside it that do not have the
/// station shape are skipped, so a block without any station yields an empty directory.
pub fn parse_directory(text: &str) -> Result<StationDirectory, DirectoryError> {
    let block = find_object_block(text, "points").map_err(DirectoryError::UpstreamFormat)?;

    STATION_ENTRY
        .captures_iter(block)
        .map(|caps| {
            let id = format!("_{}", &caps[1]);
            let altitude = caps[5]
                .parse::<i32>()
                .map_err(|_| DirectoryError::InvalidField {
                    station: id.clone(),
                    field: "alt",
                    value: caps[5].to_string(),
                })?;
            let station_type = caps[6]
                .parse::<i32>()
                .map_err(|_| DirectoryError::InvalidField {
                    station: id.clone(),
                    field: "type",
                    value: caps[6].to_string(),
                })?;
            Ok(StationRecord {
                id,
                name: caps[2].to_string(),
                longitude: caps[3].to_string(),
                latitude: caps[4].to_string(),
                altitude,
                station_type,
            })
        })
        .collect()
}

pub struct StationResolver {
    loader: ArchiveLoader,
}

impl StationResolver {
    pub fn new(loader: ArchiveLoader) -> Self {
        Self { loader }
    }

    /// Fetches and parses the station directory for `station_type` within `window`.
    pub async fn resolve(
        &self,
        station_type: i32,
        window: DateWindow,
    ) -> Result<StationDirectory, DirectoryError> {
        let url = self.loader.locations_url(station_type, &window);
        let body = self.loader.download_text(&url).await?;
        let stations = parse_directory(&body)?;
        if stations.is_empty() {
            debug!("Listing for type {} in {} matched no stations", station_type, window);
        }
        info!(
            "Found {} stations of type {} for {}",
            stations.len(),
            station_type,
            window
        );
        Ok(stations)
    }
}
