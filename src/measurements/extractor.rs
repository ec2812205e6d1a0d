//! Fetches measurement responses station by station and merges them into a [`Dataset`].

use crate::loader::ArchiveLoader;
use crate::measurements::assemble::{assemble, ExtractOptions};
use crate::measurements::error::MeasurementError;
use crate::measurements::parse::parse_station_response;
use crate::types::dataset::Dataset;
use crate::types::measurement::MeasurementTable;
use crate::types::station::StationRecord;
use crate::types::window::DateWindow;
use log::info;

pub struct MeasurementExtractor {
    loader: ArchiveLoader,
    options: ExtractOptions,
}

impl MeasurementExtractor {
    pub fn new(loader: ArchiveLoader, options: ExtractOptions) -> Self {
        Self { loader, options }
    }

    pub fn options(&self) -> ExtractOptions {
        self.options
    }

    /// Downloads and parses one station's records for `window`.
    ///
    /// Automatic stations are queried on the half-hourly endpoint, all others on the daily one.
    pub async fn fetch_station(
        &self,
        station: &StationRecord,
        window: DateWindow,
    ) -> Result<MeasurementTable, MeasurementError> {
        let url = self
            .loader
            .data_url(station.endpoint(), station.numeric_id(), &window);
        let body = self.loader.download_text(&url).await?;
        let response = parse_station_response(&station.id, &body)?;
        Ok(MeasurementTable::new(station.clone(), window, response))
    }

    /// Fetches every station in order, one request at a time, and merges the results.
    ///
    /// The first failing station aborts the whole window.
    pub async fn extract(
        &self,
        window: DateWindow,
        stations: &[StationRecord],
    ) -> Result<Dataset, MeasurementError> {
        let mut tables = Vec::with_capacity(stations.len());
        for (index, station) in stations.iter().enumerate() {
            info!(
                "Station {}/{}: {} - {}",
                index + 1,
                stations.len(),
                station.id,
                station.name
            );
            tables.push(self.fetch_station(station, window).await?);
        }
        let dataset = assemble(window, tables, self.options)?;
        info!(
            "Assembled {} rows from {} stations for {}",
            dataset.len(),
            stations.len(),
            window
        );
        Ok(dataset)
    }
}
