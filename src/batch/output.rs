use crate::error::ArchiveError;
use crate::types::dataset::Dataset;
use crate::types::station::{StationRecord, StationType};
use crate::types::window::DateWindow;
use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::task;

const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            other => Err(format!("unknown output format '{other}' (expected 'csv' or 'parquet')")),
        }
    }
}

/// `<label>_datefrom_<d1>_dateto_<d2>.<ext>`
pub fn output_file_name(
    station_type: StationType,
    window: &DateWindow,
    format: OutputFormat,
) -> String {
    format!(
        "{}_datefrom_{}_dateto_{}.{}",
        station_type.label(),
        window.d1(),
        window.d2(),
        format.extension()
    )
}

/// Station listing as a frame: `id, name, lon, lat, alt, type`.
pub fn directory_to_dataframe(stations: &[StationRecord]) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        Column::new(
            "id".into(),
            stations.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "name".into(),
            stations.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "lon".into(),
            stations.iter().map(|s| s.longitude.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "lat".into(),
            stations.iter().map(|s| s.latitude.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "alt".into(),
            stations.iter().map(|s| s.altitude).collect::<Vec<_>>(),
        ),
        Column::new(
            "type".into(),
            stations.iter().map(|s| s.station_type).collect::<Vec<_>>(),
        ),
    ])
}

/// Writes `df` to `path` on a blocking thread, replacing any existing file.
///
/// CSV output has a header row, writes timestamps as `YYYY-MM-DD HH:MM:SS` and leaves missing
/// values empty. Parquet output is Snappy-compressed.
pub async fn write_frame(
    mut df: DataFrame,
    path: &Path,
    format: OutputFormat,
) -> Result<(), ArchiveError> {
    let path_buf = path.to_path_buf();
    task::spawn_blocking(move || -> Result<(), ArchiveError> {
        let file = std::fs::File::create(&path_buf)
            .map_err(|e| ArchiveError::OutputFile(path_buf.clone(), e))?;
        match format {
            OutputFormat::Csv => CsvWriter::new(file)
                .include_header(true)
                .with_datetime_format(Some(CSV_DATETIME_FORMAT.to_string()))
                .finish(&mut df),
            OutputFormat::Parquet => ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map(|_| ()),
        }
        .map_err(|e| ArchiveError::OutputWrite(path_buf, e))
    })
    .await??;
    Ok(())
}

/// Writes `dataset` as `<dir>/<file_name>` and returns the full path.
pub async fn write_dataset(
    dataset: &Dataset,
    dir: &Path,
    file_name: &str,
    format: OutputFormat,
) -> Result<PathBuf, ArchiveError> {
    let path = dir.join(file_name);
    write_frame(dataset.to_dataframe()?, &path, format).await?;
    Ok(path)
}
