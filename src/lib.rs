//! Download historic station data from the ARSO meteorological web archive.
//!
//! The archive serves JavaScript object literals rather than JSON. This crate resolves the
//! station directory for a station type and date window, fetches each station's records,
//! rebuilds absolute timestamps from the archive's minute offsets and merges everything into
//! a [`Dataset`] that can be written as CSV or Parquet.

mod archive;
mod batch;
mod error;
mod literal;
mod loader;
mod measurements;
mod stations;
mod types;
mod utils;

pub use archive::Archive;
pub use error::{ArchiveError, NetworkError};
pub use loader::{ArchiveLoader, DEFAULT_BASE_URL, DEFAULT_LANG};

pub use literal::error::LiteralError;
pub use literal::{find_object_block, parse_object, quote_keys, top_level_entries, Entry};

pub use stations::error::DirectoryError;
pub use stations::resolver::{parse_directory, StationResolver};

pub use measurements::assemble::{assemble, ExtractOptions, ReferencePolicy, SchemaPolicy};
pub use measurements::error::MeasurementError;
pub use measurements::extractor::MeasurementExtractor;
pub use measurements::parse::{parse_records, parse_schema, parse_station_response};

pub use types::dataset::{Dataset, DatasetRow, FIXED_COLUMNS};
pub use types::endpoint::Endpoint;
pub use types::measurement::{
    positional_key, ColumnSchema, FeatureValue, MeasurementRecord, MeasurementTable,
    StationResponse,
};
pub use types::station::{StationDirectory, StationRecord, StationType};
pub use types::window::{DateWindow, InvalidWindow};

pub use batch::output::{
    directory_to_dataframe, output_file_name, write_dataset, write_frame, OutputFormat,
};
pub use batch::plan::{plan, plan_automatic, plan_full_window, BatchJob};
pub use batch::runner::{run_batch, BatchSummary, OutputOptions};
