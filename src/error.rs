use crate::measurements::error::MeasurementError;
use crate::stations::error::DirectoryError;
use crate::types::window::InvalidWindow;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to get a response body out of the archive. Requests are never retried.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Network request failed for {0}")]
    Request(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {0}")]
    Body(String, #[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Measurement(#[from] MeasurementError),

    #[error(transparent)]
    InvalidWindow(#[from] InvalidWindow),

    #[error("Year {0} cannot be split into monthly windows")]
    InvalidYear(i32),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to create output file '{0}'")]
    OutputFile(PathBuf, #[source] std::io::Error),

    #[error("Failed to write dataset to '{0}'")]
    OutputWrite(PathBuf, #[source] PolarsError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
