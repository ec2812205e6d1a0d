use crate::error::NetworkError;
use crate::literal::error::LiteralError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeasurementError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Unexpected response format for station {station}")]
    UpstreamFormat {
        station: String,
        #[source]
        source: LiteralError,
    },

    #[error("Column '{key}' of station {station} has no label")]
    MissingLabel { station: String, key: String },

    #[error("Record id '{record}' of station {station} is not a valid offset")]
    InvalidRecordId { station: String, record: String },

    #[error("Timestamp of record '{record}' (station {station}) is out of range")]
    TimestampOverflow { station: String, record: String },

    #[error("Station {station} reports {found} columns, differing from the {expected} columns of the first station")]
    SchemaMismatch {
        station: String,
        expected: usize,
        found: usize,
    },
}
