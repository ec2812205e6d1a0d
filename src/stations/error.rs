use crate::error::NetworkError;
use crate::literal::error::LiteralError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Station listing has no usable 'points' block")]
    UpstreamFormat(#[source] LiteralError),

    #[error("Station {station} has an unreadable {field} value '{value}'")]
    InvalidField {
        station: String,
        field: &'static str,
        value: String,
    },
}
