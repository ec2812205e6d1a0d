//! Station metadata as listed by the archive's location directory.

use crate::types::endpoint::Endpoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The station categories the archive distinguishes.
///
/// The numeric code is what the archive expects in the `type` query parameter; the label is
/// used to name output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationType {
    /// Code 1: precipitation stations.
    Precipitation,
    /// Code 2: climatological stations.
    Climatological,
    /// Code 3: main meteorological stations.
    MainMeteorological,
    /// Code 4: automatic stations, reporting half-hourly.
    Automatic,
}

impl StationType {
    pub const ALL: [StationType; 4] = [
        StationType::Precipitation,
        StationType::Climatological,
        StationType::MainMeteorological,
        StationType::Automatic,
    ];

    pub fn code(self) -> i32 {
        match self {
            StationType::Precipitation => 1,
            StationType::Climatological => 2,
            StationType::MainMeteorological => 3,
            StationType::Automatic => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// File-name label, matching the archive's own Slovenian category names.
    pub fn label(self) -> &'static str {
        match self {
            StationType::Precipitation => "padavinske_postaje",
            StationType::Climatological => "klimatoloske_postaje",
            StationType::MainMeteorological => "glavne_meteoroloske_postaje",
            StationType::Automatic => "samodejne_postaje",
        }
    }
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<i32> for StationType {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}

/// Parses either the numeric code (`"4"`) or the label (`"samodejne_postaje"`).
impl FromStr for StationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Self::from_code(code).ok_or_else(|| format!("unknown station type code {code}"));
        }
        Self::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| format!("unknown station type '{s}'"))
    }
}

/// A single station entry from the location directory.
///
/// Coordinates are kept exactly as the archive printed them; they are only ever echoed into
/// output tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Opaque identifier: a category character (`_`) followed by the numeric station id.
    pub id: String,
    pub name: String,
    /// Longitude in decimal degrees, as printed upstream.
    pub longitude: String,
    /// Latitude in decimal degrees, as printed upstream.
    pub latitude: String,
    /// Altitude in metres.
    pub altitude: i32,
    /// Raw category code. See [`StationType`] for the known values.
    pub station_type: i32,
}

impl StationRecord {
    /// The id without its leading category character, as the data endpoint expects it.
    pub fn numeric_id(&self) -> &str {
        let mut chars = self.id.chars();
        chars.next();
        chars.as_str()
    }

    pub fn known_type(&self) -> Option<StationType> {
        StationType::from_code(self.station_type)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::for_station_type(self.station_type)
    }
}

/// All stations the archive lists for one type and window, in listing order.
pub type StationDirectory = Vec<StationRecord>;
