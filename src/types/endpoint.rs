//! The two measurement endpoints of the archive and the fixed variable sets requested from
//! each.

use std::fmt;

const HALF_HOURLY_VARS: &str = "12,19,13,20,14,26,2,21,15,23,16,24,17,27,4,28,18,29";
const DAILY_VARS: &str = "35,56,38,57,36,58,37,59,43,60,46,61,40,62,33,63,85,65,88,66,89,67,\
41,68,80,69,81,70,47,71,48,72,49,74,50,75,51,77,52,78,53,83,54,82,55";

/// Which aggregation of measurements a station is queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Half-hourly data, only offered for automatic stations (type 4).
    HalfHourly,
    /// Daily data, used for every other station type.
    Daily,
}

impl Endpoint {
    pub fn for_station_type(station_type: i32) -> Self {
        if station_type == 4 {
            Endpoint::HalfHourly
        } else {
            Endpoint::Daily
        }
    }

    /// Comma-separated variable codes for the `vars` parameter.
    pub fn vars(&self) -> &'static str {
        match self {
            Endpoint::HalfHourly => HALF_HOURLY_VARS,
            Endpoint::Daily => DAILY_VARS,
        }
    }

    /// Value of the `group` parameter.
    pub fn group(&self) -> &'static str {
        match self {
            Endpoint::HalfHourly => "halfhourlyData0",
            Endpoint::Daily => "dailyData2",
        }
    }

    /// Value of the `type` parameter.
    pub fn aggregation(&self) -> &'static str {
        match self {
            Endpoint::HalfHourly => "halfhourly",
            Endpoint::Daily => "daily",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.aggregation())
    }
}
