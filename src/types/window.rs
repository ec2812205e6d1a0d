//! Closed date ranges used to bound archive requests.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Window end {end} is before its start {start}")]
pub struct InvalidWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A closed range `[start, end]` of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidWindow> {
        if end < start {
            return Err(InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Midnight at the start of the window; record offsets count minutes from here.
    pub fn start_of_day(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// The `d1` request parameter (`YYYY-MM-DD`).
    pub fn d1(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// The `d2` request parameter (`YYYY-MM-DD`).
    pub fn d2(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.d1(), self.d2())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_window() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 16).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        assert_eq!(DateWindow::new(start, end), Err(InvalidWindow { start, end }));
    }

    #[test]
    fn single_day_window_is_valid() {
        let day = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        let window = DateWindow::new(day, day).unwrap();
        assert_eq!(window.d1(), "2023-01-15");
        assert_eq!(window.d2(), "2023-01-15");
        assert_eq!(window.start_of_day().to_string(), "2023-01-15 00:00:00");
        assert_eq!(window.to_string(), "2023-01-15..2023-01-15");
    }
}
