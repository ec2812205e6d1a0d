use crate::error::ArchiveError;
use crate::types::station::StationType;
use crate::types::window::DateWindow;
use chrono::NaiveDate;

/// One unit of work: resolve stations for `directory_window`, extract `data_window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchJob {
    pub station_type: StationType,
    pub directory_window: DateWindow,
    pub data_window: DateWindow,
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, ArchiveError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ArchiveError::InvalidYear(year))
}

fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate, ArchiveError> {
    let next = if month == 12 {
        date(year + 1, 1, 1)?
    } else {
        date(year, month + 1, 1)?
    };
    next.pred_opt().ok_or(ArchiveError::InvalidYear(year))
}

/// Half-month jobs for automatic stations, two per month of every year given.
///
/// The first half fetches data for the 1st-15th with stations listed for the 15th-16th; the
/// second half fetches the 16th-last day with stations listed for the same range.
pub fn plan_automatic(years: &[i32]) -> Result<Vec<BatchJob>, ArchiveError> {
    let mut jobs = Vec::with_capacity(years.len() * 24);
    for &year in years {
        for month in 1..=12 {
            let first = date(year, month, 1)?;
            let fifteenth = date(year, month, 15)?;
            let sixteenth = date(year, month, 16)?;
            let last = last_day_of_month(year, month)?;

            jobs.push(BatchJob {
                station_type: StationType::Automatic,
                directory_window: DateWindow::new(fifteenth, sixteenth)?,
                data_window: DateWindow::new(first, fifteenth)?,
            });
            jobs.push(BatchJob {
                station_type: StationType::Automatic,
                directory_window: DateWindow::new(sixteenth, last)?,
                data_window: DateWindow::new(sixteenth, last)?,
            });
        }
    }
    Ok(jobs)
}

/// One job per station type covering the whole `window`.
pub fn plan_full_window(types: &[StationType], window: DateWindow) -> Vec<BatchJob> {
    types
        .iter()
        .map(|&station_type| BatchJob {
            station_type,
            directory_window: window,
            data_window: window,
        })
        .collect()
}

/// The complete plan: half-month jobs when automatic stations are requested, followed by
/// one full-window job for each other requested type, in code order.
pub fn plan(
    types: &[StationType],
    years: &[i32],
    full_window: DateWindow,
) -> Result<Vec<BatchJob>, ArchiveError> {
    let mut jobs = Vec::new();
    if types.contains(&StationType::Automatic) {
        jobs.extend(plan_automatic(years)?);
    }
    let mut others: Vec<StationType> = types
        .iter()
        .copied()
        .filter(|t| *t != StationType::Automatic)
        .collect();
    others.sort_by_key(|t| t.code());
    others.dedup();
    jobs.extend(plan_full_window(&others, full_window));
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn automatic_plan_splits_months() {
        let jobs = plan_automatic(&[2020]).unwrap();
        assert_eq!(jobs.len(), 24);

        let feb_first = &jobs[2];
        assert_eq!(feb_first.data_window, DateWindow::new(d(2020, 2, 1), d(2020, 2, 15)).unwrap());
        assert_eq!(
            feb_first.directory_window,
            DateWindow::new(d(2020, 2, 15), d(2020, 2, 16)).unwrap()
        );

        let feb_second = &jobs[3];
        assert_eq!(feb_second.data_window, DateWindow::new(d(2020, 2, 16), d(2020, 2, 29)).unwrap());
        assert_eq!(feb_second.directory_window, feb_second.data_window);

        let dec_second = &jobs[23];
        assert_eq!(dec_second.data_window.end(), d(2020, 12, 31));
    }

    #[test]
    fn non_leap_february_ends_on_28th() {
        let jobs = plan_automatic(&[2023]).unwrap();
        assert_eq!(jobs[3].data_window.end(), d(2023, 2, 28));
    }

    #[test]
    fn full_plan_orders_automatic_first() {
        let window = DateWindow::new(d(2020, 1, 1), d(2023, 12, 31)).unwrap();
        let jobs = plan(
            &[
                StationType::MainMeteorological,
                StationType::Automatic,
                StationType::Precipitation,
            ],
            &[2020, 2023],
            window,
        )
        .unwrap();
        assert_eq!(jobs.len(), 48 + 2);
        assert!(jobs[..48].iter().all(|j| j.station_type == StationType::Automatic));
        assert_eq!(jobs[48].station_type, StationType::Precipitation);
        assert_eq!(jobs[49].station_type, StationType::MainMeteorological);
        assert_eq!(jobs[49].data_window, window);
    }
}
