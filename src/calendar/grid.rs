//! Date windows for the calendar views.
//!
//! Weeks start on Monday. The week view always shows the week
//! containing today (the system clock, not the navigated date), and
//! the month view is a fixed 6x7 grid padded with lead and trail days
//! from the adjacent months.

use chrono::{Datelike, Duration, NaiveDate};

/// Number of cells in the month grid (6 weeks of 7 days).
pub const MONTH_CELLS: usize = 42;

/// Monday of the week containing the given date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The Monday-start 7-day window containing `today`.
///
/// Deliberately a function of the clock alone: navigating the calendar
/// to another month does not move this window.
pub fn week_days(today: NaiveDate) -> [NaiveDate; 7] {
    let monday = week_start(today);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub date: NaiveDate,
    /// False for lead/trail cells borrowed from adjacent months.
    pub in_month: bool,
}

/// The fixed 42-cell grid for the month containing `reference`.
///
/// Begins at the Monday on or before the 1st, so the first row always
/// starts on Monday and every week renders complete.
pub fn month_days(reference: NaiveDate) -> Vec<MonthDay> {
    let first_of_month = reference.with_day(1).unwrap_or(reference);
    let start = week_start(first_of_month);

    (0..MONTH_CELLS as i64)
        .map(|offset| {
            let date = start + Duration::days(offset);
            MonthDay {
                date,
                in_month: date.month() == reference.month() && date.year() == reference.year(),
            }
        })
        .collect()
}
