//! Month grid layout.
//!
//! A grid covers whole weeks: it starts on the Sunday on or before the first
//! of the month and ends on the Saturday on or after its last day, so leading
//! and trailing days from the neighbouring months fill the first and last rows.

use super::models::Event;
use crate::utils::time::{first_of_month, last_of_month, same_month};
use chrono::{Datelike, Duration, NaiveDate};

/// Days per grid row
pub const DAYS_PER_WEEK: usize = 7;

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from adjacent months
    pub in_month: bool,
    pub is_today: bool,
}

/// The full-week grid for the month containing an anchor date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    month: NaiveDate,
    days: Vec<CalendarDay>,
}

impl CalendarGrid {
    /// Lay out the month containing `anchor`; only its year and month matter
    pub fn new(anchor: NaiveDate, today: NaiveDate) -> Self {
        let month = first_of_month(anchor);
        let start = week_start(month);
        let end = week_end(last_of_month(month));

        let days = start
            .iter_days()
            .take_while(|date| *date <= end)
            .map(|date| CalendarDay {
                date,
                in_month: same_month(date, month),
                is_today: date == today,
            })
            .collect();

        Self { month, days }
    }

    /// First day of the displayed month
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// Rows of seven days, Sunday first
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(DAYS_PER_WEEK)
    }
}

/// The Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// The Saturday on or after `date`
pub fn week_end(date: NaiveDate) -> NaiveDate {
    date + Duration::days(6 - date.weekday().num_days_from_sunday() as i64)
}

/// Events falling on `day`, in list order
pub fn events_on(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| event.day() == Some(day))
        .collect()
}
