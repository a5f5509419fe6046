use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// Source of "today" for everything that compares against the current date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock read in the configured timezone
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse a stored date string.
///
/// Accepts `YYYY-MM-DD` and reads only the date prefix of values that carry
/// a time part (`2024-03-01T09:00:00`, `2024-03-01 09:00`).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = match value.get(10..11) {
        Some("T") | Some(" ") => value.get(..10)?,
        _ => value,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parse a `YYYY-MM` month argument into the first day of that month
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d").ok()
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// First day of the month `delta` months away from the month containing `date`
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let total_months = date.year() * 12 + date.month0() as i32 + delta;
    let year = total_months.div_euclid(12);
    let month = total_months.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    shift_month(date, 1).pred_opt().unwrap_or(date)
}

/// Whether both dates fall in the same calendar month
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
