//! Temporal types for synthesis windows.
//!
//! A [`WeekWindow`] is a derived value, never stored: the inclusive 7-day
//! calendar range `[start, start + 6]` over which one synthesis operates.
//! The pipeline does not enforce any weekday convention; the caller decides
//! what "week start" means.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::defaults::WEEK_DAYS;

/// Canonical date format used everywhere a date becomes text.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as a canonical `YYYY-MM-DD` string.
pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// The inclusive 7-day calendar range of one synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    /// Create a window starting at the given date.
    pub fn new(start: NaiveDate) -> Self {
        Self { start }
    }

    /// First day of the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (`start + 6`).
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(WEEK_DAYS as i64 - 1)
    }

    /// Whether a date falls inside the window, bounds inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// The 7 calendar dates of the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..WEEK_DAYS as i64).map(move |offset| start + Duration::days(offset))
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", iso_date(self.start), iso_date(self.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_is_six_days_after_start() {
        let window = WeekWindow::new(date(2025, 10, 6));
        assert_eq!(window.end(), date(2025, 10, 12));
    }

    #[test]
    fn test_contains_bounds_inclusive() {
        let window = WeekWindow::new(date(2025, 10, 6));
        assert!(window.contains(date(2025, 10, 6)));
        assert!(window.contains(date(2025, 10, 12)));
        assert!(!window.contains(date(2025, 10, 5)));
        assert!(!window.contains(date(2025, 10, 13)));
    }

    #[test]
    fn test_days_yields_seven_dates_in_order() {
        let window = WeekWindow::new(date(2025, 10, 6));
        let days: Vec<NaiveDate> = window.days().collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2025, 10, 6));
        assert_eq!(days[6], date(2025, 10, 12));
        assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_days_crosses_month_boundary() {
        let window = WeekWindow::new(date(2025, 10, 29));
        let days: Vec<NaiveDate> = window.days().collect();
        assert_eq!(days[2], date(2025, 10, 31));
        assert_eq!(days[3], date(2025, 11, 1));
        assert_eq!(window.end(), date(2025, 11, 4));
    }

    #[test]
    fn test_no_weekday_convention_enforced() {
        // A Wednesday start is perfectly valid.
        let window = WeekWindow::new(date(2025, 10, 8));
        assert_eq!(window.end(), date(2025, 10, 14));
    }

    #[test]
    fn test_display_format() {
        let window = WeekWindow::new(date(2025, 10, 6));
        assert_eq!(window.to_string(), "2025-10-06..2025-10-12");
    }

    #[test]
    fn test_iso_date_zero_pads() {
        assert_eq!(iso_date(date(2025, 1, 3)), "2025-01-03");
    }
}
