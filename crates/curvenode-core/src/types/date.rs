//! Calendar date used for every schedule computation.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A calendar date without time zone.
///
/// Valuation times are truncated to dates before any scheduling happens,
/// so this is the only temporal type the converters work with.
///
/// # Example
///
/// ```rust
/// use curvenode_core::types::Date;
///
/// let date = Date::from_ymd(2024, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses an ISO 8601 date (YYYY-MM-DD).
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Adds a number of calendar days.
    ///
    /// Fails when the result falls outside the representable date range.
    pub fn add_days(&self, days: i64) -> CoreResult<Self> {
        chrono::Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{self} shifted by {days} days")))
    }

    /// The following calendar day, if representable.
    #[must_use]
    pub fn next_day(&self) -> Option<Self> {
        self.0.succ_opt().map(Date)
    }

    /// The preceding calendar day, if representable.
    #[must_use]
    pub fn previous_day(&self) -> Option<Self> {
        self.0.pred_opt().map(Date)
    }

    /// Adds a number of months, clamping the day to the target month length.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total = i64::from(self.year()) * 12 + i64::from(self.month()) - 1 + i64::from(months);
        let year = i32::try_from(total.div_euclid(12)).map_err(|_| {
            CoreError::invalid_date(format!("{self} shifted by {months} months"))
        })?;
        let month = (total.rem_euclid(12) + 1) as u32;
        let day = self.day().min(days_in_month(year, month));
        Self::from_ymd(year, month, day)
    }

    /// Number of calendar days from `self` to `other` (negative if `other` is earlier).
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Whole months from `self` to `other`, ignoring the day of month.
    #[must_use]
    pub fn months_between(&self, other: &Date) -> i32 {
        (other.year() - self.year()) * 12 + other.month() as i32 - self.month() as i32
    }

    /// Returns the last day of this date's month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        Date(self.0.with_day(self.days_in_month()).unwrap_or(self.0))
    }

    /// Checks if the date is the last day of its month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns the `n`-th occurrence (1-based) of `weekday` in the given month.
    pub fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> CoreResult<Self> {
        NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
            .map(Date)
            .ok_or_else(|| {
                CoreError::invalid_date(format!("no {n}th {weekday} in {year}-{month:02}"))
            })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        _ => 28,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
        assert!(Date::parse("2025-02-30").is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let date: Date = "2024-01-15".parse().unwrap();
        assert_eq!(date, d(2024, 1, 15));
        assert_eq!(date.to_string(), "2024-01-15");
    }

    #[test]
    fn test_add_months_clamps() {
        assert_eq!(d(2024, 1, 31).add_months(1).unwrap(), d(2024, 2, 29));
        assert_eq!(d(2023, 1, 31).add_months(1).unwrap(), d(2023, 2, 28));
        assert_eq!(d(2024, 3, 31).add_months(-1).unwrap(), d(2024, 2, 29));
        assert_eq!(d(2024, 11, 15).add_months(3).unwrap(), d(2025, 2, 15));
        assert_eq!(d(2024, 2, 29).add_months(12).unwrap(), d(2025, 2, 28));
    }

    #[test]
    fn test_end_of_month() {
        assert_eq!(d(2024, 2, 10).end_of_month(), d(2024, 2, 29));
        assert!(d(2024, 4, 30).is_end_of_month());
        assert!(!d(2024, 4, 29).is_end_of_month());
    }

    #[test]
    fn test_months_between() {
        assert_eq!(d(2024, 1, 17).months_between(&d(2024, 4, 17)), 3);
        assert_eq!(d(2024, 11, 1).months_between(&d(2025, 2, 1)), 3);
    }

    #[test]
    fn test_nth_weekday() {
        // Third Wednesday of March 2024
        assert_eq!(
            Date::nth_weekday(2024, 3, Weekday::Wed, 3).unwrap(),
            d(2024, 3, 20)
        );
        assert!(Date::nth_weekday(2024, 2, Weekday::Mon, 5).is_err());
    }

    #[test]
    fn test_day_arithmetic() {
        let start = d(2024, 1, 17);
        let end = d(2024, 4, 17);
        assert_eq!(end - start, 91);
        assert_eq!(start.add_days(91).unwrap(), end);
        assert_eq!(end.add_days(-91).unwrap(), start);
        assert_eq!(start.next_day(), Some(d(2024, 1, 18)));
        assert_eq!(start.previous_day(), Some(d(2024, 1, 16)));
    }

    #[test]
    fn test_out_of_range_shift_is_an_error() {
        let start = d(2024, 1, 17);
        assert!(start.add_days(i64::MAX).is_err());
        assert!(start.add_days(i64::from(i32::MAX) * 400).is_err());
        assert!(start.add_months(i32::MAX).is_err());
        assert!(start.add_months(i32::MIN).is_err());
        assert_eq!(Date::from(NaiveDate::MAX).next_day(), None);
    }
}
