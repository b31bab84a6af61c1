//! Data-driven holiday calendars.
//!
//! Holiday sets usually arrive as reference data (one list of dates per
//! region or exchange). [`HolidayCalendar`] wraps such a list together with
//! the market's weekend definition.

use std::collections::BTreeSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Weekend definition for a holiday calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeekendType {
    /// Saturday and Sunday (most markets)
    #[default]
    SaturdaySunday,
    /// Friday and Saturday (Middle East markets)
    FridaySaturday,
    /// No weekends
    None,
}

impl WeekendType {
    /// Check if a weekday is a weekend day for this type.
    #[inline]
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        match self {
            WeekendType::SaturdaySunday => matches!(weekday, Weekday::Sat | Weekday::Sun),
            WeekendType::FridaySaturday => matches!(weekday, Weekday::Fri | Weekday::Sat),
            WeekendType::None => false,
        }
    }
}

/// A calendar defined by an explicit set of holiday dates.
///
/// # JSON Format
///
/// ```json
/// {
///   "name": "GBLO",
///   "weekend": "SaturdaySunday",
///   "holidays": ["2024-12-25", "2024-12-26"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    name: String,
    #[serde(default)]
    weekend: WeekendType,
    #[serde(default)]
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates an empty calendar with the given weekend rule.
    pub fn new(name: impl Into<String>, weekend: WeekendType) -> Self {
        Self {
            name: name.into(),
            weekend,
            holidays: BTreeSet::new(),
        }
    }

    /// Creates a Saturday/Sunday calendar with the given holidays.
    pub fn from_dates(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        let mut calendar = Self::new(name, WeekendType::SaturdaySunday);
        calendar.holidays.extend(holidays);
        calendar
    }

    /// Parses a calendar from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let calendar: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::calendar_error(format!("Failed to parse JSON: {e}")))?;
        log::debug!(
            "loaded holiday calendar {} with {} holidays",
            calendar.name,
            calendar.holidays.len()
        );
        Ok(calendar)
    }

    /// Adds a holiday.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Returns the weekend rule.
    #[must_use]
    pub fn weekend(&self) -> WeekendType {
        self.weekend
    }

    /// Iterates over the holidays in date order.
    pub fn holidays(&self) -> impl Iterator<Item = &Date> {
        self.holidays.iter()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.weekend.is_weekend(date.weekday()) && !self.holidays.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "name": "GBLO",
            "holidays": ["2024-12-25", "2024-12-26"]
        }"#;
        let cal = HolidayCalendar::from_json(json).unwrap();
        assert_eq!(cal.name(), "GBLO");
        assert_eq!(cal.weekend(), WeekendType::SaturdaySunday);
        assert!(!cal.is_business_day(d(2024, 12, 25)));
        assert!(!cal.is_business_day(d(2024, 12, 26)));
        assert!(cal.is_business_day(d(2024, 12, 27)));
    }

    #[test]
    fn test_bad_json() {
        let err = HolidayCalendar::from_json(r#"{"name": "X", "holidays": ["2024-13-01"]}"#);
        assert!(matches!(err, Err(CoreError::CalendarError { .. })));
    }

    #[test]
    fn test_friday_saturday_weekend() {
        let cal = HolidayCalendar::new("AEDU", WeekendType::FridaySaturday);
        assert!(!cal.is_business_day(d(2024, 1, 19))); // Friday
        assert!(cal.is_business_day(d(2024, 1, 21))); // Sunday
    }
}
