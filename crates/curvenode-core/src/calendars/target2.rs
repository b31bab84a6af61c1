//! TARGET2 calendar for Eurozone payments and securities settlement.

use std::sync::OnceLock;

use super::Calendar;
use crate::types::Date;

static TARGET2_CALENDAR: OnceLock<Target2Calendar> = OnceLock::new();

/// TARGET2 holiday calendar for Eurozone markets.
///
/// ## Holidays
///
/// - New Year's Day (January 1)
/// - Good Friday
/// - Easter Monday
/// - Labour Day (May 1)
/// - Christmas Day (December 25)
/// - Boxing Day (December 26)
///
/// Holidays falling on a weekend are not moved.
#[derive(Debug, Clone, Copy, Default)]
pub struct Target2Calendar;

impl Target2Calendar {
    /// Get the global TARGET2 calendar instance.
    pub fn global() -> &'static Target2Calendar {
        TARGET2_CALENDAR.get_or_init(|| Target2Calendar)
    }

    fn is_holiday_rule(date: Date) -> bool {
        let (month, day) = (date.month(), date.day());
        if matches!((month, day), (1, 1) | (5, 1) | (12, 25) | (12, 26)) {
            return true;
        }
        match easter_sunday(date.year()) {
            Some(easter) => {
                let offset = easter.days_between(&date);
                offset == -2 || offset == 1
            }
            None => false,
        }
    }
}

impl Calendar for Target2Calendar {
    fn name(&self) -> &str {
        "TARGET2"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !Self::is_holiday_rule(date)
    }
}

/// Gregorian Easter Sunday (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<Date> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    Date::from_ymd(year, month as u32, day as u32).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_easter() {
        assert_eq!(easter_sunday(2024), Some(d(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(d(2025, 4, 20)));
        assert_eq!(easter_sunday(2013), Some(d(2013, 3, 31)));
    }

    #[test]
    fn test_target2_holidays() {
        let cal = Target2Calendar::global();
        assert!(!cal.is_business_day(d(2025, 1, 1)));
        assert!(!cal.is_business_day(d(2024, 3, 29))); // Good Friday
        assert!(!cal.is_business_day(d(2024, 4, 1))); // Easter Monday
        assert!(!cal.is_business_day(d(2024, 5, 1)));
        assert!(!cal.is_business_day(d(2024, 12, 26)));
        assert!(cal.is_business_day(d(2024, 4, 17)));
    }

    #[test]
    fn test_target2_no_weekend_observation() {
        let cal = Target2Calendar;
        // 2028-01-01 is a Saturday; Friday 2027-12-31 stays a business day
        assert!(cal.is_business_day(d(2027, 12, 31)));
    }
}
