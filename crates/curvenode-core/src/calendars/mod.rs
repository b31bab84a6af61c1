//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] business-day predicate and the date rolling built on it
//! - Business day adjustment conventions
//! - Data-driven holiday calendars and the rule-based TARGET2 calendar

mod conventions;
mod holiday;
mod target2;

pub use conventions::BusinessDayConvention;
pub use holiday::{HolidayCalendar, WeekendType};
pub use target2::{easter_sunday, Target2Calendar};

use std::sync::Arc;

use crate::types::Date;

/// Trait for business day calendars.
///
/// A calendar is a pure predicate over dates; every rolling operation is
/// derived from [`Calendar::is_business_day`].
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days, skipping non-business days.
    ///
    /// A zero count returns `date` unchanged even if it is a holiday. Rolling
    /// stops at the edge of the representable date range.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.unsigned_abs();

        while remaining > 0 {
            let step = if days >= 0 { result.next_day() } else { result.previous_day() };
            let Some(step) = step else { break };
            result = step;
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Rolls `date` to a business day and then advances it by `days` business days.
    ///
    /// This is the spot/settlement lag rule: a valuation date that falls on a
    /// holiday first moves to the next business day before the lag is counted.
    fn settlement_date(&self, date: Date, days: u32) -> Date {
        let rolled = self.next_business_day(date);
        self.add_business_days(rolled, i32::try_from(days).unwrap_or(i32::MAX))
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            let Some(next) = result.next_day() else { break };
            result = next;
        }
        result
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            let Some(previous) = result.previous_day() else { break };
            result = previous;
        }
        result
    }
}

impl<C: Calendar + ?Sized> Calendar for Arc<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_business_day(&self, date: Date) -> bool {
        (**self).is_business_day(date)
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Calendar that combines several calendars: a day is a business day only
/// if every member calendar treats it as one.
#[derive(Clone)]
pub struct JointCalendar {
    calendars: Vec<Arc<dyn Calendar>>,
    name: String,
}

impl JointCalendar {
    /// Creates a joint calendar from member calendars.
    pub fn new(calendars: Vec<Arc<dyn Calendar>>) -> Self {
        let name = calendars
            .iter()
            .map(|c| c.name().to_string())
            .collect::<Vec<_>>()
            .join("+");
        Self { calendars, name }
    }

    /// Number of member calendars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    /// True if there are no member calendars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }
}

impl std::fmt::Debug for JointCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JointCalendar")
            .field("name", &self.name)
            .finish()
    }
}

impl Calendar for JointCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.calendars.iter().all(|cal| cal.is_business_day(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(d(2025, 1, 6)));
        assert!(!cal.is_business_day(d(2025, 1, 4)));
        assert!(!cal.is_business_day(d(2025, 1, 5)));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;
        // Friday + 1 business day = Monday
        assert_eq!(cal.add_business_days(d(2025, 1, 3), 1), d(2025, 1, 6));
        assert_eq!(cal.add_business_days(d(2025, 1, 6), -1), d(2025, 1, 3));
        assert_eq!(cal.add_business_days(d(2025, 1, 4), 0), d(2025, 1, 4));
    }

    #[test]
    fn test_settlement_date_rolls_first() {
        let cal = WeekendCalendar;
        // Saturday valuation: roll to Monday, then T+2 = Wednesday
        assert_eq!(cal.settlement_date(d(2025, 1, 4), 2), d(2025, 1, 8));
        assert_eq!(cal.settlement_date(d(2025, 1, 4), 0), d(2025, 1, 6));
        // Monday valuation, T+2 = Wednesday
        assert_eq!(cal.settlement_date(d(2024, 1, 15), 2), d(2024, 1, 17));
    }

    #[test]
    fn test_joint_calendar() {
        let holidays = HolidayCalendar::from_dates("XMAS", vec![d(2024, 12, 25)]);
        let joint = JointCalendar::new(vec![
            Arc::new(WeekendCalendar) as Arc<dyn Calendar>,
            Arc::new(holidays) as Arc<dyn Calendar>,
        ]);
        assert_eq!(joint.name(), "Weekend Only+XMAS");
        assert!(!joint.is_business_day(d(2024, 12, 25)));
        assert!(!joint.is_business_day(d(2024, 12, 28)));
        assert!(joint.is_business_day(d(2024, 12, 27)));
    }
}
