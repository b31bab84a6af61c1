//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Calendar;
use crate::error::CoreError;
use crate::types::Date;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Following, unless that crosses into the next month, then preceding.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Preceding, unless that crosses into the previous month, then following.
    ModifiedPreceding,
}

impl BusinessDayConvention {
    fn label(self) -> &'static str {
        match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BusinessDayConvention {
    type Err = CoreError;

    /// Accepts display names, variant names and the usual abbreviations (`MF`, `F`, `P`, `MP`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_uppercase();
        match key.as_str() {
            "NONE" | "UNADJUSTED" => Ok(Self::Unadjusted),
            "F" | "FOLLOWING" => Ok(Self::Following),
            "MF" | "MODIFIEDFOLLOWING" => Ok(Self::ModifiedFollowing),
            "P" | "PRECEDING" => Ok(Self::Preceding),
            "MP" | "MODIFIEDPRECEDING" => Ok(Self::ModifiedPreceding),
            _ => Err(CoreError::calendar_error(format!(
                "unknown business day convention '{s}'"
            ))),
        }
    }
}

/// Adjusts a date according to the given business day convention.
pub(super) fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => calendar.next_business_day(date),
        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = calendar.next_business_day(date);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                calendar.previous_business_day(date)
            }
        }
        BusinessDayConvention::Preceding => calendar.previous_business_day(date),
        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = calendar.previous_business_day(date);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                calendar.next_business_day(date)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_modified_following_stays_in_month() {
        let cal = WeekendCalendar;
        // Saturday 2024-08-31 -> Following would be 2024-09-02
        let sat = d(2024, 8, 31);
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Following), d(2024, 9, 2));
        assert_eq!(
            cal.adjust(sat, BusinessDayConvention::ModifiedFollowing),
            d(2024, 8, 30)
        );
    }

    #[test]
    fn test_modified_preceding_stays_in_month() {
        let cal = WeekendCalendar;
        // Sunday 2024-09-01 -> Preceding would be 2024-08-30
        let sun = d(2024, 9, 1);
        assert_eq!(cal.adjust(sun, BusinessDayConvention::Preceding), d(2024, 8, 30));
        assert_eq!(
            cal.adjust(sun, BusinessDayConvention::ModifiedPreceding),
            d(2024, 9, 2)
        );
        assert_eq!(cal.adjust(sun, BusinessDayConvention::Unadjusted), sun);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "Modified Following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!(
            "MF".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert!("Nearest".parse::<BusinessDayConvention>().is_err());
    }
}
