//! Actual/Actual ISDA.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA.
///
/// Splits the period at calendar year boundaries; each piece is divided by
/// the length of its own year (365 or 366).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start == end {
            return Decimal::ZERO;
        }
        if end < start {
            return -self.year_fraction(end, start);
        }

        let mut total = Decimal::ZERO;
        let mut current = start;
        while current < end {
            // Jan 1 of the following year always exists
            let next_year = Date::from_ymd(current.year() + 1, 1, 1).unwrap_or(end);
            let piece_end = if next_year < end { next_year } else { end };
            let days = current.days_between(&piece_end);
            total += Decimal::from(days) / Decimal::from(current.days_in_year());
            current = piece_end;
        }
        total
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_full_years() {
        let dc = ActActIsda;
        let d = |y, m, day| Date::from_ymd(y, m, day).unwrap();
        assert_eq!(dc.year_fraction(d(2024, 1, 1), d(2025, 1, 1)), dec!(1));
        assert_eq!(dc.year_fraction(d(2023, 1, 1), d(2025, 1, 1)), dec!(2));
    }

    #[test]
    fn test_crossing_year_end() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2023, 12, 1).unwrap();
        let end = Date::from_ymd(2024, 2, 1).unwrap();
        // 31 days in 2023 (365), 31 days in 2024 (366)
        let expected = dec!(31) / dec!(365) + dec!(31) / dec!(366);
        assert_eq!(dc.year_fraction(start, end), expected);
        assert_eq!(dc.year_fraction(end, start), -expected);
    }
}
