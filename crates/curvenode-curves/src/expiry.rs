//! Exchange expiry calculators and roll-date adjusters.
//!
//! Both are looked up by the name stored on a convention through a fixed
//! registry of built-in implementations.

use chrono::Weekday;

use curvenode_core::calendars::Calendar;
use curvenode_core::Date;

use crate::error::{CurveNodeError, CurveNodeResult};

/// Name of the quarterly IMM expiry calculator.
pub const IMM_QUARTERLY_EXPIRY: &str = "IMMFutureAndFutureOptionQuarterlyExpiryCalculator";
/// Name of the monthly IMM expiry calculator.
pub const IMM_MONTHLY_EXPIRY: &str = "IMMFutureAndFutureOptionMonthlyExpiryCalculator";
/// Name of the quarterly IMM roll-date adjuster.
pub const QUARTERLY_IMM_ROLL: &str = "QuarterlyIMMRollDateAdjuster";
/// Name of the monthly IMM roll-date adjuster.
pub const MONTHLY_IMM_ROLL: &str = "MonthlyIMMRollDateAdjuster";

// =============================================================================
// EXPIRY CALCULATORS
// =============================================================================

/// Computes expiry dates of exchange-traded contracts.
pub trait ExpiryCalculator: Send + Sync {
    /// Registry name.
    fn name(&self) -> &'static str;

    /// The `n`th expiry (1 = first) strictly after `from`.
    fn expiry_date(&self, n: u32, from: Date, calendar: &dyn Calendar) -> CurveNodeResult<Date>;

    /// Settlement date of a contract expiring on `expiry`.
    fn settlement_date(&self, expiry: Date, calendar: &dyn Calendar) -> Date {
        calendar.add_business_days(expiry, 2)
    }
}

/// Last trading two business days before the third Wednesday of
/// March, June, September and December.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmQuarterlyExpiryCalculator;

/// Last trading two business days before the third Wednesday of every month.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmMonthlyExpiryCalculator;

impl ExpiryCalculator for ImmQuarterlyExpiryCalculator {
    fn name(&self) -> &'static str {
        IMM_QUARTERLY_EXPIRY
    }

    fn expiry_date(&self, n: u32, from: Date, calendar: &dyn Calendar) -> CurveNodeResult<Date> {
        nth_cycle_date(n, from, 3, |y, m| imm_expiry(y, m, calendar))
    }
}

impl ExpiryCalculator for ImmMonthlyExpiryCalculator {
    fn name(&self) -> &'static str {
        IMM_MONTHLY_EXPIRY
    }

    fn expiry_date(&self, n: u32, from: Date, calendar: &dyn Calendar) -> CurveNodeResult<Date> {
        nth_cycle_date(n, from, 1, |y, m| imm_expiry(y, m, calendar))
    }
}

static IMM_QUARTERLY: ImmQuarterlyExpiryCalculator = ImmQuarterlyExpiryCalculator;
static IMM_MONTHLY: ImmMonthlyExpiryCalculator = ImmMonthlyExpiryCalculator;

/// Looks up an expiry calculator by name.
pub fn expiry_calculator(name: &str) -> CurveNodeResult<&'static dyn ExpiryCalculator> {
    match name {
        IMM_QUARTERLY_EXPIRY => Ok(&IMM_QUARTERLY),
        IMM_MONTHLY_EXPIRY => Ok(&IMM_MONTHLY),
        other => Err(CurveNodeError::not_found("expiry calculator", other)),
    }
}

// =============================================================================
// ROLL-DATE ADJUSTERS
// =============================================================================

/// Produces IMM-style roll dates.
pub trait RollDateAdjuster: Send + Sync {
    /// Registry name.
    fn name(&self) -> &'static str;

    /// Months between consecutive roll dates.
    fn months_to_adjust(&self) -> u32;

    /// The `n`th roll date (1 = first) strictly after `date`.
    fn next_roll(&self, date: Date, n: u32) -> CurveNodeResult<Date>;
}

/// Third Wednesday of March, June, September and December.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuarterlyImmRollDateAdjuster;

/// Third Wednesday of every month.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthlyImmRollDateAdjuster;

impl RollDateAdjuster for QuarterlyImmRollDateAdjuster {
    fn name(&self) -> &'static str {
        QUARTERLY_IMM_ROLL
    }

    fn months_to_adjust(&self) -> u32 {
        3
    }

    fn next_roll(&self, date: Date, n: u32) -> CurveNodeResult<Date> {
        nth_cycle_date(n, date, 3, third_wednesday)
    }
}

impl RollDateAdjuster for MonthlyImmRollDateAdjuster {
    fn name(&self) -> &'static str {
        MONTHLY_IMM_ROLL
    }

    fn months_to_adjust(&self) -> u32 {
        1
    }

    fn next_roll(&self, date: Date, n: u32) -> CurveNodeResult<Date> {
        nth_cycle_date(n, date, 1, third_wednesday)
    }
}

static QUARTERLY_ROLL: QuarterlyImmRollDateAdjuster = QuarterlyImmRollDateAdjuster;
static MONTHLY_ROLL: MonthlyImmRollDateAdjuster = MonthlyImmRollDateAdjuster;

/// Looks up a roll-date adjuster by name.
pub fn roll_date_adjuster(name: &str) -> CurveNodeResult<&'static dyn RollDateAdjuster> {
    match name {
        QUARTERLY_IMM_ROLL => Ok(&QUARTERLY_ROLL),
        MONTHLY_IMM_ROLL => Ok(&MONTHLY_ROLL),
        other => Err(CurveNodeError::not_found("roll date adjuster", other)),
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn third_wednesday(year: i32, month: u32) -> CurveNodeResult<Date> {
    Ok(Date::nth_weekday(year, month, Weekday::Wed, 3)?)
}

fn imm_expiry(year: i32, month: u32, calendar: &dyn Calendar) -> CurveNodeResult<Date> {
    Ok(calendar.add_business_days(third_wednesday(year, month)?, -2))
}

/// Walks cycle months from `from` and returns the `n`th cycle date after it.
fn nth_cycle_date<F>(n: u32, from: Date, cycle_months: u32, date_in: F) -> CurveNodeResult<Date>
where
    F: Fn(i32, u32) -> CurveNodeResult<Date>,
{
    if n == 0 {
        return Err(CurveNodeError::invalid_input(
            "contract and roll numbers start at 1",
        ));
    }
    let mut year = from.year();
    let mut month = from.month();
    let mut found = 0;
    loop {
        if month % cycle_months == 0 {
            let candidate = date_in(year, month)?;
            if candidate > from {
                found += 1;
                if found == n {
                    return Ok(candidate);
                }
            }
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvenode_core::calendars::{Target2Calendar, WeekendCalendar};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_quarterly_expiries() {
        let calc = expiry_calculator(IMM_QUARTERLY_EXPIRY).unwrap();
        let cal = Target2Calendar::global();
        // Third Wednesday of March 2024 is the 20th.
        assert_eq!(calc.expiry_date(1, d(2024, 1, 15), cal).unwrap(), d(2024, 3, 18));
        assert_eq!(calc.expiry_date(2, d(2024, 1, 15), cal).unwrap(), d(2024, 6, 17));
        // Strictly after: the expiry day itself moves on to the next contract.
        assert_eq!(calc.expiry_date(1, d(2024, 3, 18), cal).unwrap(), d(2024, 6, 17));
        assert_eq!(calc.settlement_date(d(2024, 3, 18), cal), d(2024, 3, 20));
    }

    #[test]
    fn test_monthly_expiries() {
        let calc = expiry_calculator(IMM_MONTHLY_EXPIRY).unwrap();
        // Third Wednesday of February 2024 is the 21st.
        assert_eq!(
            calc.expiry_date(1, d(2024, 1, 31), &WeekendCalendar).unwrap(),
            d(2024, 2, 19)
        );
    }

    #[test]
    fn test_roll_dates() {
        let adjuster = roll_date_adjuster(QUARTERLY_IMM_ROLL).unwrap();
        assert_eq!(adjuster.months_to_adjust(), 3);
        assert_eq!(adjuster.next_roll(d(2024, 1, 15), 1).unwrap(), d(2024, 3, 20));
        assert_eq!(adjuster.next_roll(d(2024, 3, 20), 1).unwrap(), d(2024, 6, 19));
        assert_eq!(adjuster.next_roll(d(2024, 1, 15), 4).unwrap(), d(2024, 12, 18));
        let monthly = roll_date_adjuster(MONTHLY_IMM_ROLL).unwrap();
        assert_eq!(monthly.next_roll(d(2024, 1, 15), 1).unwrap(), d(2024, 1, 17));
    }

    #[test]
    fn test_unknown_names_and_zero() {
        assert!(expiry_calculator("NoSuchCalculator").err().unwrap().is_not_found());
        assert!(roll_date_adjuster("NoSuchAdjuster").err().unwrap().is_not_found());
        let adjuster = roll_date_adjuster(MONTHLY_IMM_ROLL).unwrap();
        assert!(adjuster.next_roll(d(2024, 1, 15), 0).is_err());
    }
}
