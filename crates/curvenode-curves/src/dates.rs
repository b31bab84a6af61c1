//! Date scheduling from tenors.
//!
//! Every converter turns node tenors into dates the same way:
//!
//! 1. spot = valuation rolled to a business day, plus the settlement lag
//! 2. start = spot + start tenor, business-day adjusted
//! 3. end = start + maturity tenor, business-day adjusted
//! 4. accrual factor = day count between start and end
//!
//! With the end-of-month flag set, a month or year tenor anchored on the
//! last business day of a month lands on the last business day of the
//! target month.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use curvenode_core::calendars::{BusinessDayConvention, Calendar};
use curvenode_core::daycounts::DayCountConvention;
use curvenode_core::{Date, Tenor};

use crate::error::{CurveNodeError, CurveNodeResult};

/// Spot, start and end dates of one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDates {
    /// Spot date.
    pub spot: Date,
    /// Adjusted start date.
    pub start: Date,
    /// Adjusted end date.
    pub end: Date,
}

/// Turns tenors into adjusted dates for one convention and calendar.
#[derive(Clone)]
pub struct DateScheduler {
    calendar: Arc<dyn Calendar>,
    business_day_convention: BusinessDayConvention,
    is_eom: bool,
    settlement_days: u32,
}

impl DateScheduler {
    /// Creates a scheduler.
    pub fn new(
        calendar: Arc<dyn Calendar>,
        business_day_convention: BusinessDayConvention,
        is_eom: bool,
        settlement_days: u32,
    ) -> Self {
        Self {
            calendar,
            business_day_convention,
            is_eom,
            settlement_days,
        }
    }

    /// The calendar.
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// The business day convention.
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.business_day_convention
    }

    /// The end-of-month flag.
    pub fn is_eom(&self) -> bool {
        self.is_eom
    }

    /// Spot lag in business days.
    pub fn settlement_days(&self) -> u32 {
        self.settlement_days
    }

    /// Valuation date rolled to a business day and advanced by the settlement lag.
    pub fn spot_date(&self, valuation: Date) -> Date {
        self.calendar.settlement_date(valuation, self.settlement_days)
    }

    /// Adds `tenor` to `anchor` and adjusts the result.
    ///
    /// Zero tenors return the adjusted anchor. Negative tenors are rejected.
    pub fn advance(&self, anchor: Date, tenor: Tenor) -> CurveNodeResult<Date> {
        if tenor.is_negative() {
            return Err(CurveNodeError::invalid_input(format!(
                "negative tenor {tenor} from {anchor}"
            )));
        }
        let months = tenor.total_months()?;
        let eom_roll = self.is_eom && months != 0 && self.is_last_business_day(anchor);
        if eom_roll {
            let target = anchor.add_months(months)?.end_of_month();
            return Ok(self.calendar.previous_business_day(target));
        }
        let unadjusted = tenor.add_to(anchor, self.is_eom)?;
        Ok(self.calendar.adjust(unadjusted, self.business_day_convention))
    }

    /// Start date: spot advanced by `start_tenor`.
    pub fn start_date(&self, valuation: Date, start_tenor: Tenor) -> CurveNodeResult<Date> {
        self.advance(self.spot_date(valuation), start_tenor)
    }

    /// End date: `start` advanced by `maturity_tenor`.
    pub fn end_date(&self, start: Date, maturity_tenor: Tenor) -> CurveNodeResult<Date> {
        self.advance(start, maturity_tenor)
    }

    /// Spot, start and end dates in one go.
    pub fn dates(
        &self,
        valuation: Date,
        start_tenor: Tenor,
        maturity_tenor: Tenor,
    ) -> CurveNodeResult<ScheduledDates> {
        let spot = self.spot_date(valuation);
        let start = self.advance(spot, start_tenor)?;
        let end = self.advance(start, maturity_tenor)?;
        Ok(ScheduledDates { spot, start, end })
    }

    /// Adjusts a single date with the scheduler's convention.
    pub fn adjust(&self, date: Date) -> Date {
        self.calendar.adjust(date, self.business_day_convention)
    }

    fn is_last_business_day(&self, date: Date) -> bool {
        self.calendar.is_business_day(date)
            && date
                .next_day()
                .map_or(true, |next| self.calendar.next_business_day(next).month() != date.month())
    }
}

impl std::fmt::Debug for DateScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateScheduler")
            .field("calendar", &self.calendar.name())
            .field("business_day_convention", &self.business_day_convention)
            .field("is_eom", &self.is_eom)
            .field("settlement_days", &self.settlement_days)
            .finish()
    }
}

/// Day count fraction between two dates.
pub fn accrual_factor(day_count: DayCountConvention, start: Date, end: Date) -> f64 {
    day_count.accrual_factor(start, end)
}
