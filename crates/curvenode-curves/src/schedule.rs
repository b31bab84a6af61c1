//! Accrual period generation with stub handling.

use serde::{Deserialize, Serialize};

use curvenode_core::calendars::{BusinessDayConvention, Calendar};
use curvenode_core::{Date, StubType, Tenor};

use crate::error::{CurveNodeError, CurveNodeResult};

/// One accrual period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    /// Adjusted accrual start.
    pub accrual_start: Date,
    /// Adjusted accrual end.
    pub accrual_end: Date,
    /// Accrual end before business day adjustment.
    pub unadjusted_end: Date,
    /// Payment date.
    pub payment_date: Date,
}

/// Rules for splitting an interval into periods.
#[derive(Clone, Copy)]
pub struct ScheduleRule<'a> {
    /// Regular period length.
    pub tenor: Tenor,
    /// Stub placement.
    pub stub: StubType,
    /// End-of-month rule for unadjusted boundaries.
    pub is_eom: bool,
    /// Calendar for adjustments.
    pub calendar: &'a dyn Calendar,
    /// Business day adjustment of period boundaries.
    pub business_day_convention: BusinessDayConvention,
    /// Business days between accrual end and payment.
    pub payment_lag: i32,
}

impl ScheduleRule<'_> {
    /// Splits `[start, end]` into adjusted periods.
    ///
    /// An empty interval yields no periods.
    pub fn periods(&self, start: Date, end: Date) -> CurveNodeResult<Vec<SchedulePeriod>> {
        self.periods_rolled_from(start, end, end)
    }

    /// Splits `[start, end]` with boundaries rolled from `unadjusted_end`,
    /// the end date before business day adjustment.
    pub fn periods_rolled_from(
        &self,
        start: Date,
        unadjusted_end: Date,
        end: Date,
    ) -> CurveNodeResult<Vec<SchedulePeriod>> {
        if end == start {
            return Ok(Vec::new());
        }
        let boundaries =
            unadjusted_boundaries(start, unadjusted_end, self.tenor, self.stub, self.is_eom)?;
        let last = boundaries.len().saturating_sub(1);
        Ok(boundaries
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let accrual_start = self.adjust_boundary(w[0], start, end);
                let accrual_end = if i + 1 == last {
                    end
                } else {
                    self.adjust_boundary(w[1], start, end)
                };
                SchedulePeriod {
                    accrual_start,
                    accrual_end,
                    unadjusted_end: w[1],
                    payment_date: self.calendar.add_business_days(accrual_end, self.payment_lag),
                }
            })
            .collect())
    }

    // The interval ends are already adjusted by the caller.
    fn adjust_boundary(&self, date: Date, start: Date, end: Date) -> Date {
        if date == start || date == end {
            date
        } else {
            self.calendar.adjust(date, self.business_day_convention)
        }
    }
}

/// Unadjusted period boundaries from `start` to `end`, both included.
pub fn unadjusted_boundaries(
    start: Date,
    end: Date,
    tenor: Tenor,
    stub: StubType,
    is_eom: bool,
) -> CurveNodeResult<Vec<Date>> {
    if end < start {
        return Err(CurveNodeError::invalid_input(format!(
            "schedule end {end} is before start {start}"
        )));
    }
    if end == start {
        return Ok(Vec::new());
    }
    if tenor.is_zero() || tenor.is_negative() {
        return Err(CurveNodeError::invalid_input(format!(
            "schedule tenor must be positive, got {tenor}"
        )));
    }

    let mut dates = Vec::new();
    let exact;
    if stub.rolls_forward() {
        dates.push(start);
        let mut k = 1;
        loop {
            let next = tenor.times(k)?.add_to(start, is_eom)?;
            if next >= end {
                exact = next == end;
                break;
            }
            dates.push(next);
            k += 1;
        }
        dates.push(end);
    } else {
        dates.push(end);
        let mut k = 1;
        loop {
            let previous = tenor.times(-k)?.add_to(end, is_eom)?;
            if previous <= start {
                exact = previous == start;
                break;
            }
            dates.push(previous);
            k += 1;
        }
        dates.push(start);
        dates.reverse();
    }

    // A long stub absorbs the short one next to it.
    if !exact && stub.is_long() && dates.len() > 2 {
        if stub.rolls_forward() {
            dates.remove(dates.len() - 2);
        } else {
            dates.remove(1);
        }
    }
    Ok(dates)
}
