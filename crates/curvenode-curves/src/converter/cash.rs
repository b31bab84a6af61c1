use curvenode_conventions::Convention;

use crate::context::ConversionContext;
use crate::dates::DateScheduler;
use crate::error::{CurveNodeError, CurveNodeResult};
use crate::index::IborIndex;
use crate::instruments::{CashDefinition, DepositIborDefinition, InstrumentDefinition};
use crate::nodes::CashNode;

/// Deposit convention first; a reference naming an Ibor index becomes an
/// index-linked deposit over the same dates.
pub(crate) fn convert_cash(
    ctx: &ConversionContext<'_>,
    node: &CashNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let rate = ctx.quote()?;
    match ctx.conventions().resolve_any(&node.convention)? {
        Convention::Deposit(convention) => {
            let scheduler = DateScheduler::new(
                ctx.calendar(&convention.region_calendar)?,
                convention.business_day_convention,
                convention.is_eom,
                convention.settlement_days,
            );
            let dates = scheduler.dates(ctx.valuation, node.start_tenor, node.maturity_tenor)?;
            Ok(InstrumentDefinition::Cash(CashDefinition {
                currency: convention.currency,
                start_date: dates.start,
                end_date: dates.end,
                notional: 1.0,
                rate,
                accrual_factor: convention.day_count.accrual_factor(dates.start, dates.end),
            }))
        }
        Convention::IborIndex(convention) => {
            let scheduler = DateScheduler::new(
                ctx.calendar(&convention.region_calendar)?,
                convention.business_day_convention,
                convention.is_eom,
                convention.settlement_days,
            );
            let dates = scheduler.dates(ctx.valuation, node.start_tenor, node.maturity_tenor)?;
            Ok(InstrumentDefinition::DepositIbor(DepositIborDefinition {
                currency: convention.currency,
                start_date: dates.start,
                end_date: dates.end,
                notional: 1.0,
                rate,
                accrual_factor: convention.day_count.accrual_factor(dates.start, dates.end),
                index: IborIndex::from_convention(&convention, node.maturity_tenor),
            }))
        }
        other => Err(CurveNodeError::type_mismatch(
            &node.convention,
            "Deposit or IborIndex",
            other.kind().to_string(),
        )),
    }
}
