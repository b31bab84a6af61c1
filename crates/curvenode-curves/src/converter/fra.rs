use curvenode_conventions::{IborIndexConvention, RollDateFraConvention};
use curvenode_core::calendars::{BusinessDayConvention, Calendar};
use curvenode_core::{Date, Tenor};

use crate::context::ConversionContext;
use crate::dates::DateScheduler;
use crate::error::{CurveNodeError, CurveNodeResult};
use crate::expiry::roll_date_adjuster;
use crate::index::IborIndex;
use crate::instruments::{FraDefinition, InstrumentDefinition};
use crate::nodes::{FraNode, RollDateFraNode};

/// Both fixing tenors are measured from spot. The index tenor is their
/// difference.
pub(crate) fn convert_fra(
    ctx: &ConversionContext<'_>,
    node: &FraNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let rate = ctx.quote()?;
    let convention: IborIndexConvention = ctx.conventions().resolve_as(&node.convention)?;
    let months = node
        .fixing_end
        .total_months()?
        .checked_sub(node.fixing_start.total_months()?)
        .unwrap_or(0);
    if months <= 0 {
        return Err(CurveNodeError::invalid_input(format!(
            "FRA fixing end {} must be a whole number of months after fixing start {}",
            node.fixing_end, node.fixing_start
        )));
    }

    let scheduler = DateScheduler::new(
        ctx.calendar(&convention.region_calendar)?,
        convention.business_day_convention,
        convention.is_eom,
        convention.settlement_days,
    );
    let spot = scheduler.spot_date(ctx.valuation);
    let accrual_start = scheduler.advance(spot, node.fixing_start)?;
    let accrual_end = scheduler.advance(spot, node.fixing_end)?;
    fra_definition(
        ctx,
        &convention,
        &scheduler,
        Tenor::months(months),
        accrual_start,
        accrual_end,
        rate,
    )
}

/// Start and end are the `start_number`th and `end_number`th roll dates
/// after valuation plus the start tenor.
pub(crate) fn convert_roll_date_fra(
    ctx: &ConversionContext<'_>,
    node: &RollDateFraNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let rate = ctx.quote()?;
    let fra_convention: RollDateFraConvention =
        ctx.conventions().resolve_as(&node.roll_date_fra_convention)?;
    let convention: IborIndexConvention =
        ctx.conventions().resolve_as(&fra_convention.index_convention)?;
    let adjuster = roll_date_adjuster(&fra_convention.roll_date_adjuster)?;
    if node.roll_date_end_number <= node.roll_date_start_number {
        return Err(CurveNodeError::invalid_input(format!(
            "roll date end number {} must exceed start number {}",
            node.roll_date_end_number, node.roll_date_start_number
        )));
    }

    let months = (node.roll_date_end_number - node.roll_date_start_number)
        .checked_mul(adjuster.months_to_adjust())
        .and_then(|months| i32::try_from(months).ok())
        .ok_or_else(|| {
            CurveNodeError::invalid_input(format!(
                "roll dates {} to {} span too many months",
                node.roll_date_start_number, node.roll_date_end_number
            ))
        })?;

    let scheduler = DateScheduler::new(
        ctx.calendar(&convention.region_calendar)?,
        convention.business_day_convention,
        convention.is_eom,
        convention.settlement_days,
    );
    let anchor = scheduler.calendar().adjust(
        node.start_tenor.add_to(ctx.valuation, false)?,
        BusinessDayConvention::Following,
    );
    let accrual_start = scheduler.adjust(adjuster.next_roll(anchor, node.roll_date_start_number)?);
    let accrual_end = scheduler.adjust(adjuster.next_roll(anchor, node.roll_date_end_number)?);
    fra_definition(
        ctx,
        &convention,
        &scheduler,
        Tenor::months(months),
        accrual_start,
        accrual_end,
        rate,
    )
}

fn fra_definition(
    ctx: &ConversionContext<'_>,
    convention: &IborIndexConvention,
    scheduler: &DateScheduler,
    index_tenor: Tenor,
    accrual_start: Date,
    accrual_end: Date,
    rate: f64,
) -> CurveNodeResult<InstrumentDefinition> {
    let fixing_calendar = ctx.calendar(&convention.fixing_calendar)?;
    let fixing_date =
        fixing_calendar.add_business_days(accrual_start, -(convention.settlement_days as i32));
    let fixing_period_end = scheduler.advance(accrual_start, index_tenor)?;
    let day_count = convention.day_count;
    Ok(InstrumentDefinition::Fra(FraDefinition {
        currency: convention.currency,
        payment_date: accrual_start,
        accrual_start,
        accrual_end,
        accrual_factor: day_count.accrual_factor(accrual_start, accrual_end),
        notional: 1.0,
        fixing_date,
        fixing_period_start: accrual_start,
        fixing_period_end,
        fixing_accrual_factor: day_count.accrual_factor(accrual_start, fixing_period_end),
        index: IborIndex::from_convention(convention, index_tenor),
        rate,
    }))
}
