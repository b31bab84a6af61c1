use curvenode_conventions::{FxForwardAndSwapConvention, FxSpotConvention};
use curvenode_core::calendars::Calendar;
use curvenode_core::Date;
use curvenode_traits::ExternalId;

use crate::context::ConversionContext;
use crate::dates::DateScheduler;
use crate::error::CurveNodeResult;
use crate::instruments::{FxForwardDefinition, FxSwapDefinition, InstrumentDefinition};
use crate::nodes::{FxForwardNode, FxSwapNode};

/// Spot date from the spot convention and a scheduler for forward dates
/// counted from it.
fn fx_dates(
    ctx: &ConversionContext<'_>,
    reference: &ExternalId,
) -> CurveNodeResult<(Date, DateScheduler)> {
    let convention: FxForwardAndSwapConvention = ctx.conventions().resolve_as(reference)?;
    let spot_convention: FxSpotConvention =
        ctx.conventions().resolve_as(&convention.spot_convention)?;
    let spot_calendar = ctx.calendar(&spot_convention.settlement_region)?;
    let spot = spot_calendar.settlement_date(ctx.valuation, spot_convention.settlement_days);
    let scheduler = DateScheduler::new(
        ctx.calendar(&convention.settlement_region)?,
        convention.business_day_convention,
        convention.is_eom,
        0,
    );
    Ok((spot, scheduler))
}

/// Pays one unit of the pay currency against the quoted forward rate.
pub(crate) fn convert_fx_forward(
    ctx: &ConversionContext<'_>,
    node: &FxForwardNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let forward_rate = ctx.quote()?;
    let (spot, scheduler) = fx_dates(ctx, &node.fx_forward_convention)?;
    let exchange_date = scheduler.advance(spot, node.maturity_tenor)?;
    Ok(InstrumentDefinition::FxForward(FxForwardDefinition {
        pay_currency: node.pay_currency,
        receive_currency: node.receive_currency,
        exchange_date,
        pay_amount: 1.0,
        receive_amount: -forward_rate,
    }))
}

/// The quote is forward points; the spot rate is read from its own
/// identifier. The near exchange reverses the far one.
pub(crate) fn convert_fx_swap(
    ctx: &ConversionContext<'_>,
    node: &FxSwapNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let forward_points = ctx.quote()?;
    let spot_rate = ctx.quote_for(&node.spot_rate_id)?;
    let (spot, scheduler) = fx_dates(ctx, &node.fx_swap_convention)?;
    let near_date = scheduler.advance(spot, node.start_tenor)?;
    let far_date = scheduler.advance(spot, node.maturity_tenor)?;

    Ok(InstrumentDefinition::FxSwap(FxSwapDefinition {
        near: FxForwardDefinition {
            pay_currency: node.pay_currency,
            receive_currency: node.receive_currency,
            exchange_date: near_date,
            pay_amount: -1.0,
            receive_amount: spot_rate,
        },
        far: FxForwardDefinition {
            pay_currency: node.pay_currency,
            receive_currency: node.receive_currency,
            exchange_date: far_date,
            pay_amount: 1.0,
            receive_amount: -(spot_rate + forward_points),
        },
        forward_points,
    }))
}
