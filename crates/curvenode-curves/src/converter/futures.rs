use curvenode_conventions::{
    DeliverablePriceQuotedSwapFutureConvention, IborIndexConvention, InterestRateFutureConvention,
    SwapConvention,
};

use crate::context::ConversionContext;
use crate::dates::DateScheduler;
use crate::error::CurveNodeResult;
use crate::expiry::expiry_calculator;
use crate::index::IborIndex;
use crate::instruments::{
    InstrumentDefinition, InterestRateFutureDefinition, Leg, SwapDefinition, SwapFutureDefinition,
};
use crate::legs::{LegBuilder, LegRequest, ResolvedLeg};
use crate::nodes::{DeliverableSwapFutureNode, RateFutureNode};

/// The fixing period starts at the index spot after the last trade date and
/// runs for the underlying tenor.
pub(crate) fn convert_rate_future(
    ctx: &ConversionContext<'_>,
    node: &RateFutureNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let price = ctx.quote()?;
    let future_convention: InterestRateFutureConvention =
        ctx.conventions().resolve_as(&node.future_convention)?;
    let index_convention: IborIndexConvention =
        ctx.conventions().resolve_as(&node.underlying_convention)?;
    let calculator = expiry_calculator(&future_convention.expiry_convention)?;

    let scheduler = DateScheduler::new(
        ctx.calendar(&index_convention.region_calendar)?,
        index_convention.business_day_convention,
        index_convention.is_eom,
        index_convention.settlement_days,
    );
    let from = node.start_tenor.add_to(ctx.valuation, false)?;
    let last_trade_date =
        calculator.expiry_date(node.future_number, from, scheduler.calendar().as_ref())?;
    let fixing_period_start = scheduler.spot_date(last_trade_date);
    let fixing_period_end = scheduler.advance(fixing_period_start, node.underlying_tenor)?;

    Ok(InstrumentDefinition::InterestRateFuture(
        InterestRateFutureDefinition {
            currency: index_convention.currency,
            last_trade_date,
            fixing_period_start,
            fixing_period_end,
            fixing_accrual_factor: index_convention
                .day_count
                .accrual_factor(fixing_period_start, fixing_period_end),
            payment_accrual_factor: f64::from(node.underlying_tenor.total_months()?) / 12.0,
            index: IborIndex::from_convention(&index_convention, node.underlying_tenor),
            notional: 1.0,
            price,
        },
    ))
}

/// The underlying swap starts on the delivery date, the spot date of the
/// last trade date on the fixed leg's calendar. Fixed legs carry the
/// contract coupon and floating legs carry no spread.
pub(crate) fn convert_swap_future(
    ctx: &ConversionContext<'_>,
    node: &DeliverableSwapFutureNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let price = ctx.quote()?;
    let future_convention: DeliverablePriceQuotedSwapFutureConvention =
        ctx.conventions().resolve_as(&node.future_convention)?;
    let swap_convention: SwapConvention =
        ctx.conventions().resolve_as(&future_convention.swap_convention)?;
    let calculator = expiry_calculator(&future_convention.expiry_convention)?;

    let builder = LegBuilder::new(*ctx);
    let pay = builder.resolve(&swap_convention.pay_leg_convention)?;
    let receive = builder.resolve(&swap_convention.receive_leg_convention)?;
    let anchor_leg = if pay.is_floating() { &receive } else { &pay };
    let scheduler = anchor_leg.scheduler();

    let from = node.start_tenor.add_to(ctx.valuation, false)?;
    let last_trade_date =
        calculator.expiry_date(node.future_number, from, scheduler.calendar().as_ref())?;
    let delivery_date = scheduler.spot_date(last_trade_date);

    let coupon = future_convention.coupon;
    let underlying_leg = |leg: &ResolvedLeg, request: LegRequest| -> CurveNodeResult<Leg> {
        let end = leg.scheduler().end_date(delivery_date, node.underlying_tenor)?;
        let periods = leg.periods_for_tenor(delivery_date, node.underlying_tenor, end)?;
        leg.build(delivery_date, end, &periods, request.with_fixed_rate(coupon), ctx)
    };
    let underlying = SwapDefinition {
        pay_leg: underlying_leg(&pay, LegRequest::pay())?,
        receive_leg: underlying_leg(&receive, LegRequest::receive())?,
    };

    Ok(InstrumentDefinition::SwapFuture(SwapFutureDefinition {
        currency: anchor_leg.currency(),
        last_trade_date,
        delivery_date,
        underlying,
        notional: future_convention.notional,
        price,
    }))
}
