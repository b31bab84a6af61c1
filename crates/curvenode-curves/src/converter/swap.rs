use curvenode_conventions::{RollDateSwapConvention, SwapConvention};
use curvenode_core::calendars::{BusinessDayConvention, Calendar};
use curvenode_traits::ConfigSourceExt;

use crate::context::ConversionContext;
use crate::date_set::DateSet;
use crate::error::{CurveNodeError, CurveNodeResult};
use crate::expiry::roll_date_adjuster;
use crate::instruments::{InstrumentDefinition, SwapDefinition, ThreeLegBasisSwapDefinition};
use crate::legs::{LegBuilder, LegRequest};
use crate::nodes::{CalendarSwapNode, RollDateSwapNode, SwapNode, ThreeLegBasisSwapNode};

/// When both legs float the quote is a spread on the receive leg.
pub(crate) fn convert_swap(
    ctx: &ConversionContext<'_>,
    node: &SwapNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let builder = LegBuilder::new(*ctx);
    let pay = builder.resolve(&node.pay_leg_convention)?;
    let receive = builder.resolve(&node.receive_leg_convention)?;
    let float_float = pay.is_floating() && receive.is_floating();

    let pay_leg =
        builder.build_resolved(&pay, node.start_tenor, node.maturity_tenor, LegRequest::pay())?;
    let receive_leg = builder.build_resolved(
        &receive,
        node.start_tenor,
        node.maturity_tenor,
        LegRequest::receive().with_spread(float_float),
    )?;
    Ok(InstrumentDefinition::Swap(SwapDefinition {
        pay_leg,
        receive_leg,
    }))
}

/// The quote always goes on the spread leg, which is received.
pub(crate) fn convert_three_leg_basis_swap(
    ctx: &ConversionContext<'_>,
    node: &ThreeLegBasisSwapNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let builder = LegBuilder::new(*ctx);
    let pay_leg = builder.build_leg(
        &node.pay_leg_convention,
        node.start_tenor,
        node.maturity_tenor,
        LegRequest::pay(),
    )?;
    let receive_leg = builder.build_leg(
        &node.receive_leg_convention,
        node.start_tenor,
        node.maturity_tenor,
        LegRequest::receive(),
    )?;
    let spread_leg = builder.build_leg(
        &node.spread_leg_convention,
        node.start_tenor,
        node.maturity_tenor,
        LegRequest::receive().with_spread(true),
    )?;
    Ok(InstrumentDefinition::ThreeLegBasisSwap(
        ThreeLegBasisSwapDefinition {
            pay_leg,
            receive_leg,
            spread_leg,
        },
    ))
}

pub(crate) fn convert_roll_date_swap(
    ctx: &ConversionContext<'_>,
    node: &RollDateSwapNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let convention: RollDateSwapConvention =
        ctx.conventions().resolve_as(&node.roll_date_swap_convention)?;
    let adjuster = roll_date_adjuster(&convention.roll_date_adjuster)?;
    let builder = LegBuilder::new(*ctx);
    let pay = builder.resolve(&convention.pay_leg_convention)?;
    let receive = builder.resolve(&convention.receive_leg_convention)?;
    let float_float = pay.is_floating() && receive.is_floating();

    let unadjusted_start = node.start_tenor.add_to(ctx.valuation, false)?;
    let (start_number, end_number) = (node.roll_date_start_number, node.roll_date_end_number);
    let pay_leg = builder.build_roll_date_leg(
        &pay,
        unadjusted_start,
        start_number,
        end_number,
        adjuster,
        LegRequest::pay(),
    )?;
    let receive_leg = builder.build_roll_date_leg(
        &receive,
        unadjusted_start,
        start_number,
        end_number,
        adjuster,
        LegRequest::receive().with_spread(float_float),
    )?;
    Ok(InstrumentDefinition::Swap(SwapDefinition {
        pay_leg,
        receive_leg,
    }))
}

/// Effective and maturity dates are picked from a configured date set,
/// counting from valuation plus the start tenor rolled to a business day.
pub(crate) fn convert_calendar_swap(
    ctx: &ConversionContext<'_>,
    node: &CalendarSwapNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let convention: SwapConvention = ctx.conventions().resolve_as(&node.swap_convention)?;
    let date_set: DateSet = ctx
        .sources
        .config
        .get_latest_by_name(&node.date_set_name)?;
    let builder = LegBuilder::new(*ctx);
    let pay = builder.resolve(&convention.pay_leg_convention)?;
    let receive = builder.resolve(&convention.receive_leg_convention)?;
    let float_float = pay.is_floating() && receive.is_floating();

    let adjusted_start = pay.scheduler().calendar().adjust(
        node.start_tenor.add_to(ctx.valuation, false)?,
        BusinessDayConvention::Following,
    );
    let nth = |n: u32| {
        date_set.nth_after(adjusted_start, n).ok_or_else(|| {
            CurveNodeError::invalid_input(format!(
                "could not get date number {n} in date set {}",
                date_set.name
            ))
        })
    };
    let effective = nth(node.start_date_number)?;
    let maturity = nth(node.end_date_number)?;

    let pay_leg = builder.build_resolved_between(&pay, effective, maturity, LegRequest::pay())?;
    let receive_leg = builder.build_resolved_between(
        &receive,
        effective,
        maturity,
        LegRequest::receive().with_spread(float_float),
    )?;
    Ok(InstrumentDefinition::Swap(SwapDefinition {
        pay_leg,
        receive_leg,
    }))
}
