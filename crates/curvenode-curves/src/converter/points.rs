use curvenode_core::daycounts::DayCountConvention;
use curvenode_core::Tenor;

use crate::context::ConversionContext;
use crate::error::CurveNodeResult;
use crate::instruments::{CurvePointDefinition, CurvePointKind, InstrumentDefinition};
use crate::nodes::{PeriodicallyCompoundedRateNode, PointNode};

pub(crate) fn convert_point(
    ctx: &ConversionContext<'_>,
    node: &PointNode,
    kind: CurvePointKind,
) -> CurveNodeResult<InstrumentDefinition> {
    curve_point(ctx, node.tenor, kind)
}

pub(crate) fn convert_periodically_compounded_rate(
    ctx: &ConversionContext<'_>,
    node: &PeriodicallyCompoundedRateNode,
) -> CurveNodeResult<InstrumentDefinition> {
    curve_point(
        ctx,
        node.tenor,
        CurvePointKind::PeriodicallyCompoundedRate {
            compounding_periods: node.compounding_periods,
        },
    )
}

/// Unadjusted date at the tenor from valuation, with ACT/365F time.
fn curve_point(
    ctx: &ConversionContext<'_>,
    tenor: Tenor,
    kind: CurvePointKind,
) -> CurveNodeResult<InstrumentDefinition> {
    let value = ctx.quote()?;
    let date = tenor.add_to(ctx.valuation, false)?;
    Ok(InstrumentDefinition::CurvePoint(CurvePointDefinition {
        kind,
        date,
        time: DayCountConvention::Act365Fixed.accrual_factor(ctx.valuation, date),
        value,
    }))
}
