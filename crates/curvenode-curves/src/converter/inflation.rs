use curvenode_conventions::{InflationLegConvention, PriceIndexConvention, SwapFixedLegConvention};
use curvenode_core::Date;
use curvenode_traits::market_data::MARKET_VALUE;

use crate::context::ConversionContext;
use crate::dates::DateScheduler;
use crate::error::{CurveNodeError, CurveNodeResult};
use crate::index::PriceIndex;
use crate::instruments::{InstrumentDefinition, ZeroCouponInflationSwapDefinition};
use crate::nodes::{InflationNodeType, ZeroCouponInflationNode};

/// Settlement is the fixed leg's spot on the price index region calendar;
/// payment is settlement plus the tenor. The start index value is read from
/// the price index history `month_lag` months before settlement.
pub(crate) fn convert_zero_coupon_inflation(
    ctx: &ConversionContext<'_>,
    node: &ZeroCouponInflationNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let fixed_rate = ctx.quote()?;
    let fixed_leg: SwapFixedLegConvention =
        ctx.conventions().resolve_as(&node.fixed_leg_convention)?;
    let inflation_leg: InflationLegConvention =
        ctx.conventions().resolve_as(&node.inflation_leg_convention)?;
    let price_index: PriceIndexConvention =
        ctx.conventions().resolve_as(&inflation_leg.price_index_convention)?;

    let months = node.tenor.total_months()?;
    if months <= 0 || months % 12 != 0 {
        return Err(CurveNodeError::invalid_input(format!(
            "zero-coupon inflation tenor {} is not a whole number of years",
            node.tenor
        )));
    }

    let scheduler = DateScheduler::new(
        ctx.calendar(&price_index.region)?,
        fixed_leg.business_day_convention,
        fixed_leg.is_eom,
        fixed_leg.settlement_days,
    );
    let settlement_date = scheduler.spot_date(ctx.valuation);
    let payment_date = scheduler.advance(settlement_date, node.tenor)?;

    let lag = -(inflation_leg.month_lag as i32);
    let reference_start_month = first_of_month(settlement_date.add_months(lag)?)?;
    let reference_end_month = first_of_month(payment_date.add_months(lag)?)?;

    let series = ctx
        .sources
        .time_series
        .get_time_series(MARKET_VALUE, &price_index.price_index_id)?;
    let start_value = |month: Date| {
        series
            .value_in_month(month.year(), month.month())
            .ok_or_else(|| {
                CurveNodeError::missing_market_data(format!(
                    "{} {}-{:02}",
                    price_index.price_index_id,
                    month.year(),
                    month.month()
                ))
            })
    };
    let reference_start_value = match node.inflation_node_type {
        InflationNodeType::Monthly => start_value(reference_start_month)?,
        InflationNodeType::Interpolated => {
            interpolated_value(settlement_date, reference_start_month, &start_value)?
        }
    };

    Ok(InstrumentDefinition::ZeroCouponInflationSwap(
        ZeroCouponInflationSwapDefinition {
            currency: price_index.currency,
            settlement_date,
            payment_date,
            notional: 1.0,
            fixed_rate,
            compounding_periods: (months / 12) as u32,
            inflation_notional: -1.0,
            index: PriceIndex::from(&price_index),
            month_lag: inflation_leg.month_lag,
            spot_lag: inflation_leg.spot_lag,
            interpolation: node.inflation_node_type,
            reference_start_month,
            reference_end_month,
            reference_start_value,
        },
    ))
}

fn first_of_month(date: Date) -> CurveNodeResult<Date> {
    Ok(Date::from_ymd(date.year(), date.month(), 1)?)
}

/// Linear in the day of the settlement month between the reference month
/// and the month after it.
fn interpolated_value<F>(
    settlement_date: Date,
    reference_month: Date,
    value_in: &F,
) -> CurveNodeResult<f64>
where
    F: Fn(Date) -> CurveNodeResult<f64>,
{
    let first = value_in(reference_month)?;
    let second = value_in(reference_month.add_months(1)?)?;
    let weight = f64::from(settlement_date.day() - 1) / f64::from(settlement_date.days_in_month());
    Ok(first + weight * (second - first))
}
