use curvenode_conventions::BondConvention;
use curvenode_core::calendars::Calendar;
use curvenode_core::{Date, StubType};
use curvenode_traits::{BondSecurity, Security};

use crate::context::ConversionContext;
use crate::error::{CurveNodeError, CurveNodeResult};
use crate::instruments::{BillDefinition, BondDefinition, Coupon, InstrumentDefinition};
use crate::nodes::{BillNode, BondNode};
use crate::schedule::ScheduleRule;

// Bounds the walk back from maturity to the coupon date before settlement.
const MAX_COUPON_PERIODS: i32 = 2400;

/// The node's market data identifier names the bond security; the quote is
/// its yield.
pub(crate) fn convert_bond(
    ctx: &ConversionContext<'_>,
    _node: &BondNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let yield_quote = ctx.quote()?;
    let bond = match ctx.sources.securities.get_security(&ctx.data_id.to_bundle())? {
        Security::Bond(bond) => bond,
        other => {
            return Err(CurveNodeError::type_mismatch(
                ctx.data_id,
                "Bond",
                other.type_name(),
            ))
        }
    };
    let convention: BondConvention = ctx.conventions().resolve_as(ctx.data_id)?;
    let issuer = ctx.sources.legal_entities.get_legal_entity(&bond.issuer)?;
    let calendar = ctx.calendar(&bond.region)?;
    let settlement_date = calendar.settlement_date(ctx.valuation, convention.settlement_days);
    if bond.maturity <= settlement_date {
        return Err(CurveNodeError::invalid_input(format!(
            "bond {} matures on {} before settlement on {settlement_date}",
            ctx.data_id, bond.maturity
        )));
    }

    let coupons = if bond.is_zero_coupon() {
        vec![Coupon::Fixed {
            accrual_start: settlement_date,
            accrual_end: bond.maturity,
            payment_date: bond.maturity,
            accrual_factor: bond.day_count.accrual_factor(settlement_date, bond.maturity),
            rate: 0.0,
        }]
    } else {
        coupon_schedule(&bond, &convention, calendar.as_ref(), settlement_date)?
    };

    Ok(InstrumentDefinition::Bond(BondDefinition {
        id: ctx.data_id.clone(),
        currency: bond.currency,
        issuer: issuer.name,
        ratings: issuer.ratings,
        sector: issuer.sector,
        settlement_date,
        maturity_date: bond.maturity,
        coupon_rate: if bond.is_zero_coupon() { 0.0 } else { bond.coupon_rate },
        coupons,
        ex_dividend_days: convention.ex_dividend_days,
        yield_quote,
    }))
}

/// Coupons from the last coupon date on or before settlement to maturity.
fn coupon_schedule(
    bond: &BondSecurity,
    convention: &BondConvention,
    calendar: &dyn Calendar,
    settlement_date: Date,
) -> CurveNodeResult<Vec<Coupon>> {
    let frequency = bond.coupon_frequency;
    let mut first = None;
    for k in 1..=MAX_COUPON_PERIODS {
        let candidate = frequency.times(-k)?.add_to(bond.maturity, convention.is_eom)?;
        if candidate <= settlement_date {
            first = Some(candidate);
            break;
        }
    }
    let first = first.ok_or_else(|| {
        CurveNodeError::invalid_input(format!(
            "no coupon date of frequency {frequency} before settlement on {settlement_date}"
        ))
    })?;

    let stub = if convention.schedule_from_maturity {
        StubType::ShortStart
    } else {
        StubType::ShortEnd
    };
    let rule = ScheduleRule {
        tenor: frequency,
        stub,
        is_eom: convention.is_eom,
        calendar,
        business_day_convention: convention.business_day_convention,
        payment_lag: 0,
    };
    Ok(rule
        .periods(first, bond.maturity)?
        .into_iter()
        .map(|p| Coupon::Fixed {
            accrual_start: p.accrual_start,
            accrual_end: p.accrual_end,
            payment_date: p.payment_date,
            accrual_factor: bond.day_count.accrual_factor(p.accrual_start, p.accrual_end),
            rate: bond.coupon_rate,
        })
        .collect())
}

pub(crate) fn convert_bill(
    ctx: &ConversionContext<'_>,
    _node: &BillNode,
) -> CurveNodeResult<InstrumentDefinition> {
    let yield_quote = ctx.quote()?;
    let bill = match ctx.sources.securities.get_security(&ctx.data_id.to_bundle())? {
        Security::Bill(bill) => bill,
        other => {
            return Err(CurveNodeError::type_mismatch(
                ctx.data_id,
                "Bill",
                other.type_name(),
            ))
        }
    };
    let issuer = ctx.sources.legal_entities.get_legal_entity(&bill.issuer)?;
    let calendar = ctx.calendar(&bill.region)?;
    let settlement_date = calendar.settlement_date(ctx.valuation, bill.settlement_days);
    if bill.maturity <= settlement_date {
        return Err(CurveNodeError::invalid_input(format!(
            "bill {} matures on {} before settlement on {settlement_date}",
            ctx.data_id, bill.maturity
        )));
    }

    Ok(InstrumentDefinition::Bill(BillDefinition {
        id: ctx.data_id.clone(),
        currency: bill.currency,
        issuer: issuer.name,
        ratings: issuer.ratings,
        settlement_date,
        maturity_date: bill.maturity,
        accrual_factor: bill.day_count.accrual_factor(settlement_date, bill.maturity),
        yield_quote,
    }))
}
