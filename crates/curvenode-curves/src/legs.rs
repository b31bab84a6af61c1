//! Swap leg assembly.
//!
//! A leg convention is first resolved into a [`ResolvedLeg`]: the index,
//! calendar and scheduling rules it implies. The resolved leg then turns a
//! start/end interval into dated coupons.
//!
//! The node's quote is used as follows:
//! - fixed legs always take it as the fixed rate;
//! - Ibor and compounded Ibor legs take it as a spread only when a spread
//!   is requested and the leg is received;
//! - overnight legs take it as a spread whenever a spread is requested.

use std::sync::Arc;

use tracing::debug;

use curvenode_conventions::{
    CompoundingType, Convention, IborIndexConvention, OvernightIndexConvention,
};
use curvenode_core::calendars::{BusinessDayConvention, Calendar};
use curvenode_core::daycounts::DayCountConvention;
use curvenode_core::{Currency, Date, StubType, Tenor};
use curvenode_traits::ExternalId;

use crate::context::ConversionContext;
use crate::dates::{DateScheduler, ScheduledDates};
use crate::error::{CurveNodeError, CurveNodeResult};
use crate::expiry::RollDateAdjuster;
use crate::index::{IborIndex, OvernightIndex};
use crate::instruments::{CompoundingSubPeriod, Coupon, Leg};
use crate::schedule::{SchedulePeriod, ScheduleRule};

/// How the node's quote applies to one leg.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LegRequest {
    /// True if the leg is paid
    pub is_payer: bool,
    /// True if the quote is a spread on floating legs
    pub spread_requested: bool,
    /// Fixed rate to use instead of the quote
    pub fixed_rate: Option<f64>,
}

impl LegRequest {
    /// A paid leg.
    pub fn pay() -> Self {
        Self {
            is_payer: true,
            ..Self::default()
        }
    }

    /// A received leg.
    pub fn receive() -> Self {
        Self::default()
    }

    /// Requests the quote as a spread.
    #[must_use]
    pub fn with_spread(mut self, requested: bool) -> Self {
        self.spread_requested = requested;
        self
    }

    /// Fixes the rate of a fixed leg.
    #[must_use]
    pub fn with_fixed_rate(mut self, rate: f64) -> Self {
        self.fixed_rate = Some(rate);
        self
    }
}

enum LegTemplate {
    Fixed {
        day_count: DayCountConvention,
        payment_tenor: Tenor,
    },
    Ibor {
        index: IborIndex,
        fixing_calendar: Arc<dyn Calendar>,
        reset_tenor: Tenor,
        is_advance_fixing: bool,
    },
    CompoundingIbor {
        index: IborIndex,
        fixing_calendar: Arc<dyn Calendar>,
        payment_tenor: Tenor,
        composition_tenor: Tenor,
        compounding: CompoundingType,
        stub_compound: StubType,
    },
    Overnight {
        index: OvernightIndex,
        payment_tenor: Tenor,
        arithmetic_average: bool,
    },
}

/// A leg convention with its index and calendar resolved.
pub struct ResolvedLeg {
    name: String,
    currency: Currency,
    scheduler: DateScheduler,
    stub: StubType,
    payment_lag: i32,
    template: LegTemplate,
}

impl ResolvedLeg {
    /// Convention name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Leg currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// True for floating legs.
    pub fn is_floating(&self) -> bool {
        !matches!(self.template, LegTemplate::Fixed { .. })
    }

    /// Scheduler for the leg's own spot lag and adjustment rules.
    pub fn scheduler(&self) -> &DateScheduler {
        &self.scheduler
    }

    /// Spot, start and end dates from tenors.
    pub fn dates(
        &self,
        valuation: Date,
        start_tenor: Tenor,
        maturity_tenor: Tenor,
    ) -> CurveNodeResult<ScheduledDates> {
        self.scheduler.dates(valuation, start_tenor, maturity_tenor)
    }

    fn period_tenor(&self) -> Tenor {
        match &self.template {
            LegTemplate::Fixed { payment_tenor, .. }
            | LegTemplate::CompoundingIbor { payment_tenor, .. }
            | LegTemplate::Overnight { payment_tenor, .. } => *payment_tenor,
            LegTemplate::Ibor { reset_tenor, .. } => *reset_tenor,
        }
    }

    fn rule(&self, tenor: Tenor, stub: StubType, payment_lag: i32) -> ScheduleRule<'_> {
        ScheduleRule {
            tenor,
            stub,
            is_eom: self.scheduler.is_eom(),
            calendar: self.scheduler.calendar().as_ref(),
            business_day_convention: self.scheduler.business_day_convention(),
            payment_lag,
        }
    }

    /// Regular schedule between adjusted `start` and `end`.
    pub fn periods(&self, start: Date, end: Date) -> CurveNodeResult<Vec<SchedulePeriod>> {
        self.rule(self.period_tenor(), self.stub, self.payment_lag)
            .periods(start, end)
    }

    /// Schedule of a leg running `maturity_tenor` from `start`, rolled from
    /// the unadjusted maturity so that a weekend maturity leaves no stub.
    pub fn periods_for_tenor(
        &self,
        start: Date,
        maturity_tenor: Tenor,
        end: Date,
    ) -> CurveNodeResult<Vec<SchedulePeriod>> {
        let unadjusted_end = maturity_tenor.add_to(start, self.scheduler.is_eom())?;
        self.rule(self.period_tenor(), self.stub, self.payment_lag)
            .periods_rolled_from(start, unadjusted_end, end)
    }

    /// Builds the leg over explicit periods.
    pub fn build(
        &self,
        start: Date,
        end: Date,
        periods: &[SchedulePeriod],
        request: LegRequest,
        ctx: &ConversionContext<'_>,
    ) -> CurveNodeResult<Leg> {
        let coupons = match &self.template {
            LegTemplate::Fixed { day_count, .. } => {
                let rate = match request.fixed_rate {
                    Some(rate) => rate,
                    None => ctx.quote()?,
                };
                periods
                    .iter()
                    .map(|p| Coupon::Fixed {
                        accrual_start: p.accrual_start,
                        accrual_end: p.accrual_end,
                        payment_date: p.payment_date,
                        accrual_factor: day_count.accrual_factor(p.accrual_start, p.accrual_end),
                        rate,
                    })
                    .collect()
            }
            LegTemplate::Ibor {
                index,
                fixing_calendar,
                is_advance_fixing,
                ..
            } => {
                let spread = ibor_spread(request, ctx)?;
                periods
                    .iter()
                    .map(|p| {
                        let fixing_anchor = if *is_advance_fixing {
                            p.accrual_start
                        } else {
                            p.accrual_end
                        };
                        let fixing_period_start = fixing_anchor;
                        let fixing_period_end = self.index_end(index, fixing_period_start)?;
                        Ok(Coupon::Ibor {
                            accrual_start: p.accrual_start,
                            accrual_end: p.accrual_end,
                            payment_date: p.payment_date,
                            accrual_factor: index
                                .day_count
                                .accrual_factor(p.accrual_start, p.accrual_end),
                            fixing_date: fixing_calendar
                                .add_business_days(fixing_anchor, -(index.spot_lag as i32)),
                            fixing_period_start,
                            fixing_period_end,
                            fixing_accrual_factor: index
                                .day_count
                                .accrual_factor(fixing_period_start, fixing_period_end),
                            index: index.clone(),
                            spread,
                        })
                    })
                    .collect::<CurveNodeResult<Vec<_>>>()?
            }
            LegTemplate::CompoundingIbor {
                index,
                fixing_calendar,
                composition_tenor,
                compounding,
                stub_compound,
                ..
            } => {
                let spread = ibor_spread(request, ctx)?;
                let sub_rule = self.rule(*composition_tenor, *stub_compound, 0);
                periods
                    .iter()
                    .map(|p| {
                        let sub_periods = sub_rule
                            .periods_rolled_from(p.accrual_start, p.unadjusted_end, p.accrual_end)?
                            .into_iter()
                            .map(|s| CompoundingSubPeriod {
                                accrual_start: s.accrual_start,
                                accrual_end: s.accrual_end,
                                accrual_factor: index
                                    .day_count
                                    .accrual_factor(s.accrual_start, s.accrual_end),
                                fixing_date: fixing_calendar
                                    .add_business_days(s.accrual_start, -(index.spot_lag as i32)),
                            })
                            .collect();
                        Ok(Coupon::IborCompounding {
                            accrual_start: p.accrual_start,
                            accrual_end: p.accrual_end,
                            payment_date: p.payment_date,
                            accrual_factor: index
                                .day_count
                                .accrual_factor(p.accrual_start, p.accrual_end),
                            index: index.clone(),
                            sub_periods,
                            compounding: *compounding,
                            spread,
                        })
                    })
                    .collect::<CurveNodeResult<Vec<_>>>()?
            }
            LegTemplate::Overnight {
                index,
                arithmetic_average,
                ..
            } => {
                let spread = if request.spread_requested {
                    ctx.quote()?
                } else {
                    0.0
                };
                periods
                    .iter()
                    .map(|p| {
                        let accrual_factor =
                            index.day_count.accrual_factor(p.accrual_start, p.accrual_end);
                        if *arithmetic_average {
                            Coupon::OvernightArithmeticAverage {
                                accrual_start: p.accrual_start,
                                accrual_end: p.accrual_end,
                                payment_date: p.payment_date,
                                accrual_factor,
                                index: index.clone(),
                                spread,
                            }
                        } else {
                            Coupon::Overnight {
                                accrual_start: p.accrual_start,
                                accrual_end: p.accrual_end,
                                payment_date: p.payment_date,
                                accrual_factor,
                                index: index.clone(),
                                publication_lag: index.publication_lag,
                                spread,
                            }
                        }
                    })
                    .collect()
            }
        };

        Ok(Leg {
            currency: self.currency,
            is_payer: request.is_payer,
            notional: 1.0,
            start_date: start,
            end_date: end,
            coupons,
        })
    }

    fn index_end(&self, index: &IborIndex, fixing_start: Date) -> CurveNodeResult<Date> {
        let unadjusted = index.tenor.add_to(fixing_start, index.is_eom)?;
        Ok(self
            .scheduler
            .calendar()
            .adjust(unadjusted, index.business_day_convention))
    }
}

fn ibor_spread(request: LegRequest, ctx: &ConversionContext<'_>) -> CurveNodeResult<f64> {
    if request.spread_requested && !request.is_payer {
        ctx.quote()
    } else {
        Ok(0.0)
    }
}

/// Resolves leg conventions and builds legs for one node conversion.
#[derive(Clone, Copy)]
pub struct LegBuilder<'a> {
    ctx: ConversionContext<'a>,
}

impl<'a> LegBuilder<'a> {
    /// Creates a builder over a conversion context.
    pub fn new(ctx: ConversionContext<'a>) -> Self {
        Self { ctx }
    }

    /// Resolves a leg convention reference.
    pub fn resolve(&self, reference: &ExternalId) -> CurveNodeResult<ResolvedLeg> {
        let convention = self.ctx.conventions().resolve_any(reference)?;
        debug!(reference = %reference, kind = %convention.kind(), "resolved leg convention");
        let name = convention.name().to_string();
        match convention {
            Convention::SwapFixedLeg(c) => Ok(ResolvedLeg {
                name,
                currency: c.currency,
                scheduler: DateScheduler::new(
                    self.ctx.calendar(&c.region_calendar)?,
                    c.business_day_convention,
                    c.is_eom,
                    c.settlement_days,
                ),
                stub: c.stub_type,
                payment_lag: c.payment_lag,
                template: LegTemplate::Fixed {
                    day_count: c.day_count,
                    payment_tenor: c.payment_tenor,
                },
            }),
            Convention::VanillaIborLeg(c) => {
                let index_convention = self.ibor_index(&c.ibor_index_convention)?;
                let calendar = self.ctx.calendar(&index_convention.region_calendar)?;
                Ok(ResolvedLeg {
                    name,
                    currency: index_convention.currency,
                    scheduler: DateScheduler::new(
                        calendar,
                        index_convention.business_day_convention,
                        c.is_eom,
                        c.settlement_days,
                    ),
                    stub: c.stub_type,
                    payment_lag: c.payment_lag,
                    template: LegTemplate::Ibor {
                        fixing_calendar: self.ctx.calendar(&index_convention.fixing_calendar)?,
                        index: IborIndex::from_convention(&index_convention, c.reset_tenor),
                        reset_tenor: c.reset_tenor,
                        is_advance_fixing: c.is_advance_fixing,
                    },
                })
            }
            Convention::CompoundingIborLeg(c) => {
                let index_convention = self.ibor_index(&c.ibor_index_convention)?;
                let calendar = self.ctx.calendar(&index_convention.region_calendar)?;
                Ok(ResolvedLeg {
                    name,
                    currency: index_convention.currency,
                    scheduler: DateScheduler::new(
                        calendar,
                        index_convention.business_day_convention,
                        c.is_eom,
                        c.settlement_days,
                    ),
                    stub: c.stub_type_leg,
                    payment_lag: c.payment_lag,
                    template: LegTemplate::CompoundingIbor {
                        fixing_calendar: self.ctx.calendar(&index_convention.fixing_calendar)?,
                        index: IborIndex::from_convention(&index_convention, c.composition_tenor),
                        payment_tenor: c.payment_tenor,
                        composition_tenor: c.composition_tenor,
                        compounding: c.compounding_type,
                        stub_compound: c.stub_type_compound,
                    },
                })
            }
            Convention::OisLeg(c) => self.overnight_leg(
                name,
                &c.overnight_index_convention,
                c.business_day_convention,
                c.is_eom,
                c.settlement_days,
                (c.payment_tenor, c.stub_type, c.payment_lag),
                false,
            ),
            Convention::OnArithmeticAverageLeg(c) => self.overnight_leg(
                name,
                &c.overnight_index_convention,
                c.business_day_convention,
                c.is_eom,
                c.settlement_days,
                (c.payment_tenor, c.stub_type, c.payment_lag),
                true,
            ),
            Convention::FixedLegRollDate(c) => Ok(ResolvedLeg {
                name,
                currency: c.currency,
                scheduler: DateScheduler::new(
                    self.ctx.calendar(&c.region_calendar)?,
                    BusinessDayConvention::ModifiedFollowing,
                    false,
                    0,
                ),
                stub: c.stub_type,
                payment_lag: c.payment_lag,
                template: LegTemplate::Fixed {
                    day_count: c.day_count,
                    payment_tenor: c.payment_tenor,
                },
            }),
            Convention::VanillaIborLegRollDate(c) => {
                let index_convention = self.ibor_index(&c.ibor_index_convention)?;
                Ok(ResolvedLeg {
                    name,
                    currency: index_convention.currency,
                    scheduler: DateScheduler::new(
                        self.ctx.calendar(&index_convention.region_calendar)?,
                        index_convention.business_day_convention,
                        false,
                        0,
                    ),
                    stub: c.stub_type,
                    payment_lag: c.payment_lag,
                    template: LegTemplate::Ibor {
                        fixing_calendar: self.ctx.calendar(&index_convention.fixing_calendar)?,
                        index: IborIndex::from_convention(&index_convention, c.reset_tenor),
                        reset_tenor: c.reset_tenor,
                        is_advance_fixing: c.is_advance_fixing,
                    },
                })
            }
            Convention::OnCompoundedLegRollDate(c) => self.overnight_leg(
                name,
                &c.overnight_index_convention,
                BusinessDayConvention::ModifiedFollowing,
                false,
                0,
                (c.payment_tenor, c.stub_type, c.payment_lag),
                false,
            ),
            other => Err(CurveNodeError::type_mismatch(
                reference,
                "swap leg convention",
                other.kind().to_string(),
            )),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn overnight_leg(
        &self,
        name: String,
        index_reference: &ExternalId,
        business_day_convention: BusinessDayConvention,
        is_eom: bool,
        settlement_days: u32,
        (payment_tenor, stub, payment_lag): (Tenor, StubType, i32),
        arithmetic_average: bool,
    ) -> CurveNodeResult<ResolvedLeg> {
        let index_convention: OvernightIndexConvention =
            self.ctx.conventions().resolve_as(index_reference)?;
        Ok(ResolvedLeg {
            name,
            currency: index_convention.currency,
            scheduler: DateScheduler::new(
                self.ctx.calendar(&index_convention.region_calendar)?,
                business_day_convention,
                is_eom,
                settlement_days,
            ),
            stub,
            payment_lag,
            template: LegTemplate::Overnight {
                index: OvernightIndex::from(&index_convention),
                payment_tenor,
                arithmetic_average,
            },
        })
    }

    fn ibor_index(&self, reference: &ExternalId) -> CurveNodeResult<IborIndexConvention> {
        Ok(self.ctx.conventions().resolve_as(reference)?)
    }

    /// Builds a leg from tenors, using the leg's own spot lag.
    pub fn build_leg(
        &self,
        reference: &ExternalId,
        start_tenor: Tenor,
        maturity_tenor: Tenor,
        request: LegRequest,
    ) -> CurveNodeResult<Leg> {
        let resolved = self.resolve(reference)?;
        self.build_resolved(&resolved, start_tenor, maturity_tenor, request)
    }

    /// Builds an already resolved leg from tenors.
    pub fn build_resolved(
        &self,
        resolved: &ResolvedLeg,
        start_tenor: Tenor,
        maturity_tenor: Tenor,
        request: LegRequest,
    ) -> CurveNodeResult<Leg> {
        let dates = resolved.dates(self.ctx.valuation, start_tenor, maturity_tenor)?;
        let periods = resolved.periods_for_tenor(dates.start, maturity_tenor, dates.end)?;
        resolved.build(dates.start, dates.end, &periods, request, &self.ctx)
    }

    /// Builds an already resolved leg between explicit dates.
    pub fn build_resolved_between(
        &self,
        resolved: &ResolvedLeg,
        start: Date,
        end: Date,
        request: LegRequest,
    ) -> CurveNodeResult<Leg> {
        let periods = resolved.periods(start, end)?;
        resolved.build(start, end, &periods, request, &self.ctx)
    }

    /// Builds a leg whose period boundaries are roll dates.
    ///
    /// The unadjusted start is rolled to a business day (following) and the
    /// leg runs from the `start_number`th to the `end_number`th roll date
    /// after it, with one period per payment tenor.
    pub fn build_roll_date_leg(
        &self,
        resolved: &ResolvedLeg,
        unadjusted_start: Date,
        start_number: u32,
        end_number: u32,
        adjuster: &dyn RollDateAdjuster,
        request: LegRequest,
    ) -> CurveNodeResult<Leg> {
        if end_number <= start_number {
            return Err(CurveNodeError::invalid_input(format!(
                "roll date end number {end_number} must exceed start number {start_number}"
            )));
        }
        let calendar = resolved.scheduler.calendar();
        let anchor = calendar.adjust(unadjusted_start, BusinessDayConvention::Following);
        let step = u32::try_from(resolved.period_tenor().total_months()?)
            .unwrap_or(0)
            .checked_div(adjuster.months_to_adjust())
            .unwrap_or(1)
            .max(1);

        let mut numbers: Vec<u32> = (start_number..end_number).step_by(step as usize).collect();
        numbers.push(end_number);
        let rolls = numbers
            .into_iter()
            .map(|n| adjuster.next_roll(anchor, n))
            .collect::<CurveNodeResult<Vec<Date>>>()?;
        let boundaries: Vec<Date> = rolls.iter().map(|d| resolved.scheduler.adjust(*d)).collect();

        let periods: Vec<SchedulePeriod> = boundaries
            .windows(2)
            .zip(rolls.iter().skip(1))
            .map(|(w, roll)| SchedulePeriod {
                accrual_start: w[0],
                accrual_end: w[1],
                unadjusted_end: *roll,
                payment_date: calendar.add_business_days(w[1], resolved.payment_lag),
            })
            .collect();
        let (start, end) = match (boundaries.first(), boundaries.last()) {
            (Some(start), Some(end)) => (*start, *end),
            _ => return Err(CurveNodeError::invalid_input("empty roll date schedule")),
        };
        resolved.build(start, end, &periods, request, &self.ctx)
    }
}
