//! Instrument definitions produced by node conversion.
//!
//! Definitions are dated, rate-populated skeletons with unit notional. They
//! are built fresh for every (node, valuation date, snapshot) and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

use curvenode_conventions::CompoundingType;
use curvenode_core::{Currency, Date};
use curvenode_traits::{CreditRatingEntry, ExternalId};

use crate::index::{IborIndex, OvernightIndex, PriceIndex};
use crate::nodes::{CurveNodeKind, InflationNodeType};

// =============================================================================
// LEGS AND COUPONS
// =============================================================================

/// One compounding sub-period of an Ibor coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundingSubPeriod {
    /// Sub-period start
    pub accrual_start: Date,
    /// Sub-period end
    pub accrual_end: Date,
    /// Index day count fraction of the sub-period
    pub accrual_factor: f64,
    /// Fixing date
    pub fixing_date: Date,
}

/// A coupon of a swap leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Coupon {
    /// Fixed rate coupon.
    Fixed {
        /// Accrual start
        accrual_start: Date,
        /// Accrual end
        accrual_end: Date,
        /// Payment date
        payment_date: Date,
        /// Year fraction
        accrual_factor: f64,
        /// Fixed rate
        rate: f64,
    },
    /// Single Ibor fixing.
    Ibor {
        /// Accrual start
        accrual_start: Date,
        /// Accrual end
        accrual_end: Date,
        /// Payment date
        payment_date: Date,
        /// Year fraction
        accrual_factor: f64,
        /// Fixing date
        fixing_date: Date,
        /// Fixing period start
        fixing_period_start: Date,
        /// Fixing period end
        fixing_period_end: Date,
        /// Fixing period year fraction
        fixing_accrual_factor: f64,
        /// Index
        index: IborIndex,
        /// Additive spread
        spread: f64,
    },
    /// Several Ibor fixings compounded over the payment period.
    IborCompounding {
        /// Accrual start
        accrual_start: Date,
        /// Accrual end
        accrual_end: Date,
        /// Payment date
        payment_date: Date,
        /// Year fraction
        accrual_factor: f64,
        /// Index
        index: IborIndex,
        /// Compounding sub-periods
        sub_periods: Vec<CompoundingSubPeriod>,
        /// Compounding method
        compounding: CompoundingType,
        /// Additive spread
        spread: f64,
    },
    /// Compounded overnight fixings.
    Overnight {
        /// Accrual start
        accrual_start: Date,
        /// Accrual end
        accrual_end: Date,
        /// Payment date
        payment_date: Date,
        /// Year fraction
        accrual_factor: f64,
        /// Index
        index: OvernightIndex,
        /// Days between fixing and publication
        publication_lag: u32,
        /// Additive spread
        spread: f64,
    },
    /// Arithmetic average of overnight fixings.
    OvernightArithmeticAverage {
        /// Accrual start
        accrual_start: Date,
        /// Accrual end
        accrual_end: Date,
        /// Payment date
        payment_date: Date,
        /// Year fraction
        accrual_factor: f64,
        /// Index
        index: OvernightIndex,
        /// Additive spread
        spread: f64,
    },
}

impl Coupon {
    /// Accrual start date.
    pub fn accrual_start(&self) -> Date {
        match self {
            Coupon::Fixed { accrual_start, .. }
            | Coupon::Ibor { accrual_start, .. }
            | Coupon::IborCompounding { accrual_start, .. }
            | Coupon::Overnight { accrual_start, .. }
            | Coupon::OvernightArithmeticAverage { accrual_start, .. } => *accrual_start,
        }
    }

    /// Accrual end date.
    pub fn accrual_end(&self) -> Date {
        match self {
            Coupon::Fixed { accrual_end, .. }
            | Coupon::Ibor { accrual_end, .. }
            | Coupon::IborCompounding { accrual_end, .. }
            | Coupon::Overnight { accrual_end, .. }
            | Coupon::OvernightArithmeticAverage { accrual_end, .. } => *accrual_end,
        }
    }

    /// Payment date.
    pub fn payment_date(&self) -> Date {
        match self {
            Coupon::Fixed { payment_date, .. }
            | Coupon::Ibor { payment_date, .. }
            | Coupon::IborCompounding { payment_date, .. }
            | Coupon::Overnight { payment_date, .. }
            | Coupon::OvernightArithmeticAverage { payment_date, .. } => *payment_date,
        }
    }

    /// Year fraction of the accrual period.
    pub fn accrual_factor(&self) -> f64 {
        match self {
            Coupon::Fixed { accrual_factor, .. }
            | Coupon::Ibor { accrual_factor, .. }
            | Coupon::IborCompounding { accrual_factor, .. }
            | Coupon::Overnight { accrual_factor, .. }
            | Coupon::OvernightArithmeticAverage { accrual_factor, .. } => *accrual_factor,
        }
    }

    /// The fixed rate, or the spread of a floating coupon.
    pub fn rate_or_spread(&self) -> f64 {
        match self {
            Coupon::Fixed { rate, .. } => *rate,
            Coupon::Ibor { spread, .. }
            | Coupon::IborCompounding { spread, .. }
            | Coupon::Overnight { spread, .. }
            | Coupon::OvernightArithmeticAverage { spread, .. } => *spread,
        }
    }

    /// True for floating coupons.
    pub fn is_floating(&self) -> bool {
        !matches!(self, Coupon::Fixed { .. })
    }
}

/// One leg of a swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Leg currency
    pub currency: Currency,
    /// True if the leg is paid
    pub is_payer: bool,
    /// Notional (unit)
    pub notional: f64,
    /// Adjusted leg start
    pub start_date: Date,
    /// Adjusted leg end
    pub end_date: Date,
    /// Coupons in date order
    pub coupons: Vec<Coupon>,
}

impl Leg {
    /// Last payment date, or the leg end if there are no coupons.
    pub fn last_payment_date(&self) -> Date {
        self.coupons
            .iter()
            .map(Coupon::payment_date)
            .max()
            .unwrap_or(self.end_date)
    }

    /// True if every coupon is floating.
    pub fn is_floating(&self) -> bool {
        !self.coupons.is_empty() && self.coupons.iter().all(Coupon::is_floating)
    }
}

// =============================================================================
// DEFINITIONS
// =============================================================================

/// Cash deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashDefinition {
    /// Currency
    pub currency: Currency,
    /// Start date
    pub start_date: Date,
    /// End date
    pub end_date: Date,
    /// Notional
    pub notional: f64,
    /// Deposit rate
    pub rate: f64,
    /// Year fraction between start and end
    pub accrual_factor: f64,
}

/// Deposit linked to an Ibor index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositIborDefinition {
    /// Currency
    pub currency: Currency,
    /// Start date
    pub start_date: Date,
    /// End date
    pub end_date: Date,
    /// Notional
    pub notional: f64,
    /// Deposit rate
    pub rate: f64,
    /// Year fraction between start and end
    pub accrual_factor: f64,
    /// Index
    pub index: IborIndex,
}

/// Forward rate agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraDefinition {
    /// Currency
    pub currency: Currency,
    /// Payment date
    pub payment_date: Date,
    /// Accrual start
    pub accrual_start: Date,
    /// Accrual end
    pub accrual_end: Date,
    /// Year fraction
    pub accrual_factor: f64,
    /// Notional
    pub notional: f64,
    /// Fixing date
    pub fixing_date: Date,
    /// Fixing period start
    pub fixing_period_start: Date,
    /// Fixing period end
    pub fixing_period_end: Date,
    /// Fixing period year fraction
    pub fixing_accrual_factor: f64,
    /// Index
    pub index: IborIndex,
    /// FRA rate
    pub rate: f64,
}

/// Two-leg swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapDefinition {
    /// Pay leg
    pub pay_leg: Leg,
    /// Receive leg
    pub receive_leg: Leg,
}

impl SwapDefinition {
    /// Latest payment across both legs.
    pub fn maturity(&self) -> Date {
        self.pay_leg
            .last_payment_date()
            .max(self.receive_leg.last_payment_date())
    }
}

/// Basis swap with a separate spread leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeLegBasisSwapDefinition {
    /// Pay leg
    pub pay_leg: Leg,
    /// Receive leg
    pub receive_leg: Leg,
    /// Leg carrying the quoted spread
    pub spread_leg: Leg,
}

/// Short-term interest rate future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateFutureDefinition {
    /// Currency
    pub currency: Currency,
    /// Last trading date
    pub last_trade_date: Date,
    /// Fixing period start
    pub fixing_period_start: Date,
    /// Fixing period end
    pub fixing_period_end: Date,
    /// Fixing period year fraction
    pub fixing_accrual_factor: f64,
    /// Contract accrual factor (index tenor in years)
    pub payment_accrual_factor: f64,
    /// Index
    pub index: IborIndex,
    /// Notional
    pub notional: f64,
    /// Quoted price
    pub price: f64,
}

/// Deliverable swap future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapFutureDefinition {
    /// Currency
    pub currency: Currency,
    /// Last trading date
    pub last_trade_date: Date,
    /// Delivery date (start of the underlying swap)
    pub delivery_date: Date,
    /// Underlying swap
    pub underlying: SwapDefinition,
    /// Contract notional
    pub notional: f64,
    /// Quoted price
    pub price: f64,
}

/// FX forward exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxForwardDefinition {
    /// Currency paid
    pub pay_currency: Currency,
    /// Currency received
    pub receive_currency: Currency,
    /// Exchange date
    pub exchange_date: Date,
    /// Amount in the pay currency
    pub pay_amount: f64,
    /// Amount in the receive currency
    pub receive_amount: f64,
}

/// FX swap: a near and a far exchange in opposite directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxSwapDefinition {
    /// Near exchange at the spot rate
    pub near: FxForwardDefinition,
    /// Far exchange at spot plus forward points
    pub far: FxForwardDefinition,
    /// Forward points
    pub forward_points: f64,
}

/// Zero-coupon inflation swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroCouponInflationSwapDefinition {
    /// Currency
    pub currency: Currency,
    /// Settlement (start) date
    pub settlement_date: Date,
    /// Payment date
    pub payment_date: Date,
    /// Fixed leg notional
    pub notional: f64,
    /// Fixed rate, compounded annually over the tenor
    pub fixed_rate: f64,
    /// Whole years in the tenor used for compounding
    pub compounding_periods: u32,
    /// Inflation leg notional (paid)
    pub inflation_notional: f64,
    /// Price index
    pub index: PriceIndex,
    /// Conventional index lag in months
    pub month_lag: u32,
    /// Lag in months of the reference index
    pub spot_lag: u32,
    /// Reference index interpolation
    pub interpolation: InflationNodeType,
    /// First month of the start reference period
    pub reference_start_month: Date,
    /// First month of the end reference period
    pub reference_end_month: Date,
    /// Start index value read from the historical series
    pub reference_start_value: f64,
}

/// Fixed-coupon bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondDefinition {
    /// Security identifier
    pub id: ExternalId,
    /// Currency
    pub currency: Currency,
    /// Issuer name
    pub issuer: String,
    /// Issuer ratings
    pub ratings: Vec<CreditRatingEntry>,
    /// Issuer sector
    pub sector: Option<String>,
    /// Settlement date
    pub settlement_date: Date,
    /// Maturity date
    pub maturity_date: Date,
    /// Coupon rate
    pub coupon_rate: f64,
    /// Coupons; a zero-coupon bond has a single principal-only payment
    pub coupons: Vec<Coupon>,
    /// Ex-dividend days
    pub ex_dividend_days: u32,
    /// Quoted yield
    pub yield_quote: f64,
}

impl BondDefinition {
    /// True for bonds without periodic coupons.
    pub fn is_zero_coupon(&self) -> bool {
        self.coupon_rate == 0.0
    }
}

/// Discount bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDefinition {
    /// Security identifier
    pub id: ExternalId,
    /// Currency
    pub currency: Currency,
    /// Issuer name
    pub issuer: String,
    /// Issuer ratings
    pub ratings: Vec<CreditRatingEntry>,
    /// Settlement date
    pub settlement_date: Date,
    /// Maturity date
    pub maturity_date: Date,
    /// Year fraction from settlement to maturity
    pub accrual_factor: f64,
    /// Quoted yield
    pub yield_quote: f64,
}

/// What a curve point represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurvePointKind {
    /// Continuously compounded zero rate.
    ContinuouslyCompoundedRate,
    /// Periodically compounded zero rate.
    PeriodicallyCompoundedRate {
        /// Compounding periods per year
        compounding_periods: u32,
    },
    /// Discount factor.
    DiscountFactor,
    /// Credit spread.
    CreditSpread,
}

/// A quoted curve value at a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePointDefinition {
    /// What the value is
    pub kind: CurvePointKind,
    /// Point date
    pub date: Date,
    /// ACT/365F time from valuation
    pub time: f64,
    /// Quoted value
    pub value: f64,
}

/// Every instrument a curve node can become.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[allow(missing_docs)]
pub enum InstrumentDefinition {
    Cash(CashDefinition),
    DepositIbor(DepositIborDefinition),
    Fra(FraDefinition),
    Swap(SwapDefinition),
    ThreeLegBasisSwap(ThreeLegBasisSwapDefinition),
    InterestRateFuture(InterestRateFutureDefinition),
    SwapFuture(SwapFutureDefinition),
    FxForward(FxForwardDefinition),
    FxSwap(FxSwapDefinition),
    ZeroCouponInflationSwap(ZeroCouponInflationSwapDefinition),
    Bond(BondDefinition),
    Bill(BillDefinition),
    CurvePoint(CurvePointDefinition),
}

impl InstrumentDefinition {
    /// Short type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            InstrumentDefinition::Cash(_) => "Cash",
            InstrumentDefinition::DepositIbor(_) => "DepositIbor",
            InstrumentDefinition::Fra(_) => "Fra",
            InstrumentDefinition::Swap(_) => "Swap",
            InstrumentDefinition::ThreeLegBasisSwap(_) => "ThreeLegBasisSwap",
            InstrumentDefinition::InterestRateFuture(_) => "InterestRateFuture",
            InstrumentDefinition::SwapFuture(_) => "SwapFuture",
            InstrumentDefinition::FxForward(_) => "FxForward",
            InstrumentDefinition::FxSwap(_) => "FxSwap",
            InstrumentDefinition::ZeroCouponInflationSwap(_) => "ZeroCouponInflationSwap",
            InstrumentDefinition::Bond(_) => "Bond",
            InstrumentDefinition::Bill(_) => "Bill",
            InstrumentDefinition::CurvePoint(_) => "CurvePoint",
        }
    }

    /// Instrument currency. Curve points carry none.
    ///
    /// Swaps report the receive leg's currency; FX instruments report the
    /// pay currency.
    pub fn currency(&self) -> Option<Currency> {
        match self {
            InstrumentDefinition::Cash(d) => Some(d.currency),
            InstrumentDefinition::DepositIbor(d) => Some(d.currency),
            InstrumentDefinition::Fra(d) => Some(d.currency),
            InstrumentDefinition::Swap(d) => Some(d.receive_leg.currency),
            InstrumentDefinition::ThreeLegBasisSwap(d) => Some(d.receive_leg.currency),
            InstrumentDefinition::InterestRateFuture(d) => Some(d.currency),
            InstrumentDefinition::SwapFuture(d) => Some(d.currency),
            InstrumentDefinition::FxForward(d) => Some(d.pay_currency),
            InstrumentDefinition::FxSwap(d) => Some(d.far.pay_currency),
            InstrumentDefinition::ZeroCouponInflationSwap(d) => Some(d.currency),
            InstrumentDefinition::Bond(d) => Some(d.currency),
            InstrumentDefinition::Bill(d) => Some(d.currency),
            InstrumentDefinition::CurvePoint(_) => None,
        }
    }

    /// Last date on which the instrument pays or fixes.
    pub fn maturity(&self) -> Date {
        match self {
            InstrumentDefinition::Cash(d) => d.end_date,
            InstrumentDefinition::DepositIbor(d) => d.end_date,
            InstrumentDefinition::Fra(d) => d.accrual_end,
            InstrumentDefinition::Swap(d) => d.maturity(),
            InstrumentDefinition::ThreeLegBasisSwap(d) => d
                .pay_leg
                .last_payment_date()
                .max(d.receive_leg.last_payment_date())
                .max(d.spread_leg.last_payment_date()),
            InstrumentDefinition::InterestRateFuture(d) => d.fixing_period_end,
            InstrumentDefinition::SwapFuture(d) => d.underlying.maturity(),
            InstrumentDefinition::FxForward(d) => d.exchange_date,
            InstrumentDefinition::FxSwap(d) => d.far.exchange_date,
            InstrumentDefinition::ZeroCouponInflationSwap(d) => d.payment_date,
            InstrumentDefinition::Bond(d) => d.maturity_date,
            InstrumentDefinition::Bill(d) => d.maturity_date,
            InstrumentDefinition::CurvePoint(d) => d.date,
        }
    }
}

impl From<CurvePointKind> for CurveNodeKind {
    fn from(kind: CurvePointKind) -> Self {
        match kind {
            CurvePointKind::ContinuouslyCompoundedRate => CurveNodeKind::ContinuouslyCompoundedRate,
            CurvePointKind::PeriodicallyCompoundedRate { .. } => {
                CurveNodeKind::PeriodicallyCompoundedRate
            }
            CurvePointKind::DiscountFactor => CurveNodeKind::DiscountFactor,
            CurvePointKind::CreditSpread => CurveNodeKind::CreditSpread,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_curve_point_has_no_currency() {
        let point = InstrumentDefinition::CurvePoint(CurvePointDefinition {
            kind: CurvePointKind::DiscountFactor,
            date: d(2025, 1, 15),
            time: 1.0027,
            value: 0.97,
        });
        assert_eq!(point.currency(), None);
        assert_eq!(point.maturity(), d(2025, 1, 15));
        assert_eq!(
            CurveNodeKind::from(CurvePointKind::DiscountFactor),
            CurveNodeKind::DiscountFactor
        );
    }

    #[test]
    fn test_swap_maturity_is_last_payment() {
        let fixed = |start, end, pay| Coupon::Fixed {
            accrual_start: start,
            accrual_end: end,
            payment_date: pay,
            accrual_factor: 1.0,
            rate: 0.02,
        };
        let leg = Leg {
            currency: Currency::EUR,
            is_payer: true,
            notional: 1.0,
            start_date: d(2024, 1, 17),
            end_date: d(2026, 1, 19),
            coupons: vec![
                fixed(d(2024, 1, 17), d(2025, 1, 17), d(2025, 1, 17)),
                fixed(d(2025, 1, 17), d(2026, 1, 19), d(2026, 1, 20)),
            ],
        };
        let swap = InstrumentDefinition::Swap(SwapDefinition {
            pay_leg: leg.clone(),
            receive_leg: Leg {
                is_payer: false,
                coupons: Vec::new(),
                ..leg
            },
        });
        assert_eq!(swap.maturity(), d(2026, 1, 20));
        assert_eq!(swap.currency(), Some(Currency::EUR));
    }
}
