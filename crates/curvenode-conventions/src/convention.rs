//! Convention data model.
//!
//! Conventions are read-only reference data describing how an instrument or
//! leg accrues and settles. Composite conventions (swaps, roll-date swaps,
//! FX forwards, inflation legs) refer to other conventions by identifier;
//! those references are resolved one at a time by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use curvenode_core::calendars::BusinessDayConvention;
use curvenode_core::daycounts::DayCountConvention;
use curvenode_core::{Currency, StubType, Tenor};
use curvenode_traits::ExternalId;

// =============================================================================
// CASH AND INDICES
// =============================================================================

/// Convention for cash deposits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositConvention {
    /// Convention name
    pub name: String,
    /// Day count
    pub day_count: DayCountConvention,
    /// Business day adjustment
    pub business_day_convention: BusinessDayConvention,
    /// Spot lag in business days
    pub settlement_days: u32,
    /// End-of-month rule
    #[serde(default)]
    pub is_eom: bool,
    /// Currency
    pub currency: Currency,
    /// Calendar region
    pub region_calendar: ExternalId,
}

/// Convention for an Ibor index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IborIndexConvention {
    /// Convention name
    pub name: String,
    /// Day count
    pub day_count: DayCountConvention,
    /// Business day adjustment
    pub business_day_convention: BusinessDayConvention,
    /// Spot lag in business days between fixing and accrual start
    pub settlement_days: u32,
    /// End-of-month rule
    #[serde(default)]
    pub is_eom: bool,
    /// Currency
    pub currency: Currency,
    /// Calendar used to determine fixing dates
    pub fixing_calendar: ExternalId,
    /// Calendar used for accrual dates
    pub region_calendar: ExternalId,
    /// Fixing page
    #[serde(default)]
    pub fixing_page: String,
}

/// Convention for an overnight index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvernightIndexConvention {
    /// Convention name
    pub name: String,
    /// Day count
    pub day_count: DayCountConvention,
    /// Days between the fixing date and its publication
    pub publication_lag: u32,
    /// Currency
    pub currency: Currency,
    /// Calendar region
    pub region_calendar: ExternalId,
}

/// Convention for a consumer price index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceIndexConvention {
    /// Convention name
    pub name: String,
    /// Currency
    pub currency: Currency,
    /// Region whose calendar applies
    pub region: ExternalId,
    /// Identifier of the historical index series
    pub price_index_id: ExternalId,
}

// =============================================================================
// SWAP LEGS
// =============================================================================

/// Fixed leg of a vanilla swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapFixedLegConvention {
    /// Convention name
    pub name: String,
    /// Payment period
    pub payment_tenor: Tenor,
    /// Day count
    pub day_count: DayCountConvention,
    /// Business day adjustment
    pub business_day_convention: BusinessDayConvention,
    /// Currency
    pub currency: Currency,
    /// Calendar region
    pub region_calendar: ExternalId,
    /// Spot lag in business days
    pub settlement_days: u32,
    /// End-of-month rule
    #[serde(default)]
    pub is_eom: bool,
    /// Stub placement
    #[serde(default)]
    pub stub_type: StubType,
    /// Payment lag in business days after accrual end
    #[serde(default)]
    pub payment_lag: i32,
}

/// Floating leg paying a single Ibor fixing per period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VanillaIborLegConvention {
    /// Convention name
    pub name: String,
    /// Ibor index security (or legacy index convention)
    pub ibor_index_convention: ExternalId,
    /// Fixing in advance
    #[serde(default = "default_true")]
    pub is_advance_fixing: bool,
    /// Reset (and payment) period
    pub reset_tenor: Tenor,
    /// Spot lag in business days
    pub settlement_days: u32,
    /// End-of-month rule
    #[serde(default)]
    pub is_eom: bool,
    /// Stub placement
    #[serde(default)]
    pub stub_type: StubType,
    /// Payment lag in business days after accrual end
    #[serde(default)]
    pub payment_lag: i32,
}

/// How compounded Ibor sub-period amounts combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundingType {
    /// Spread is compounded together with the index.
    Compounding,
    /// Spread is not compounded.
    FlatCompounding,
}

/// Floating leg compounding several Ibor fixings per payment period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundingIborLegConvention {
    /// Convention name
    pub name: String,
    /// Ibor index security (or legacy index convention)
    pub ibor_index_convention: ExternalId,
    /// Payment period
    pub payment_tenor: Tenor,
    /// Compounding method
    pub compounding_type: CompoundingType,
    /// Sub-period length
    pub composition_tenor: Tenor,
    /// Stub placement for sub-periods within a payment period
    #[serde(default)]
    pub stub_type_compound: StubType,
    /// Spot lag in business days
    pub settlement_days: u32,
    /// End-of-month rule
    #[serde(default)]
    pub is_eom: bool,
    /// Stub placement for payment periods
    #[serde(default)]
    pub stub_type_leg: StubType,
    /// Payment lag in business days after accrual end
    #[serde(default)]
    pub payment_lag: i32,
}

/// Overnight-indexed leg with compounded fixings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OisLegConvention {
    /// Convention name
    pub name: String,
    /// Overnight index security (or legacy index convention)
    pub overnight_index_convention: ExternalId,
    /// Payment period
    pub payment_tenor: Tenor,
    /// Business day adjustment
    pub business_day_convention: BusinessDayConvention,
    /// Payment lag in business days after accrual end
    #[serde(default)]
    pub payment_lag: i32,
    /// End-of-month rule
    #[serde(default)]
    pub is_eom: bool,
    /// Stub placement
    #[serde(default)]
    pub stub_type: StubType,
    /// Spot lag in business days
    pub settlement_days: u32,
}

/// Overnight leg paying the arithmetic average of fixings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnArithmeticAverageLegConvention {
    /// Convention name
    pub name: String,
    /// Overnight index security (or legacy index convention)
    pub overnight_index_convention: ExternalId,
    /// Payment period
    pub payment_tenor: Tenor,
    /// Business day adjustment
    pub business_day_convention: BusinessDayConvention,
    /// Payment lag in business days after accrual end
    #[serde(default)]
    pub payment_lag: i32,
    /// End-of-month rule
    #[serde(default)]
    pub is_eom: bool,
    /// Stub placement
    #[serde(default)]
    pub stub_type: StubType,
    /// Spot lag in business days
    pub settlement_days: u32,
}

/// Composite swap convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapConvention {
    /// Convention name
    pub name: String,
    /// Pay leg convention
    pub pay_leg_convention: ExternalId,
    /// Receive leg convention
    pub receive_leg_convention: ExternalId,
}

/// Inflation leg of a zero-coupon inflation swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflationLegConvention {
    /// Convention name
    pub name: String,
    /// Business day adjustment
    pub business_day_convention: BusinessDayConvention,
    /// Day count
    pub day_count: DayCountConvention,
    /// End-of-month rule
    #[serde(default)]
    pub is_eom: bool,
    /// Conventional index lag in months
    pub month_lag: u32,
    /// Lag in months used for the reference index
    pub spot_lag: u32,
    /// Price index security (or legacy price index convention)
    pub price_index_convention: ExternalId,
}

// =============================================================================
// ROLL-DATE (IMM) INSTRUMENTS
// =============================================================================

/// Fixed leg whose periods follow a roll-date adjuster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedLegRollDateConvention {
    /// Convention name
    pub name: String,
    /// Payment period
    pub payment_tenor: Tenor,
    /// Day count
    pub day_count: DayCountConvention,
    /// Currency
    pub currency: Currency,
    /// Calendar region
    pub region_calendar: ExternalId,
    /// Stub placement
    #[serde(default)]
    pub stub_type: StubType,
    /// Payment lag in business days after accrual end
    #[serde(default)]
    pub payment_lag: i32,
}

/// Ibor leg whose periods follow a roll-date adjuster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VanillaIborLegRollDateConvention {
    /// Convention name
    pub name: String,
    /// Ibor index security (or legacy index convention)
    pub ibor_index_convention: ExternalId,
    /// Fixing in advance
    #[serde(default = "default_true")]
    pub is_advance_fixing: bool,
    /// Reset period
    pub reset_tenor: Tenor,
    /// Stub placement
    #[serde(default)]
    pub stub_type: StubType,
    /// Payment lag in business days after accrual end
    #[serde(default)]
    pub payment_lag: i32,
}

/// Compounded overnight leg whose periods follow a roll-date adjuster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCompoundedLegRollDateConvention {
    /// Convention name
    pub name: String,
    /// Overnight index security (or legacy index convention)
    pub overnight_index_convention: ExternalId,
    /// Payment period
    pub payment_tenor: Tenor,
    /// Stub placement
    #[serde(default)]
    pub stub_type: StubType,
    /// Payment lag in business days after accrual end
    #[serde(default)]
    pub payment_lag: i32,
}

/// FRA with IMM-style start and end dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollDateFraConvention {
    /// Convention name
    pub name: String,
    /// Ibor index security (or legacy index convention)
    pub index_convention: ExternalId,
    /// Name of the roll-date adjuster
    pub roll_date_adjuster: String,
}

/// Swap with IMM-style start and end dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollDateSwapConvention {
    /// Convention name
    pub name: String,
    /// Pay leg convention
    pub pay_leg_convention: ExternalId,
    /// Receive leg convention
    pub receive_leg_convention: ExternalId,
    /// Name of the roll-date adjuster
    pub roll_date_adjuster: String,
}

// =============================================================================
// FUTURES
// =============================================================================

/// Short-term interest rate future.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestRateFutureConvention {
    /// Convention name
    pub name: String,
    /// Name of the expiry calculator
    pub expiry_convention: String,
    /// Underlying index convention
    pub index_convention: ExternalId,
}

/// Deliverable swap future quoted on price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverablePriceQuotedSwapFutureConvention {
    /// Convention name
    pub name: String,
    /// Name of the expiry calculator
    pub expiry_convention: String,
    /// Underlying swap convention
    pub swap_convention: ExternalId,
    /// Contract notional
    pub notional: f64,
    /// Coupon of the deliverable swap's fixed leg
    #[serde(default)]
    pub coupon: f64,
}

// =============================================================================
// FX
// =============================================================================

/// FX spot settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxSpotConvention {
    /// Convention name
    pub name: String,
    /// Spot lag in business days
    pub settlement_days: u32,
    /// Settlement region
    pub settlement_region: ExternalId,
}

/// FX forwards and swaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxForwardAndSwapConvention {
    /// Convention name
    pub name: String,
    /// Underlying spot convention
    pub spot_convention: ExternalId,
    /// Business day adjustment
    pub business_day_convention: BusinessDayConvention,
    /// End-of-month rule
    #[serde(default)]
    pub is_eom: bool,
    /// Settlement region
    pub settlement_region: ExternalId,
}

// =============================================================================
// BONDS
// =============================================================================

/// Settlement rules for a bond market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondConvention {
    /// Convention name
    pub name: String,
    /// Settlement lag in business days
    pub settlement_days: u32,
    /// Business day adjustment
    pub business_day_convention: BusinessDayConvention,
    /// End-of-month rule
    #[serde(default)]
    pub is_eom: bool,
    /// Ex-dividend days
    #[serde(default)]
    pub ex_dividend_days: u32,
    /// Coupon schedule generated backwards from maturity
    #[serde(default = "default_true")]
    pub schedule_from_maturity: bool,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// CLOSED VARIANT SET
// =============================================================================

/// Every convention variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[allow(missing_docs)]
pub enum Convention {
    Deposit(DepositConvention),
    IborIndex(IborIndexConvention),
    OvernightIndex(OvernightIndexConvention),
    PriceIndex(PriceIndexConvention),
    SwapFixedLeg(SwapFixedLegConvention),
    VanillaIborLeg(VanillaIborLegConvention),
    CompoundingIborLeg(CompoundingIborLegConvention),
    OisLeg(OisLegConvention),
    OnArithmeticAverageLeg(OnArithmeticAverageLegConvention),
    Swap(SwapConvention),
    InflationLeg(InflationLegConvention),
    FixedLegRollDate(FixedLegRollDateConvention),
    VanillaIborLegRollDate(VanillaIborLegRollDateConvention),
    OnCompoundedLegRollDate(OnCompoundedLegRollDateConvention),
    RollDateFra(RollDateFraConvention),
    RollDateSwap(RollDateSwapConvention),
    InterestRateFuture(InterestRateFutureConvention),
    DeliverablePriceQuotedSwapFuture(DeliverablePriceQuotedSwapFutureConvention),
    FxSpot(FxSpotConvention),
    FxForwardAndSwap(FxForwardAndSwapConvention),
    Bond(BondConvention),
}

/// Tag identifying a [`Convention`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum ConventionKind {
    Deposit,
    IborIndex,
    OvernightIndex,
    PriceIndex,
    SwapFixedLeg,
    VanillaIborLeg,
    CompoundingIborLeg,
    OisLeg,
    OnArithmeticAverageLeg,
    Swap,
    InflationLeg,
    FixedLegRollDate,
    VanillaIborLegRollDate,
    OnCompoundedLegRollDate,
    RollDateFra,
    RollDateSwap,
    InterestRateFuture,
    DeliverablePriceQuotedSwapFuture,
    FxSpot,
    FxForwardAndSwap,
    Bond,
}

impl fmt::Display for ConventionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Convention {
    /// Convention name.
    pub fn name(&self) -> &str {
        match self {
            Convention::Deposit(c) => &c.name,
            Convention::IborIndex(c) => &c.name,
            Convention::OvernightIndex(c) => &c.name,
            Convention::PriceIndex(c) => &c.name,
            Convention::SwapFixedLeg(c) => &c.name,
            Convention::VanillaIborLeg(c) => &c.name,
            Convention::CompoundingIborLeg(c) => &c.name,
            Convention::OisLeg(c) => &c.name,
            Convention::OnArithmeticAverageLeg(c) => &c.name,
            Convention::Swap(c) => &c.name,
            Convention::InflationLeg(c) => &c.name,
            Convention::FixedLegRollDate(c) => &c.name,
            Convention::VanillaIborLegRollDate(c) => &c.name,
            Convention::OnCompoundedLegRollDate(c) => &c.name,
            Convention::RollDateFra(c) => &c.name,
            Convention::RollDateSwap(c) => &c.name,
            Convention::InterestRateFuture(c) => &c.name,
            Convention::DeliverablePriceQuotedSwapFuture(c) => &c.name,
            Convention::FxSpot(c) => &c.name,
            Convention::FxForwardAndSwap(c) => &c.name,
            Convention::Bond(c) => &c.name,
        }
    }

    /// The variant tag.
    pub fn kind(&self) -> ConventionKind {
        match self {
            Convention::Deposit(_) => ConventionKind::Deposit,
            Convention::IborIndex(_) => ConventionKind::IborIndex,
            Convention::OvernightIndex(_) => ConventionKind::OvernightIndex,
            Convention::PriceIndex(_) => ConventionKind::PriceIndex,
            Convention::SwapFixedLeg(_) => ConventionKind::SwapFixedLeg,
            Convention::VanillaIborLeg(_) => ConventionKind::VanillaIborLeg,
            Convention::CompoundingIborLeg(_) => ConventionKind::CompoundingIborLeg,
            Convention::OisLeg(_) => ConventionKind::OisLeg,
            Convention::OnArithmeticAverageLeg(_) => ConventionKind::OnArithmeticAverageLeg,
            Convention::Swap(_) => ConventionKind::Swap,
            Convention::InflationLeg(_) => ConventionKind::InflationLeg,
            Convention::FixedLegRollDate(_) => ConventionKind::FixedLegRollDate,
            Convention::VanillaIborLegRollDate(_) => ConventionKind::VanillaIborLegRollDate,
            Convention::OnCompoundedLegRollDate(_) => ConventionKind::OnCompoundedLegRollDate,
            Convention::RollDateFra(_) => ConventionKind::RollDateFra,
            Convention::RollDateSwap(_) => ConventionKind::RollDateSwap,
            Convention::InterestRateFuture(_) => ConventionKind::InterestRateFuture,
            Convention::DeliverablePriceQuotedSwapFuture(_) => {
                ConventionKind::DeliverablePriceQuotedSwapFuture
            }
            Convention::FxSpot(_) => ConventionKind::FxSpot,
            Convention::FxForwardAndSwap(_) => ConventionKind::FxForwardAndSwap,
            Convention::Bond(_) => ConventionKind::Bond,
        }
    }

    /// Currency stated directly on the convention, if any.
    ///
    /// Leg conventions that point at an index carry no currency of their own.
    pub fn currency(&self) -> Option<Currency> {
        match self {
            Convention::Deposit(c) => Some(c.currency),
            Convention::IborIndex(c) => Some(c.currency),
            Convention::OvernightIndex(c) => Some(c.currency),
            Convention::PriceIndex(c) => Some(c.currency),
            Convention::SwapFixedLeg(c) => Some(c.currency),
            Convention::FixedLegRollDate(c) => Some(c.currency),
            _ => None,
        }
    }

    /// True for swap leg conventions paying a floating rate.
    pub fn is_floating_leg(&self) -> bool {
        matches!(
            self,
            Convention::VanillaIborLeg(_)
                | Convention::CompoundingIborLeg(_)
                | Convention::OisLeg(_)
                | Convention::OnArithmeticAverageLeg(_)
                | Convention::VanillaIborLegRollDate(_)
                | Convention::OnCompoundedLegRollDate(_)
        )
    }

    /// Identifiers of other conventions or index securities this one refers to.
    pub fn references(&self) -> Vec<&ExternalId> {
        match self {
            Convention::VanillaIborLeg(c) => vec![&c.ibor_index_convention],
            Convention::CompoundingIborLeg(c) => vec![&c.ibor_index_convention],
            Convention::OisLeg(c) => vec![&c.overnight_index_convention],
            Convention::OnArithmeticAverageLeg(c) => vec![&c.overnight_index_convention],
            Convention::Swap(c) => vec![&c.pay_leg_convention, &c.receive_leg_convention],
            Convention::InflationLeg(c) => vec![&c.price_index_convention],
            Convention::VanillaIborLegRollDate(c) => vec![&c.ibor_index_convention],
            Convention::OnCompoundedLegRollDate(c) => vec![&c.overnight_index_convention],
            Convention::RollDateFra(c) => vec![&c.index_convention],
            Convention::RollDateSwap(c) => vec![&c.pay_leg_convention, &c.receive_leg_convention],
            Convention::InterestRateFuture(c) => vec![&c.index_convention],
            Convention::DeliverablePriceQuotedSwapFuture(c) => vec![&c.swap_convention],
            Convention::FxForwardAndSwap(c) => vec![&c.spot_convention],
            _ => Vec::new(),
        }
    }
}

/// A concrete convention struct that can be extracted from [`Convention`].
pub trait ConventionVariant: Sized {
    /// The variant tag for this type.
    const KIND: ConventionKind;

    /// Unwraps the variant, handing the convention back if it is a different one.
    fn from_convention(convention: Convention) -> Result<Self, Convention>;
}

macro_rules! convention_variants {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl ConventionVariant for $ty {
                const KIND: ConventionKind = ConventionKind::$variant;

                fn from_convention(convention: Convention) -> Result<Self, Convention> {
                    match convention {
                        Convention::$variant(c) => Ok(c),
                        other => Err(other),
                    }
                }
            }

            impl From<$ty> for Convention {
                fn from(c: $ty) -> Self {
                    Convention::$variant(c)
                }
            }
        )*
    };
}

convention_variants! {
    DepositConvention => Deposit,
    IborIndexConvention => IborIndex,
    OvernightIndexConvention => OvernightIndex,
    PriceIndexConvention => PriceIndex,
    SwapFixedLegConvention => SwapFixedLeg,
    VanillaIborLegConvention => VanillaIborLeg,
    CompoundingIborLegConvention => CompoundingIborLeg,
    OisLegConvention => OisLeg,
    OnArithmeticAverageLegConvention => OnArithmeticAverageLeg,
    SwapConvention => Swap,
    InflationLegConvention => InflationLeg,
    FixedLegRollDateConvention => FixedLegRollDate,
    VanillaIborLegRollDateConvention => VanillaIborLegRollDate,
    OnCompoundedLegRollDateConvention => OnCompoundedLegRollDate,
    RollDateFraConvention => RollDateFra,
    RollDateSwapConvention => RollDateSwap,
    InterestRateFutureConvention => InterestRateFuture,
    DeliverablePriceQuotedSwapFutureConvention => DeliverablePriceQuotedSwapFuture,
    FxSpotConvention => FxSpot,
    FxForwardAndSwapConvention => FxForwardAndSwap,
    BondConvention => Bond,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_from_json() {
        let json = r#"{
            "type": "Deposit",
            "name": "EUR Deposit",
            "day_count": "ACT/360",
            "business_day_convention": "ModifiedFollowing",
            "settlement_days": 2,
            "currency": "EUR",
            "region_calendar": "FINANCIAL_REGION~EU"
        }"#;
        let convention: Convention = serde_json::from_str(json).unwrap();
        assert_eq!(convention.kind(), ConventionKind::Deposit);
        assert_eq!(convention.currency(), Some(Currency::EUR));
        let Convention::Deposit(deposit) = convention else {
            panic!("expected deposit");
        };
        assert!(!deposit.is_eom);
        assert_eq!(deposit.day_count, DayCountConvention::Act360);
    }

    #[test]
    fn test_variant_extraction() {
        let swap = Convention::Swap(SwapConvention {
            name: "EUR 6M Swap".to_string(),
            pay_leg_convention: ExternalId::convention("EUR Fixed Leg"),
            receive_leg_convention: ExternalId::convention("EUR 6M Ibor Leg"),
        });
        assert_eq!(swap.references().len(), 2);
        let back = DepositConvention::from_convention(swap.clone());
        assert_eq!(back.unwrap_err(), swap);
        assert!(SwapConvention::from_convention(swap).is_ok());
    }

    #[test]
    fn test_floating_legs() {
        let ois = Convention::OisLeg(OisLegConvention {
            name: "EUR ESTR Leg".to_string(),
            overnight_index_convention: ExternalId::convention("ESTR"),
            payment_tenor: Tenor::years(1),
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            payment_lag: 1,
            is_eom: false,
            stub_type: StubType::ShortStart,
            settlement_days: 2,
        });
        assert!(ois.is_floating_leg());
        assert_eq!(ois.currency(), None);
    }
}
