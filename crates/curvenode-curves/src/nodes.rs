//! Curve node model.
//!
//! A curve node is one quoted point on a curve: the tenors that place it in
//! time, the conventions that describe it, and the name of the
//! [`CurveNodeIdMapper`](crate::mapper::CurveNodeIdMapper) that turns it
//! into a market data identifier. Nodes are immutable values.

use std::fmt;

use serde::{Deserialize, Serialize};

use curvenode_core::{Currency, Tenor};
use curvenode_traits::ExternalId;

// =============================================================================
// RATES INSTRUMENTS
// =============================================================================

/// Cash deposit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CashNode {
    /// Start tenor from spot
    pub start_tenor: Tenor,
    /// Deposit length from start
    pub maturity_tenor: Tenor,
    /// Deposit convention, or an Ibor index for index-linked deposits
    pub convention: ExternalId,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// Forward rate agreement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FraNode {
    /// Fixing period start from spot
    pub fixing_start: Tenor,
    /// Fixing period end from spot
    pub fixing_end: Tenor,
    /// Ibor index convention
    pub convention: ExternalId,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// Two-leg swap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SwapNode {
    /// Start tenor from spot
    pub start_tenor: Tenor,
    /// Swap length from start
    pub maturity_tenor: Tenor,
    /// Pay leg convention
    pub pay_leg_convention: ExternalId,
    /// Receive leg convention
    pub receive_leg_convention: ExternalId,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// Basis swap with a separate leg carrying the quoted spread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThreeLegBasisSwapNode {
    /// Start tenor from spot
    pub start_tenor: Tenor,
    /// Swap length from start
    pub maturity_tenor: Tenor,
    /// Pay leg convention
    pub pay_leg_convention: ExternalId,
    /// Receive leg convention
    pub receive_leg_convention: ExternalId,
    /// Spread leg convention
    pub spread_leg_convention: ExternalId,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// FRA with start and end dates on an IMM-style roll schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RollDateFraNode {
    /// Tenor from valuation to the date the roll count starts from
    pub start_tenor: Tenor,
    /// Roll number of the start date
    pub roll_date_start_number: u32,
    /// Roll number of the end date
    pub roll_date_end_number: u32,
    /// Roll-date FRA convention
    pub roll_date_fra_convention: ExternalId,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// Swap with start and end dates on an IMM-style roll schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RollDateSwapNode {
    /// Tenor from valuation to the date the roll count starts from
    pub start_tenor: Tenor,
    /// Roll number of the start date
    pub roll_date_start_number: u32,
    /// Roll number of the end date
    pub roll_date_end_number: u32,
    /// Roll-date swap convention
    pub roll_date_swap_convention: ExternalId,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// Swap whose start and end dates come from a configured date set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarSwapNode {
    /// Name of the date set
    pub date_set_name: String,
    /// Tenor from valuation to the date the count starts from
    pub start_tenor: Tenor,
    /// Index of the start date in the date set
    pub start_date_number: u32,
    /// Index of the end date in the date set
    pub end_date_number: u32,
    /// Swap convention
    pub swap_convention: ExternalId,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// Short-term interest rate future.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RateFutureNode {
    /// Which future after the start date (1 = first)
    pub future_number: u32,
    /// Tenor from valuation to the date the count starts from
    pub start_tenor: Tenor,
    /// Contract cycle
    pub future_tenor: Tenor,
    /// Underlying index tenor
    pub underlying_tenor: Tenor,
    /// Future convention
    pub future_convention: ExternalId,
    /// Underlying index convention
    pub underlying_convention: ExternalId,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// Deliverable swap future.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeliverableSwapFutureNode {
    /// Which future after the start date (1 = first)
    pub future_number: u32,
    /// Tenor from valuation to the date the count starts from
    pub start_tenor: Tenor,
    /// Contract cycle
    pub future_tenor: Tenor,
    /// Tenor of the deliverable swap
    pub underlying_tenor: Tenor,
    /// Future convention
    pub future_convention: ExternalId,
    /// Underlying swap convention
    pub swap_convention: ExternalId,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

// =============================================================================
// BONDS, INFLATION, FX
// =============================================================================

/// Bond identified through the mapper; terms come from the security.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BondNode {
    /// Approximate maturity
    pub tenor: Tenor,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// Bill identified through the mapper; terms come from the security.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BillNode {
    /// Approximate maturity
    pub tenor: Tenor,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// How the reference index of a zero-coupon inflation swap is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InflationNodeType {
    /// Index value of the reference month.
    Monthly,
    /// Linear interpolation between two monthly values.
    Interpolated,
}

/// Zero-coupon inflation swap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZeroCouponInflationNode {
    /// Swap length
    pub tenor: Tenor,
    /// Fixed leg convention
    pub fixed_leg_convention: ExternalId,
    /// Inflation leg convention
    pub inflation_leg_convention: ExternalId,
    /// Reference index interpolation
    pub inflation_node_type: InflationNodeType,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// Outright FX forward; the quote is the forward rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FxForwardNode {
    /// Start tenor from spot
    pub start_tenor: Tenor,
    /// Forward tenor from spot
    pub maturity_tenor: Tenor,
    /// FX forward convention
    pub fx_forward_convention: ExternalId,
    /// Currency paid
    pub pay_currency: Currency,
    /// Currency received
    pub receive_currency: Currency,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// FX swap; the quote is forward points over the spot rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FxSwapNode {
    /// Start tenor from spot
    pub start_tenor: Tenor,
    /// Far leg tenor from spot
    pub maturity_tenor: Tenor,
    /// FX swap convention
    pub fx_swap_convention: ExternalId,
    /// Currency paid on the far leg
    pub pay_currency: Currency,
    /// Currency received on the far leg
    pub receive_currency: Currency,
    /// Market data identifier of the spot rate
    pub spot_rate_id: ExternalId,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

// =============================================================================
// CURVE POINTS
// =============================================================================

/// A quoted point that is already a curve value at a tenor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointNode {
    /// Tenor from valuation
    pub tenor: Tenor,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

/// Periodically compounded zero rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodicallyCompoundedRateNode {
    /// Tenor from valuation
    pub tenor: Tenor,
    /// Compounding periods per year
    pub compounding_periods: u32,
    /// Id mapper name
    pub curve_node_id_mapper_name: String,
    /// Optional node name
    #[serde(default)]
    pub name: Option<String>,
}

// =============================================================================
// CLOSED VARIANT SET
// =============================================================================

/// Every curve node variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type")]
#[allow(missing_docs)]
pub enum CurveNode {
    Cash(CashNode),
    Fra(FraNode),
    Swap(SwapNode),
    Bond(BondNode),
    Bill(BillNode),
    RateFuture(RateFutureNode),
    DeliverableSwapFuture(DeliverableSwapFutureNode),
    RollDateFra(RollDateFraNode),
    RollDateSwap(RollDateSwapNode),
    CalendarSwap(CalendarSwapNode),
    ThreeLegBasisSwap(ThreeLegBasisSwapNode),
    ZeroCouponInflation(ZeroCouponInflationNode),
    FxForward(FxForwardNode),
    FxSwap(FxSwapNode),
    ContinuouslyCompoundedRate(PointNode),
    PeriodicallyCompoundedRate(PeriodicallyCompoundedRateNode),
    DiscountFactor(PointNode),
    CreditSpread(PointNode),
}

/// Tag identifying a [`CurveNode`] variant.
///
/// Serialized names are the keys used in id mapper configuration; the
/// field names of the legacy mapper document format are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum CurveNodeKind {
    #[serde(alias = "cashIds")]
    Cash,
    #[serde(alias = "fraIds")]
    Fra,
    #[serde(alias = "swapIds")]
    Swap,
    #[serde(alias = "bondIds")]
    Bond,
    #[serde(alias = "billIds")]
    Bill,
    #[serde(alias = "rateFutureIds")]
    RateFuture,
    #[serde(alias = "deliverableSwapFutureIds")]
    DeliverableSwapFuture,
    #[serde(rename = "imm_fra", alias = "immFRAIds")]
    RollDateFra,
    #[serde(rename = "imm_swap", alias = "immSwapIds")]
    RollDateSwap,
    #[serde(alias = "calendarSwapIds")]
    CalendarSwap,
    #[serde(alias = "threeLegBasisSwapIds")]
    ThreeLegBasisSwap,
    #[serde(alias = "zeroCouponInflationIds")]
    ZeroCouponInflation,
    #[serde(alias = "fxForwardIds")]
    FxForward,
    #[serde(alias = "fxSwapIds")]
    FxSwap,
    #[serde(alias = "continuouslyCompoundedRateIds")]
    ContinuouslyCompoundedRate,
    #[serde(alias = "periodicallyCompoundedRateIds")]
    PeriodicallyCompoundedRate,
    #[serde(alias = "discountFactorIds")]
    DiscountFactor,
    #[serde(alias = "creditSpreadIds")]
    CreditSpread,
}

impl CurveNodeKind {
    /// All variants, in declaration order.
    pub const ALL: [CurveNodeKind; 18] = [
        CurveNodeKind::Cash,
        CurveNodeKind::Fra,
        CurveNodeKind::Swap,
        CurveNodeKind::Bond,
        CurveNodeKind::Bill,
        CurveNodeKind::RateFuture,
        CurveNodeKind::DeliverableSwapFuture,
        CurveNodeKind::RollDateFra,
        CurveNodeKind::RollDateSwap,
        CurveNodeKind::CalendarSwap,
        CurveNodeKind::ThreeLegBasisSwap,
        CurveNodeKind::ZeroCouponInflation,
        CurveNodeKind::FxForward,
        CurveNodeKind::FxSwap,
        CurveNodeKind::ContinuouslyCompoundedRate,
        CurveNodeKind::PeriodicallyCompoundedRate,
        CurveNodeKind::DiscountFactor,
        CurveNodeKind::CreditSpread,
    ];

    /// Node type name, e.g. `CashNode`.
    pub fn type_name(&self) -> &'static str {
        match self {
            CurveNodeKind::Cash => "CashNode",
            CurveNodeKind::Fra => "FRANode",
            CurveNodeKind::Swap => "SwapNode",
            CurveNodeKind::Bond => "BondNode",
            CurveNodeKind::Bill => "BillNode",
            CurveNodeKind::RateFuture => "RateFutureNode",
            CurveNodeKind::DeliverableSwapFuture => "DeliverableSwapFutureNode",
            CurveNodeKind::RollDateFra => "RollDateFRANode",
            CurveNodeKind::RollDateSwap => "RollDateSwapNode",
            CurveNodeKind::CalendarSwap => "CalendarSwapNode",
            CurveNodeKind::ThreeLegBasisSwap => "ThreeLegBasisSwapNode",
            CurveNodeKind::ZeroCouponInflation => "ZeroCouponInflationNode",
            CurveNodeKind::FxForward => "FXForwardNode",
            CurveNodeKind::FxSwap => "FXSwapNode",
            CurveNodeKind::ContinuouslyCompoundedRate => "ContinuouslyCompoundedRateNode",
            CurveNodeKind::PeriodicallyCompoundedRate => "PeriodicallyCompoundedRateNode",
            CurveNodeKind::DiscountFactor => "DiscountFactorNode",
            CurveNodeKind::CreditSpread => "CreditSpreadNode",
        }
    }

    /// Human-readable kind used in id mapper error messages.
    pub fn mapper_label(&self) -> &'static str {
        match self {
            CurveNodeKind::Cash => "cash",
            CurveNodeKind::Fra => "FRA",
            CurveNodeKind::Swap => "swap",
            CurveNodeKind::Bond => "bond",
            CurveNodeKind::Bill => "bill",
            CurveNodeKind::RateFuture => "rate future",
            CurveNodeKind::DeliverableSwapFuture => "deliverable swap future",
            CurveNodeKind::RollDateFra => "IMM FRA",
            CurveNodeKind::RollDateSwap => "IMM swap",
            CurveNodeKind::CalendarSwap => "calendar swap",
            CurveNodeKind::ThreeLegBasisSwap => "three-leg basis swap",
            CurveNodeKind::ZeroCouponInflation => "zero coupon inflation",
            CurveNodeKind::FxForward => "FX forward",
            CurveNodeKind::FxSwap => "FX swap",
            CurveNodeKind::ContinuouslyCompoundedRate => "continuously-compounded rate",
            CurveNodeKind::PeriodicallyCompoundedRate => "periodically-compounded rate",
            CurveNodeKind::DiscountFactor => "discount factor",
            CurveNodeKind::CreditSpread => "credit spread",
        }
    }
}

impl fmt::Display for CurveNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Extra arguments some instrument providers need to build an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeIdArgs {
    /// The tenor alone identifies the instrument.
    None,
    /// Nth future counted from `start_tenor`.
    Future {
        /// Contract cycle
        future_tenor: Tenor,
        /// Which future (1 = first)
        future_number: u32,
    },
    /// Start and end roll numbers (or date-set indices).
    RollDate {
        /// Start number
        start_number: u32,
        /// End number
        end_number: u32,
    },
}

impl CurveNode {
    /// The variant tag.
    pub fn kind(&self) -> CurveNodeKind {
        match self {
            CurveNode::Cash(_) => CurveNodeKind::Cash,
            CurveNode::Fra(_) => CurveNodeKind::Fra,
            CurveNode::Swap(_) => CurveNodeKind::Swap,
            CurveNode::Bond(_) => CurveNodeKind::Bond,
            CurveNode::Bill(_) => CurveNodeKind::Bill,
            CurveNode::RateFuture(_) => CurveNodeKind::RateFuture,
            CurveNode::DeliverableSwapFuture(_) => CurveNodeKind::DeliverableSwapFuture,
            CurveNode::RollDateFra(_) => CurveNodeKind::RollDateFra,
            CurveNode::RollDateSwap(_) => CurveNodeKind::RollDateSwap,
            CurveNode::CalendarSwap(_) => CurveNodeKind::CalendarSwap,
            CurveNode::ThreeLegBasisSwap(_) => CurveNodeKind::ThreeLegBasisSwap,
            CurveNode::ZeroCouponInflation(_) => CurveNodeKind::ZeroCouponInflation,
            CurveNode::FxForward(_) => CurveNodeKind::FxForward,
            CurveNode::FxSwap(_) => CurveNodeKind::FxSwap,
            CurveNode::ContinuouslyCompoundedRate(_) => CurveNodeKind::ContinuouslyCompoundedRate,
            CurveNode::PeriodicallyCompoundedRate(_) => CurveNodeKind::PeriodicallyCompoundedRate,
            CurveNode::DiscountFactor(_) => CurveNodeKind::DiscountFactor,
            CurveNode::CreditSpread(_) => CurveNodeKind::CreditSpread,
        }
    }

    /// Name of the id mapper configuration.
    pub fn mapper_name(&self) -> &str {
        match self {
            CurveNode::Cash(n) => &n.curve_node_id_mapper_name,
            CurveNode::Fra(n) => &n.curve_node_id_mapper_name,
            CurveNode::Swap(n) => &n.curve_node_id_mapper_name,
            CurveNode::Bond(n) => &n.curve_node_id_mapper_name,
            CurveNode::Bill(n) => &n.curve_node_id_mapper_name,
            CurveNode::RateFuture(n) => &n.curve_node_id_mapper_name,
            CurveNode::DeliverableSwapFuture(n) => &n.curve_node_id_mapper_name,
            CurveNode::RollDateFra(n) => &n.curve_node_id_mapper_name,
            CurveNode::RollDateSwap(n) => &n.curve_node_id_mapper_name,
            CurveNode::CalendarSwap(n) => &n.curve_node_id_mapper_name,
            CurveNode::ThreeLegBasisSwap(n) => &n.curve_node_id_mapper_name,
            CurveNode::ZeroCouponInflation(n) => &n.curve_node_id_mapper_name,
            CurveNode::FxForward(n) => &n.curve_node_id_mapper_name,
            CurveNode::FxSwap(n) => &n.curve_node_id_mapper_name,
            CurveNode::PeriodicallyCompoundedRate(n) => &n.curve_node_id_mapper_name,
            CurveNode::ContinuouslyCompoundedRate(n)
            | CurveNode::DiscountFactor(n)
            | CurveNode::CreditSpread(n) => &n.curve_node_id_mapper_name,
        }
    }

    /// Optional node name.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            CurveNode::Cash(n) => &n.name,
            CurveNode::Fra(n) => &n.name,
            CurveNode::Swap(n) => &n.name,
            CurveNode::Bond(n) => &n.name,
            CurveNode::Bill(n) => &n.name,
            CurveNode::RateFuture(n) => &n.name,
            CurveNode::DeliverableSwapFuture(n) => &n.name,
            CurveNode::RollDateFra(n) => &n.name,
            CurveNode::RollDateSwap(n) => &n.name,
            CurveNode::CalendarSwap(n) => &n.name,
            CurveNode::ThreeLegBasisSwap(n) => &n.name,
            CurveNode::ZeroCouponInflation(n) => &n.name,
            CurveNode::FxForward(n) => &n.name,
            CurveNode::FxSwap(n) => &n.name,
            CurveNode::PeriodicallyCompoundedRate(n) => &n.name,
            CurveNode::ContinuouslyCompoundedRate(n)
            | CurveNode::DiscountFactor(n)
            | CurveNode::CreditSpread(n) => &n.name,
        };
        name.as_deref()
    }

    /// Tenor under which the id mapper stores this node's instrument.
    ///
    /// Maturity for cash, swaps, bonds, bills and FX; fixing end for FRAs;
    /// the start tenor for futures and roll-date instruments.
    pub fn mapper_tenor(&self) -> Tenor {
        match self {
            CurveNode::Cash(n) => n.maturity_tenor,
            CurveNode::Fra(n) => n.fixing_end,
            CurveNode::Swap(n) => n.maturity_tenor,
            CurveNode::Bond(n) => n.tenor,
            CurveNode::Bill(n) => n.tenor,
            CurveNode::RateFuture(n) => n.start_tenor,
            CurveNode::DeliverableSwapFuture(n) => n.start_tenor,
            CurveNode::RollDateFra(n) => n.start_tenor,
            CurveNode::RollDateSwap(n) => n.start_tenor,
            CurveNode::CalendarSwap(n) => n.start_tenor,
            CurveNode::ThreeLegBasisSwap(n) => n.maturity_tenor,
            CurveNode::ZeroCouponInflation(n) => n.tenor,
            CurveNode::FxForward(n) => n.maturity_tenor,
            CurveNode::FxSwap(n) => n.maturity_tenor,
            CurveNode::PeriodicallyCompoundedRate(n) => n.tenor,
            CurveNode::ContinuouslyCompoundedRate(n)
            | CurveNode::DiscountFactor(n)
            | CurveNode::CreditSpread(n) => n.tenor,
        }
    }

    /// Extra arguments for identifier construction.
    pub fn id_args(&self) -> NodeIdArgs {
        match self {
            CurveNode::RateFuture(n) => NodeIdArgs::Future {
                future_tenor: n.future_tenor,
                future_number: n.future_number,
            },
            CurveNode::DeliverableSwapFuture(n) => NodeIdArgs::Future {
                future_tenor: n.future_tenor,
                future_number: n.future_number,
            },
            CurveNode::RollDateFra(n) => NodeIdArgs::RollDate {
                start_number: n.roll_date_start_number,
                end_number: n.roll_date_end_number,
            },
            CurveNode::RollDateSwap(n) => NodeIdArgs::RollDate {
                start_number: n.roll_date_start_number,
                end_number: n.roll_date_end_number,
            },
            CurveNode::CalendarSwap(n) => NodeIdArgs::RollDate {
                start_number: n.start_date_number,
                end_number: n.end_date_number,
            },
            _ => NodeIdArgs::None,
        }
    }

    /// Convention identifiers referenced directly by the node.
    pub fn convention_references(&self) -> Vec<&ExternalId> {
        match self {
            CurveNode::Cash(n) => vec![&n.convention],
            CurveNode::Fra(n) => vec![&n.convention],
            CurveNode::Swap(n) => vec![&n.pay_leg_convention, &n.receive_leg_convention],
            CurveNode::RateFuture(n) => vec![&n.future_convention, &n.underlying_convention],
            CurveNode::DeliverableSwapFuture(n) => vec![&n.future_convention, &n.swap_convention],
            CurveNode::RollDateFra(n) => vec![&n.roll_date_fra_convention],
            CurveNode::RollDateSwap(n) => vec![&n.roll_date_swap_convention],
            CurveNode::CalendarSwap(n) => vec![&n.swap_convention],
            CurveNode::ThreeLegBasisSwap(n) => vec![
                &n.pay_leg_convention,
                &n.receive_leg_convention,
                &n.spread_leg_convention,
            ],
            CurveNode::ZeroCouponInflation(n) => {
                vec![&n.fixed_leg_convention, &n.inflation_leg_convention]
            }
            CurveNode::FxForward(n) => vec![&n.fx_forward_convention],
            CurveNode::FxSwap(n) => vec![&n.fx_swap_convention],
            CurveNode::Bond(_)
            | CurveNode::Bill(_)
            | CurveNode::ContinuouslyCompoundedRate(_)
            | CurveNode::PeriodicallyCompoundedRate(_)
            | CurveNode::DiscountFactor(_)
            | CurveNode::CreditSpread(_) => Vec::new(),
        }
    }
}

impl fmt::Display for CurveNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} {}", self.kind(), name),
            None => write!(f, "{} {}", self.kind(), self.mapper_tenor()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_from_json() {
        let json = r#"{
            "type": "Cash",
            "start_tenor": "0D",
            "maturity_tenor": "3M",
            "convention": "CONVENTION~EUR Deposit",
            "curve_node_id_mapper_name": "EUR Mapper"
        }"#;
        let node: CurveNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind(), CurveNodeKind::Cash);
        assert_eq!(node.mapper_tenor(), Tenor::months(3));
        assert_eq!(node.mapper_name(), "EUR Mapper");
        assert_eq!(node.to_string(), "CashNode 3M");
        assert_eq!(node.id_args(), NodeIdArgs::None);
    }

    #[test]
    fn test_kind_keys() {
        assert_eq!(
            serde_json::to_string(&CurveNodeKind::RollDateFra).unwrap(),
            "\"imm_fra\""
        );
        assert_eq!(
            serde_json::to_string(&CurveNodeKind::ThreeLegBasisSwap).unwrap(),
            "\"three_leg_basis_swap\""
        );
        assert_eq!(CurveNodeKind::ALL.len(), 18);
    }
}
