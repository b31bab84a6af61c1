//! # Curvenode Conventions
//!
//! Financial conventions and the resolution of convention and calendar
//! references held by curve nodes.
//!
//! - [`Convention`]: the closed set of convention variants
//! - [`ConventionSource`]: where conventions are stored
//! - [`ConventionResolver`]: security-linked lookup with legacy fallback
//! - [`CalendarResolver`]: region and holiday calendars

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calendar;
pub mod convention;
pub mod error;
pub mod resolver;
pub mod source;

pub use calendar::CalendarResolver;
pub use convention::{
    BondConvention, CompoundingIborLegConvention, CompoundingType, Convention, ConventionKind,
    ConventionVariant, DeliverablePriceQuotedSwapFutureConvention, DepositConvention,
    FixedLegRollDateConvention, FxForwardAndSwapConvention, FxSpotConvention,
    IborIndexConvention, InflationLegConvention, InterestRateFutureConvention,
    OisLegConvention, OnArithmeticAverageLegConvention, OnCompoundedLegRollDateConvention,
    OvernightIndexConvention, PriceIndexConvention, RollDateFraConvention,
    RollDateSwapConvention, SwapConvention, SwapFixedLegConvention,
    VanillaIborLegConvention, VanillaIborLegRollDateConvention,
};
pub use error::{ConventionError, ConventionResult};
pub use resolver::ConventionResolver;
pub use source::ConventionSource;
