//! Node to instrument conversion.
//!
//! [`NodeConverterDispatch`] maps each [`CurveNodeKind`] to a handler
//! closure. The standard dispatcher registers a handler for every kind; a
//! dispatcher assembled with fewer handlers reports the gap through
//! [`NodeConverterDispatch::missing_handlers`] and fails any node of a
//! missing kind with [`CurveNodeError::UnsupportedNodeType`].

mod bond;
mod cash;
mod fra;
mod futures;
mod fx;
mod inflation;
mod points;
mod swap;

use std::collections::HashMap;
use std::fmt;

use rayon::prelude::*;
use tracing::debug;

use curvenode_core::Date;
use curvenode_traits::MarketDataBundle;

use crate::context::{ConversionContext, ConverterSources};
use crate::error::{CurveNodeError, CurveNodeResult};
use crate::instruments::{CurvePointKind, InstrumentDefinition};
use crate::nodes::{CurveNode, CurveNodeKind};
use crate::specification::CurveSpecification;

/// A conversion function for one node kind.
pub type NodeHandler = Box<
    dyn Fn(&ConversionContext<'_>, &CurveNode) -> CurveNodeResult<InstrumentDefinition>
        + Send
        + Sync,
>;

/// Name of the standard dispatcher.
pub const STANDARD_DISPATCHER: &str = "NodeConverterDispatch";

macro_rules! handler {
    ($variant:ident, $convert:path) => {
        |ctx, node| match node {
            CurveNode::$variant(n) => $convert(ctx, n),
            other => Err(CurveNodeError::type_mismatch(
                other,
                stringify!($variant),
                other.kind().type_name(),
            )),
        }
    };
    ($variant:ident, $convert:path, $point:expr) => {
        |ctx, node| match node {
            CurveNode::$variant(n) => $convert(ctx, n, $point),
            other => Err(CurveNodeError::type_mismatch(
                other,
                stringify!($variant),
                other.kind().type_name(),
            )),
        }
    };
}

/// Converts curve nodes into instrument definitions.
pub struct NodeConverterDispatch {
    name: String,
    handlers: HashMap<CurveNodeKind, NodeHandler>,
}

impl NodeConverterDispatch {
    /// A dispatcher with no handlers.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: HashMap::new(),
        }
    }

    /// A dispatcher handling every node kind.
    pub fn standard() -> Self {
        Self::empty(STANDARD_DISPATCHER)
            .with_handler(CurveNodeKind::Cash, handler!(Cash, cash::convert_cash))
            .with_handler(CurveNodeKind::Fra, handler!(Fra, fra::convert_fra))
            .with_handler(
                CurveNodeKind::RollDateFra,
                handler!(RollDateFra, fra::convert_roll_date_fra),
            )
            .with_handler(CurveNodeKind::Swap, handler!(Swap, swap::convert_swap))
            .with_handler(
                CurveNodeKind::ThreeLegBasisSwap,
                handler!(ThreeLegBasisSwap, swap::convert_three_leg_basis_swap),
            )
            .with_handler(
                CurveNodeKind::RollDateSwap,
                handler!(RollDateSwap, swap::convert_roll_date_swap),
            )
            .with_handler(
                CurveNodeKind::CalendarSwap,
                handler!(CalendarSwap, swap::convert_calendar_swap),
            )
            .with_handler(
                CurveNodeKind::RateFuture,
                handler!(RateFuture, futures::convert_rate_future),
            )
            .with_handler(
                CurveNodeKind::DeliverableSwapFuture,
                handler!(DeliverableSwapFuture, futures::convert_swap_future),
            )
            .with_handler(CurveNodeKind::Bond, handler!(Bond, bond::convert_bond))
            .with_handler(CurveNodeKind::Bill, handler!(Bill, bond::convert_bill))
            .with_handler(
                CurveNodeKind::ZeroCouponInflation,
                handler!(ZeroCouponInflation, inflation::convert_zero_coupon_inflation),
            )
            .with_handler(
                CurveNodeKind::FxForward,
                handler!(FxForward, fx::convert_fx_forward),
            )
            .with_handler(CurveNodeKind::FxSwap, handler!(FxSwap, fx::convert_fx_swap))
            .with_handler(
                CurveNodeKind::ContinuouslyCompoundedRate,
                handler!(
                    ContinuouslyCompoundedRate,
                    points::convert_point,
                    CurvePointKind::ContinuouslyCompoundedRate
                ),
            )
            .with_handler(
                CurveNodeKind::PeriodicallyCompoundedRate,
                handler!(
                    PeriodicallyCompoundedRate,
                    points::convert_periodically_compounded_rate
                ),
            )
            .with_handler(
                CurveNodeKind::DiscountFactor,
                handler!(
                    DiscountFactor,
                    points::convert_point,
                    CurvePointKind::DiscountFactor
                ),
            )
            .with_handler(
                CurveNodeKind::CreditSpread,
                handler!(
                    CreditSpread,
                    points::convert_point,
                    CurvePointKind::CreditSpread
                ),
            )
    }

    /// Registers (or replaces) the handler for a node kind.
    #[must_use]
    pub fn with_handler<F>(mut self, kind: CurveNodeKind, handler: F) -> Self
    where
        F: Fn(&ConversionContext<'_>, &CurveNode) -> CurveNodeResult<InstrumentDefinition>
            + Send
            + Sync
            + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Removes the handler for a node kind.
    #[must_use]
    pub fn without_handler(mut self, kind: CurveNodeKind) -> Self {
        self.handlers.remove(&kind);
        self
    }

    /// Dispatcher name, used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if a handler is registered for `kind`.
    pub fn handles(&self, kind: CurveNodeKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Node kinds without a handler, in declaration order.
    pub fn missing_handlers(&self) -> Vec<CurveNodeKind> {
        CurveNodeKind::ALL
            .into_iter()
            .filter(|kind| !self.handles(*kind))
            .collect()
    }

    /// Converts one node.
    pub fn convert(
        &self,
        ctx: &ConversionContext<'_>,
        node: &CurveNode,
    ) -> CurveNodeResult<InstrumentDefinition> {
        let kind = node.kind();
        let handler = self
            .handlers
            .get(&kind)
            .ok_or_else(|| CurveNodeError::unsupported_node_type(&self.name, kind))?;
        debug!(
            node = %node,
            data_id = %ctx.data_id,
            valuation = %ctx.valuation,
            "converting curve node"
        );
        handler(ctx, node)
    }

    /// Converts every node of a specification, in specification order.
    ///
    /// Nodes are converted in parallel; the first failure in specification
    /// order is returned.
    pub fn convert_all(
        &self,
        sources: &ConverterSources,
        valuation: Date,
        market_data: &dyn MarketDataBundle,
        specification: &CurveSpecification,
    ) -> CurveNodeResult<Vec<InstrumentDefinition>> {
        let nodes: Vec<_> = specification.nodes().iter().collect();
        let results: Vec<CurveNodeResult<InstrumentDefinition>> = nodes
            .par_iter()
            .map(|entry| {
                let ctx = ConversionContext::new(sources, valuation, market_data, &entry.identifier);
                self.convert(&ctx, &entry.node)
            })
            .collect();
        results.into_iter().collect()
    }
}

impl Default for NodeConverterDispatch {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for NodeConverterDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().copied().collect();
        kinds.sort();
        f.debug_struct("NodeConverterDispatch")
            .field("name", &self.name)
            .field("handlers", &kinds)
            .finish()
    }
}
