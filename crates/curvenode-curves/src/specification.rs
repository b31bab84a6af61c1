//! Curve specifications.
//!
//! A [`CurveSpecification`] is a curve definition resolved against its id
//! mappers on one curve date: every node paired with the market data
//! identifier of its instrument, in a deterministic order.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use curvenode_core::Date;
use curvenode_traits::{ConfigSource, ConfigSourceExt, ExternalId};

use crate::definition::CurveDefinition;
use crate::error::{CurveNodeError, CurveNodeResult};
use crate::mapper::{CurveNodeIdMapper, DataFieldType};
use crate::nodes::CurveNode;

/// A curve node and the market data identifier of its instrument.
///
/// Ordered by mapper tenor first, then node kind, so nodes sort along the
/// curve regardless of how they were inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveNodeWithIdentifier {
    /// The node
    pub node: CurveNode,
    /// Market data identifier
    pub identifier: ExternalId,
    /// Market data field
    pub data_field: String,
    /// Quote type
    #[serde(default)]
    pub field_type: DataFieldType,
}

impl CurveNodeWithIdentifier {
    /// Pairs a node with its identifier.
    pub fn new(
        node: CurveNode,
        identifier: ExternalId,
        data_field: impl Into<String>,
        field_type: DataFieldType,
    ) -> Self {
        Self {
            node,
            identifier,
            data_field: data_field.into(),
            field_type,
        }
    }
}

impl Ord for CurveNodeWithIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .mapper_tenor()
            .cmp(&other.node.mapper_tenor())
            .then_with(|| self.node.kind().cmp(&other.node.kind()))
            .then_with(|| self.node.cmp(&other.node))
            .then_with(|| self.identifier.cmp(&other.identifier))
            .then_with(|| self.data_field.cmp(&other.data_field))
            .then_with(|| self.field_type.cmp(&other.field_type))
    }
}

impl PartialOrd for CurveNodeWithIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A curve definition resolved on a curve date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveSpecification {
    curve_date: Date,
    name: String,
    nodes: BTreeSet<CurveNodeWithIdentifier>,
}

impl CurveSpecification {
    /// Creates a specification.
    pub fn new(
        curve_date: Date,
        name: impl Into<String>,
        nodes: impl IntoIterator<Item = CurveNodeWithIdentifier>,
    ) -> Self {
        Self {
            curve_date,
            name: name.into(),
            nodes: nodes.into_iter().collect(),
        }
    }

    /// Curve date.
    pub fn curve_date(&self) -> Date {
        self.curve_date
    }

    /// Curve name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nodes in curve order.
    pub fn nodes(&self) -> &BTreeSet<CurveNodeWithIdentifier> {
        &self.nodes
    }

    /// Adds a node; returns false if it was already present.
    pub fn add_node(&mut self, node: CurveNodeWithIdentifier) -> bool {
        self.nodes.insert(node)
    }

    /// Market data identifiers of every node, in curve order.
    pub fn identifiers(&self) -> Vec<&ExternalId> {
        self.nodes.iter().map(|n| &n.identifier).collect()
    }
}

/// Builds [`CurveSpecification`]s from curve definitions.
#[derive(Clone)]
pub struct CurveSpecificationBuilder {
    config: Arc<dyn ConfigSource>,
}

impl CurveSpecificationBuilder {
    /// Creates a builder reading id mappers from `config`.
    pub fn new(config: Arc<dyn ConfigSource>) -> Self {
        Self { config }
    }

    /// Loads the definition called `curve_name` and builds its specification.
    pub fn build_named(
        &self,
        curve_date: Date,
        curve_name: &str,
    ) -> CurveNodeResult<CurveSpecification> {
        let definition: CurveDefinition =
            self.config.get_latest_by_name(curve_name).map_err(|e| {
                if e.is_not_found() {
                    CurveNodeError::not_found("curve definition", curve_name)
                } else {
                    e.into()
                }
            })?;
        self.build_curve(curve_date, &definition)
    }

    /// Builds the specification of `definition` on `curve_date`.
    ///
    /// A node whose id mapper or mapper entry is missing fails the whole
    /// curve.
    pub fn build_curve(
        &self,
        curve_date: Date,
        definition: &CurveDefinition,
    ) -> CurveNodeResult<CurveSpecification> {
        let mut mappers: HashMap<&str, CurveNodeIdMapper> = HashMap::new();
        let mut specification = CurveSpecification::new(curve_date, &definition.name, []);

        for node in &definition.nodes {
            let mapper_name = node.mapper_name();
            if !mappers.contains_key(mapper_name) {
                let mapper = self.load_mapper(mapper_name)?;
                mappers.insert(mapper_name, mapper);
            }
            let mapper = mappers
                .get(mapper_name)
                .ok_or_else(|| CurveNodeError::not_found("curve node id mapper", mapper_name))?;

            let tenor = node.mapper_tenor();
            let provider = mapper.provider(node.kind(), tenor)?;
            let identifier = provider.instrument(curve_date, tenor, node.id_args())?;
            debug!(node = %node, identifier = %identifier, "resolved curve node identifier");
            specification.add_node(CurveNodeWithIdentifier::new(
                node.clone(),
                identifier,
                provider.data_field(),
                provider.field_type(),
            ));
        }

        info!(
            curve = %definition.name,
            curve_date = %curve_date,
            nodes = specification.nodes().len(),
            mappers = mappers.len(),
            "built curve specification"
        );
        Ok(specification)
    }

    fn load_mapper(&self, name: &str) -> CurveNodeResult<CurveNodeIdMapper> {
        self.config.get_latest_by_name(name).map_err(|e| {
            if e.is_not_found() {
                CurveNodeError::not_found("curve node id mapper", name)
            } else {
                e.into()
            }
        })
    }
}

impl std::fmt::Debug for CurveSpecificationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurveSpecificationBuilder").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{CashNode, SwapNode};
    use curvenode_core::Tenor;

    fn cash(tenor: Tenor) -> CurveNode {
        CurveNode::Cash(CashNode {
            start_tenor: Tenor::ZERO,
            maturity_tenor: tenor,
            convention: ExternalId::convention("EUR Deposit"),
            curve_node_id_mapper_name: "EUR Mapper".into(),
            name: None,
        })
    }

    fn swap(tenor: Tenor) -> CurveNode {
        CurveNode::Swap(SwapNode {
            start_tenor: Tenor::ZERO,
            maturity_tenor: tenor,
            pay_leg_convention: ExternalId::convention("EUR Fixed"),
            receive_leg_convention: ExternalId::convention("EUR 6M Euribor"),
            curve_node_id_mapper_name: "EUR Mapper".into(),
            name: None,
        })
    }

    fn entry(node: CurveNode) -> CurveNodeWithIdentifier {
        let id = ExternalId::new("TICKER", node.to_string());
        CurveNodeWithIdentifier::new(node, id, crate::mapper::MARKET_VALUE, DataFieldType::Outright)
    }

    #[test]
    fn test_ordering_follows_tenor_then_kind() {
        let date = Date::from_ymd(2024, 1, 15).unwrap();
        let spec = CurveSpecification::new(
            date,
            "EUR",
            [
                entry(swap(Tenor::years(2))),
                entry(cash(Tenor::months(6))),
                entry(swap(Tenor::years(1))),
                entry(cash(Tenor::years(1))),
                entry(cash(Tenor::months(3))),
            ],
        );
        let tenors: Vec<_> = spec
            .nodes()
            .iter()
            .map(|n| (n.node.mapper_tenor(), n.node.kind()))
            .collect();
        use crate::nodes::CurveNodeKind::{Cash, Swap};
        assert_eq!(
            tenors,
            vec![
                (Tenor::months(3), Cash),
                (Tenor::months(6), Cash),
                (Tenor::years(1), Cash),
                (Tenor::years(1), Swap),
                (Tenor::years(2), Swap),
            ]
        );
    }

    #[test]
    fn test_add_node_deduplicates() {
        let date = Date::from_ymd(2024, 1, 15).unwrap();
        let mut spec = CurveSpecification::new(date, "EUR", []);
        assert!(spec.add_node(entry(cash(Tenor::months(3)))));
        assert!(!spec.add_node(entry(cash(Tenor::months(3)))));
        assert_eq!(spec.nodes().len(), 1);
        assert_eq!(spec.name(), "EUR");
        assert_eq!(spec.curve_date(), date);
    }
}
