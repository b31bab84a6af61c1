//! Curve definitions: the named node sets a curve is built from.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use curvenode_traits::ConfigItem;

use crate::nodes::CurveNode;

/// A named, de-duplicated set of curve nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveDefinition {
    /// Curve name
    pub name: String,
    /// Nodes of the curve
    pub nodes: BTreeSet<CurveNode>,
}

impl CurveDefinition {
    /// Creates a definition.
    pub fn new(name: impl Into<String>, nodes: impl IntoIterator<Item = CurveNode>) -> Self {
        Self {
            name: name.into(),
            nodes: nodes.into_iter().collect(),
        }
    }

    /// Names of every id mapper the nodes refer to.
    pub fn mapper_names(&self) -> BTreeSet<&str> {
        self.nodes.iter().map(CurveNode::mapper_name).collect()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the definition has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ConfigItem for CurveDefinition {
    const KIND: &'static str = "CurveDefinition";

    fn name(&self) -> &str {
        &self.name
    }
}
