//! Curve definition validation.
//!
//! Checks that everything a curve definition refers to can be found on a
//! curve date, without converting any node:
//! - the id mapper of each node, and its entry for the node
//! - every convention the node refers to, followed through composite
//!   conventions
//! - date sets of calendar swaps and securities of bonds and bills
//!
//! Validation never stops at the first problem; every node is visited and
//! every problem recorded.
//!
//! # Example
//!
//! ```rust,ignore
//! use curvenode_curves::validation::CurveValidator;
//!
//! let report = CurveValidator::new(sources).validate(curve_date, &definition);
//! if report.has_errors() {
//!     println!("{report}");
//! }
//! ```

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use curvenode_core::Date;
use curvenode_traits::{ConfigSourceExt, ExternalId};

use crate::context::ConverterSources;
use crate::date_set::DateSet;
use crate::definition::CurveDefinition;
use crate::mapper::CurveNodeIdMapper;
use crate::nodes::CurveNode;

/// Composite conventions are followed at most this deep.
const MAX_CONVENTION_DEPTH: usize = 8;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The node's id mapper does not exist.
    MissingMapper {
        /// Node description.
        node: String,
        /// Mapper name.
        mapper: String,
    },

    /// The id mapper has no usable entry for the node.
    MissingMapping {
        /// Node description.
        node: String,
        /// Why the identifier could not be built.
        reason: String,
    },

    /// A referenced convention cannot be resolved.
    UnresolvedConvention {
        /// Node description.
        node: String,
        /// Convention reference.
        convention: ExternalId,
        /// Resolution error.
        reason: String,
    },

    /// A calendar swap's date set does not exist.
    MissingDateSet {
        /// Node description.
        node: String,
        /// Date set name.
        date_set: String,
    },

    /// The security behind a bond or bill node does not exist.
    MissingSecurity {
        /// Node description.
        node: String,
        /// Market data identifier of the security.
        security: ExternalId,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMapper { node, mapper } => {
                write!(f, "{node}: curve node id mapper '{mapper}' not found")
            }
            Self::MissingMapping { node, reason } => write!(f, "{node}: {reason}"),
            Self::UnresolvedConvention {
                node,
                convention,
                reason,
            } => write!(f, "{node}: convention {convention} unresolved: {reason}"),
            Self::MissingDateSet { node, date_set } => {
                write!(f, "{node}: date set '{date_set}' not found")
            }
            Self::MissingSecurity { node, security } => {
                write!(f, "{node}: security {security} not found")
            }
        }
    }
}

/// Validation warning types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// The definition has no nodes.
    EmptyCurve,

    /// Several nodes map to the same market data identifier.
    SharedIdentifier {
        /// The identifier.
        identifier: ExternalId,
        /// How many nodes use it.
        count: usize,
    },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCurve => write!(f, "curve has no nodes"),
            Self::SharedIdentifier { identifier, count } => {
                write!(f, "{count} nodes share market data identifier {identifier}")
            }
        }
    }
}

/// Result of curve validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    curve: String,
    curve_date: Option<Date>,
    nodes_checked: usize,
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates an empty report for a curve.
    #[must_use]
    pub fn new(curve: impl Into<String>, curve_date: Date) -> Self {
        Self {
            curve: curve.into(),
            curve_date: Some(curve_date),
            ..Self::default()
        }
    }

    /// Returns true if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if there are errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true if there are warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the validation errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the validation warnings.
    #[must_use]
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Number of nodes visited.
    #[must_use]
    pub fn nodes_checked(&self) -> usize {
        self.nodes_checked
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation Report: {}", self.curve)?;
        if let Some(date) = self.curve_date {
            write!(f, " on {date}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "  Status: {}",
            if self.is_valid() { "PASSED" } else { "FAILED" }
        )?;
        writeln!(f, "  Nodes: {}", self.nodes_checked)?;

        if !self.errors.is_empty() {
            writeln!(f, "  Errors ({}):", self.errors.len())?;
            for err in &self.errors {
                writeln!(f, "    - {err}")?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "  Warnings ({}):", self.warnings.len())?;
            for warn in &self.warnings {
                writeln!(f, "    - {warn}")?;
            }
        }

        Ok(())
    }
}

/// Checks curve definitions against the reference data they depend on.
#[derive(Debug, Clone)]
pub struct CurveValidator {
    sources: ConverterSources,
}

impl CurveValidator {
    /// Creates a validator over the given sources.
    pub fn new(sources: ConverterSources) -> Self {
        Self { sources }
    }

    /// Validates `definition` on `curve_date`.
    pub fn validate(&self, curve_date: Date, definition: &CurveDefinition) -> ValidationReport {
        let mut report = ValidationReport::new(&definition.name, curve_date);
        if definition.is_empty() {
            report.add_warning(ValidationWarning::EmptyCurve);
        }

        let mut mappers: HashMap<&str, Option<CurveNodeIdMapper>> = HashMap::new();
        let mut identifiers: HashMap<ExternalId, usize> = HashMap::new();

        for node in &definition.nodes {
            report.nodes_checked += 1;
            let label = node.to_string();
            debug!(node = %label, "validating curve node");

            let mapper_name = node.mapper_name();
            let mapper = mappers.entry(mapper_name).or_insert_with(|| {
                self.sources
                    .config
                    .get_latest_by_name::<CurveNodeIdMapper>(mapper_name)
                    .ok()
            });
            let identifier = match mapper {
                Some(mapper) => match mapper.identifier(curve_date, node) {
                    Ok(id) => Some(id),
                    Err(e) => {
                        report.add_error(ValidationError::MissingMapping {
                            node: label.clone(),
                            reason: e.to_string(),
                        });
                        None
                    }
                },
                None => {
                    report.add_error(ValidationError::MissingMapper {
                        node: label.clone(),
                        mapper: mapper_name.to_string(),
                    });
                    None
                }
            };

            for reference in node.convention_references() {
                self.check_convention(&label, reference, &mut report);
            }

            match node {
                CurveNode::CalendarSwap(n) => {
                    let found = self
                        .sources
                        .config
                        .get_latest_by_name::<DateSet>(&n.date_set_name)
                        .is_ok();
                    if !found {
                        report.add_error(ValidationError::MissingDateSet {
                            node: label.clone(),
                            date_set: n.date_set_name.clone(),
                        });
                    }
                }
                CurveNode::Bond(_) | CurveNode::Bill(_) => {
                    if let Some(id) = &identifier {
                        if self.sources.securities.get_security(&id.to_bundle()).is_err() {
                            report.add_error(ValidationError::MissingSecurity {
                                node: label.clone(),
                                security: id.clone(),
                            });
                        }
                    }
                }
                _ => {}
            }

            if let Some(id) = identifier {
                *identifiers.entry(id).or_default() += 1;
            }
        }

        let shared: BTreeSet<_> = identifiers
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .collect();
        for (identifier, count) in shared {
            report.add_warning(ValidationWarning::SharedIdentifier { identifier, count });
        }
        report
    }

    /// Resolves `reference` and everything it refers to, recording the
    /// first failure on each path.
    fn check_convention(&self, node: &str, reference: &ExternalId, report: &mut ValidationReport) {
        let mut pending = vec![(reference.clone(), 0usize)];
        let mut seen = BTreeSet::new();
        while let Some((id, depth)) = pending.pop() {
            if depth > MAX_CONVENTION_DEPTH || !seen.insert(id.clone()) {
                continue;
            }
            match self.sources.conventions.resolve_any(&id) {
                Ok(convention) => pending.extend(
                    convention
                        .references()
                        .into_iter()
                        .map(|r| (r.clone(), depth + 1)),
                ),
                Err(e) => report.add_error(ValidationError::UnresolvedConvention {
                    node: node.to_string(),
                    convention: id,
                    reason: e.to_string(),
                }),
            }
        }
    }
}
