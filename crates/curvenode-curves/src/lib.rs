//! # Curvenode Curves
//!
//! Turns curve nodes into dated instrument definitions for curve calibration.
//!
//! This crate provides:
//!
//! - **Curve Nodes**: the closed set of node types a curve is defined with
//! - **Id Mappers**: market data identifiers for nodes by kind and tenor
//! - **Curve Specifications**: curve definitions resolved on a curve date
//! - **Date Scheduling**: spot, start and end dates from tenors and conventions
//! - **Legs**: fixed, Ibor, compounding Ibor and overnight legs
//! - **Conversion**: one handler per node type, dispatched by node kind
//! - **Validation**: reference data checks for curve definitions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use curvenode_curves::prelude::*;
//!
//! let spec = CurveSpecificationBuilder::new(config.clone())
//!     .build_named(curve_date, "EUR Discounting")?;
//!
//! let dispatch = NodeConverterDispatch::standard();
//! let instruments = dispatch.convert_all(&sources, curve_date, &quotes, &spec)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::return_self_not_must_use)]

pub mod construction;
pub mod context;
pub mod converter;
pub mod date_set;
pub mod dates;
pub mod definition;
pub mod error;
pub mod expiry;
pub mod index;
pub mod instruments;
pub mod legs;
pub mod mapper;
pub mod nodes;
pub mod schedule;
pub mod specification;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::construction::{
        CurveConstructionConfiguration, CurveGroupConfiguration, CurveTypeConfiguration,
    };
    pub use crate::context::{ConversionContext, ConverterSources, SourceSet};
    pub use crate::converter::{NodeConverterDispatch, NodeHandler, STANDARD_DISPATCHER};
    pub use crate::date_set::DateSet;
    pub use crate::dates::DateScheduler;
    pub use crate::definition::CurveDefinition;
    pub use crate::error::{CurveNodeError, CurveNodeResult};
    pub use crate::expiry::{expiry_calculator, roll_date_adjuster, ExpiryCalculator, RollDateAdjuster};
    pub use crate::instruments::{Coupon, InstrumentDefinition, Leg};
    pub use crate::legs::{LegBuilder, LegRequest};
    pub use crate::mapper::{CurveInstrumentProvider, CurveNodeIdMapper, DataFieldType};
    pub use crate::nodes::{CurveNode, CurveNodeKind};
    pub use crate::specification::{
        CurveNodeWithIdentifier, CurveSpecification, CurveSpecificationBuilder,
    };
    pub use crate::validation::{
        CurveValidator, ValidationError, ValidationReport, ValidationWarning,
    };
}

pub use error::{CurveNodeError, CurveNodeResult};
