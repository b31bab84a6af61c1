//! # Curvenode Ext File
//!
//! In-memory and file-backed implementations of every collaborator the
//! curve node converters read from.
//!
//! - DashMap-backed convention, security, legal entity, region, holiday,
//!   configuration and time series sources
//! - CSV quote snapshots and time series
//! - TOML or JSON environment documents bundling all of the above
//!
//! Intended for tests, end-of-day batch runs and the command line tool.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod environment;
mod market_data;
mod reference_data;

pub use config::*;
pub use environment::*;
pub use market_data::*;
pub use reference_data::*;
