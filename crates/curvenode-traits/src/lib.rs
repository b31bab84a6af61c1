//! # Curvenode Traits
//!
//! Interfaces for the reference and market data that curve node conversion
//! reads but does not own.
//!
//! ## Module Structure
//!
//! - [`ids`]: External identifiers, identifier bundles and version corrections
//! - [`security`]: Index, bond and bill securities and their issuers
//! - [`reference_data`]: Security, legal entity, holiday and region sources
//! - [`config`]: Typed configuration documents
//! - [`market_data`]: Quote snapshots and historical time series
//!
//! Every source is a synchronous `Send + Sync` trait. An implementation
//! backed by an asynchronous store blocks inside its own methods; callers in
//! this workspace never see the suspension.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod ids;
pub mod market_data;
pub mod reference_data;
pub mod security;

// Re-export commonly used types
pub use config::{ConfigItem, ConfigSource, ConfigSourceExt};
pub use error::{SourceError, SourceResult};
pub use ids::{ExternalId, ExternalIdBundle, VersionCorrection};
pub use market_data::{
    DateTimeSeries, HistoricalTimeSeriesSource, MarketDataBundle, SnapshotDataBundle,
};
pub use reference_data::{HolidaySource, LegalEntitySource, Region, RegionSource, SecuritySource};
pub use security::{
    BillSecurity, BondSecurity, CreditRatingEntry, IborIndexSecurity, LegalEntity,
    OvernightIndexSecurity, PriceIndexSecurity, Security,
};
