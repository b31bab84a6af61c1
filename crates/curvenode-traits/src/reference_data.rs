//! Reference data source traits.
//!
//! - [`SecuritySource`]: index, bond and bill securities
//! - [`LegalEntitySource`]: issuers and their ratings
//! - [`HolidaySource`]: holiday calendars by identifier
//! - [`RegionSource`]: regions and the calendars that apply in them

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SourceResult;
use crate::ids::{ExternalId, ExternalIdBundle};
use crate::security::{LegalEntity, Security};
use curvenode_core::calendars::Calendar;
use curvenode_core::Currency;

/// Trait for security lookups.
pub trait SecuritySource: Send + Sync {
    /// Returns the security matching any identifier in the bundle.
    ///
    /// Fails with `NotFound` if no security matches.
    fn get_security(&self, ids: &ExternalIdBundle) -> SourceResult<Security>;
}

/// Trait for issuer lookups.
pub trait LegalEntitySource: Send + Sync {
    /// Returns the legal entity with the given identifier.
    fn get_legal_entity(&self, id: &ExternalId) -> SourceResult<LegalEntity>;
}

/// Trait for holiday calendar lookups.
pub trait HolidaySource: Send + Sync {
    /// Returns the calendar registered under `id`.
    fn get_calendar(&self, id: &ExternalId) -> SourceResult<Arc<dyn Calendar>>;
}

/// A financial region and the holiday calendars observed in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Region identifier, usually in the `FINANCIAL_REGION` scheme
    pub id: ExternalId,
    /// Display name
    pub name: String,
    /// Currency of the region, if any
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Holiday calendars to combine for this region
    #[serde(default)]
    pub calendars: Vec<ExternalId>,
}

/// Trait for region lookups.
pub trait RegionSource: Send + Sync {
    /// Returns the region with the given identifier.
    fn get_region(&self, id: &ExternalId) -> SourceResult<Region>;
}
