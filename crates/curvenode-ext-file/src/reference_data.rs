//! In-memory reference data sources.

use std::sync::Arc;

use dashmap::DashMap;

use curvenode_conventions::{Convention, ConventionSource};
use curvenode_core::calendars::Calendar;
use curvenode_traits::{
    ExternalId, ExternalIdBundle, HolidaySource, LegalEntity, LegalEntitySource, Region,
    RegionSource, Security, SecuritySource, SourceError, SourceResult,
};

// =============================================================================
// CONVENTIONS
// =============================================================================

/// Conventions keyed by identifier.
///
/// [`insert`](Self::insert) registers a convention under `CONVENTION~name`;
/// further identifiers can be added with [`insert_with_id`](Self::insert_with_id).
#[derive(Debug, Default)]
pub struct InMemoryConventionSource {
    conventions: DashMap<ExternalId, Convention>,
}

impl InMemoryConventionSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a convention under its name.
    pub fn insert(&self, convention: Convention) {
        let id = ExternalId::convention(convention.name());
        self.conventions.insert(id, convention);
    }

    /// Registers a convention under an explicit identifier.
    pub fn insert_with_id(&self, id: ExternalId, convention: Convention) {
        self.conventions.insert(id, convention);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(self, convention: impl Into<Convention>) -> Self {
        self.insert(convention.into());
        self
    }

    /// Number of registered identifiers.
    pub fn len(&self) -> usize {
        self.conventions.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.conventions.is_empty()
    }
}

impl ConventionSource for InMemoryConventionSource {
    fn get_convention(&self, id: &ExternalId) -> SourceResult<Convention> {
        self.conventions
            .get(id)
            .map(|c| c.clone())
            .ok_or_else(|| SourceError::not_found("convention", id))
    }
}

// =============================================================================
// SECURITIES
// =============================================================================

/// Securities reachable from any of their identifiers.
#[derive(Debug, Default)]
pub struct InMemorySecuritySource {
    securities: DashMap<ExternalId, Arc<Security>>,
}

impl InMemorySecuritySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a security under every identifier given.
    pub fn insert(&self, ids: impl IntoIterator<Item = ExternalId>, security: Security) {
        let security = Arc::new(security);
        for id in ids {
            self.securities.insert(id, Arc::clone(&security));
        }
    }

    /// Builder-style [`insert`](Self::insert) with a single identifier.
    #[must_use]
    pub fn with(self, id: ExternalId, security: Security) -> Self {
        self.insert([id], security);
        self
    }
}

impl SecuritySource for InMemorySecuritySource {
    fn get_security(&self, ids: &ExternalIdBundle) -> SourceResult<Security> {
        if ids.is_empty() {
            return Err(SourceError::invalid_input("empty identifier bundle"));
        }
        ids.iter()
            .find_map(|id| self.securities.get(id).map(|s| Security::clone(&s)))
            .ok_or_else(|| SourceError::not_found("security", ids))
    }
}

// =============================================================================
// LEGAL ENTITIES
// =============================================================================

/// Legal entities keyed by their identifier.
#[derive(Debug, Default)]
pub struct InMemoryLegalEntitySource {
    entities: DashMap<ExternalId, LegalEntity>,
}

impl InMemoryLegalEntitySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity under its own identifier.
    pub fn insert(&self, entity: LegalEntity) {
        self.entities.insert(entity.id.clone(), entity);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(self, entity: LegalEntity) -> Self {
        self.insert(entity);
        self
    }
}

impl LegalEntitySource for InMemoryLegalEntitySource {
    fn get_legal_entity(&self, id: &ExternalId) -> SourceResult<LegalEntity> {
        self.entities
            .get(id)
            .map(|e| e.clone())
            .ok_or_else(|| SourceError::not_found("legal entity", id))
    }
}

// =============================================================================
// REGIONS AND HOLIDAYS
// =============================================================================

/// Regions keyed by their identifier.
#[derive(Debug, Default)]
pub struct InMemoryRegionSource {
    regions: DashMap<ExternalId, Region>,
}

impl InMemoryRegionSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a region under its own identifier.
    pub fn insert(&self, region: Region) {
        self.regions.insert(region.id.clone(), region);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(self, region: Region) -> Self {
        self.insert(region);
        self
    }
}

impl RegionSource for InMemoryRegionSource {
    fn get_region(&self, id: &ExternalId) -> SourceResult<Region> {
        self.regions
            .get(id)
            .map(|r| r.clone())
            .ok_or_else(|| SourceError::not_found("region", id))
    }
}

/// Holiday calendars keyed by identifier.
#[derive(Default)]
pub struct InMemoryHolidaySource {
    calendars: DashMap<ExternalId, Arc<dyn Calendar>>,
}

impl InMemoryHolidaySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a calendar.
    pub fn insert(&self, id: ExternalId, calendar: Arc<dyn Calendar>) {
        self.calendars.insert(id, calendar);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(self, id: ExternalId, calendar: Arc<dyn Calendar>) -> Self {
        self.insert(id, calendar);
        self
    }
}

impl HolidaySource for InMemoryHolidaySource {
    fn get_calendar(&self, id: &ExternalId) -> SourceResult<Arc<dyn Calendar>> {
        self.calendars
            .get(id)
            .map(|c| Arc::clone(&c))
            .ok_or_else(|| SourceError::not_found("holiday calendar", id))
    }
}

impl std::fmt::Debug for InMemoryHolidaySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = self.calendars.iter().map(|e| e.key().to_string()).collect();
        f.debug_struct("InMemoryHolidaySource")
            .field("calendars", &ids)
            .finish()
    }
}
