//! Collaborators and per-node inputs shared by the converters.

use std::sync::Arc;

use curvenode_conventions::{CalendarResolver, ConventionResolver, ConventionSource};
use curvenode_core::calendars::Calendar;
use curvenode_core::Date;
use curvenode_traits::{
    ConfigSource, ExternalId, HistoricalTimeSeriesSource, HolidaySource, LegalEntitySource,
    MarketDataBundle, RegionSource, SecuritySource,
};

use crate::error::{CurveNodeError, CurveNodeResult};

/// Reference data sources used during conversion.
#[derive(Clone)]
pub struct ConverterSources {
    /// Convention lookup with legacy fallback
    pub conventions: ConventionResolver,
    /// Region and holiday calendars
    pub calendars: CalendarResolver,
    /// Bond, bill and index securities
    pub securities: Arc<dyn SecuritySource>,
    /// Bond and bill issuers
    pub legal_entities: Arc<dyn LegalEntitySource>,
    /// Date sets and other configuration
    pub config: Arc<dyn ConfigSource>,
    /// Price index fixings
    pub time_series: Arc<dyn HistoricalTimeSeriesSource>,
}

/// The raw collaborators [`ConverterSources`] is assembled from.
#[derive(Clone)]
pub struct SourceSet {
    /// Conventions
    pub conventions: Arc<dyn ConventionSource>,
    /// Securities
    pub securities: Arc<dyn SecuritySource>,
    /// Legal entities
    pub legal_entities: Arc<dyn LegalEntitySource>,
    /// Regions
    pub regions: Arc<dyn RegionSource>,
    /// Holiday calendars
    pub holidays: Arc<dyn HolidaySource>,
    /// Configuration documents
    pub config: Arc<dyn ConfigSource>,
    /// Historical time series
    pub time_series: Arc<dyn HistoricalTimeSeriesSource>,
}

impl From<SourceSet> for ConverterSources {
    fn from(set: SourceSet) -> Self {
        Self {
            conventions: ConventionResolver::new(set.conventions, Arc::clone(&set.securities)),
            calendars: CalendarResolver::new(set.regions, set.holidays),
            securities: set.securities,
            legal_entities: set.legal_entities,
            config: set.config,
            time_series: set.time_series,
        }
    }
}

impl std::fmt::Debug for ConverterSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterSources")
            .field("conventions", &self.conventions)
            .finish_non_exhaustive()
    }
}

/// Inputs to the conversion of one node.
#[derive(Clone, Copy)]
pub struct ConversionContext<'a> {
    /// Reference data
    pub sources: &'a ConverterSources,
    /// Valuation date
    pub valuation: Date,
    /// Quote snapshot
    pub market_data: &'a dyn MarketDataBundle,
    /// Market data identifier of the node
    pub data_id: &'a ExternalId,
}

impl<'a> ConversionContext<'a> {
    /// Creates a context.
    pub fn new(
        sources: &'a ConverterSources,
        valuation: Date,
        market_data: &'a dyn MarketDataBundle,
        data_id: &'a ExternalId,
    ) -> Self {
        Self {
            sources,
            valuation,
            market_data,
            data_id,
        }
    }

    /// The node's quote; absence is fatal.
    pub fn quote(&self) -> CurveNodeResult<f64> {
        self.quote_for(self.data_id)
    }

    /// The quote for another identifier; absence is fatal.
    pub fn quote_for(&self, id: &ExternalId) -> CurveNodeResult<f64> {
        self.market_data
            .get_quote(id)
            .ok_or_else(|| CurveNodeError::missing_market_data(id))
    }

    /// Convention resolver.
    pub fn conventions(&self) -> &'a ConventionResolver {
        &self.sources.conventions
    }

    /// Resolves a region or holiday calendar.
    pub fn calendar(&self, id: &ExternalId) -> CurveNodeResult<Arc<dyn Calendar>> {
        Ok(self.sources.calendars.resolve(id)?)
    }
}
