//! Market data inputs: quote snapshots and historical fixings.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::SourceResult;
use crate::ids::ExternalId;
use curvenode_core::Date;

/// Data field read when none is configured.
pub const MARKET_VALUE: &str = "Market_Value";

/// A read-only snapshot of quotes keyed by market data identifier.
pub trait MarketDataBundle: Send + Sync {
    /// The quote for `id`, or `None` if the snapshot has no value for it.
    fn get_quote(&self, id: &ExternalId) -> Option<f64>;
}

/// In-memory quote snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDataBundle {
    quotes: HashMap<ExternalId, f64>,
}

impl SnapshotDataBundle {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a quote, replacing any previous value.
    pub fn insert(&mut self, id: ExternalId, value: f64) {
        self.quotes.insert(id, value);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, id: ExternalId, value: f64) -> Self {
        self.insert(id, value);
        self
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// True if the snapshot holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterates over the quotes in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&ExternalId, f64)> {
        self.quotes.iter().map(|(id, value)| (id, *value))
    }
}

impl MarketDataBundle for SnapshotDataBundle {
    fn get_quote(&self, id: &ExternalId) -> Option<f64> {
        self.quotes.get(id).copied()
    }
}

impl FromIterator<(ExternalId, f64)> for SnapshotDataBundle {
    fn from_iter<I: IntoIterator<Item = (ExternalId, f64)>>(iter: I) -> Self {
        Self {
            quotes: iter.into_iter().collect(),
        }
    }
}

/// A dated series of observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateTimeSeries(BTreeMap<Date, f64>);

impl DateTimeSeries {
    /// Creates an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observation.
    pub fn insert(&mut self, date: Date, value: f64) {
        self.0.insert(date, value);
    }

    /// The value observed on `date`.
    pub fn get(&self, date: Date) -> Option<f64> {
        self.0.get(&date).copied()
    }

    /// The last observation on or before `date`.
    pub fn latest_on_or_before(&self, date: Date) -> Option<(Date, f64)> {
        self.0.range(..=date).next_back().map(|(d, v)| (*d, *v))
    }

    /// The last observation falling in the given month.
    pub fn value_in_month(&self, year: i32, month: u32) -> Option<f64> {
        self.0
            .iter()
            .rev()
            .find(|(d, _)| d.year() == year && d.month() == month)
            .map(|(_, v)| *v)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Date, f64)> for DateTimeSeries {
    fn from_iter<I: IntoIterator<Item = (Date, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Trait for historical time series lookups.
pub trait HistoricalTimeSeriesSource: Send + Sync {
    /// Returns the series of `data_field` for `id`.
    fn get_time_series(&self, data_field: &str, id: &ExternalId) -> SourceResult<DateTimeSeries>;
}
