//! Quote snapshots and historical time series from CSV files.

use std::io::Read;
use std::path::Path;

use dashmap::DashMap;
use serde::Deserialize;
use tracing::debug;

use curvenode_core::Date;
use curvenode_traits::market_data::MARKET_VALUE;
use curvenode_traits::{
    DateTimeSeries, ExternalId, HistoricalTimeSeriesSource, SnapshotDataBundle, SourceError,
    SourceResult,
};

// =============================================================================
// CSV QUOTES
// =============================================================================

/// CSV record for quotes: `id,value`, where `id` is `SCHEME~VALUE`.
#[derive(Debug, Deserialize)]
struct QuoteRecord {
    id: String,
    value: f64,
}

/// Reads a quote snapshot from CSV.
pub fn read_quotes_csv(reader: impl Read) -> SourceResult<SnapshotDataBundle> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut snapshot = SnapshotDataBundle::new();
    for result in reader.deserialize() {
        let record: QuoteRecord = result.map_err(|e| SourceError::ParseError(e.to_string()))?;
        snapshot.insert(ExternalId::parse(&record.id)?, record.value);
    }
    Ok(snapshot)
}

/// Loads a quote snapshot from a CSV file. A missing file is an error.
pub fn load_quotes_csv(path: impl AsRef<Path>) -> SourceResult<SnapshotDataBundle> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| SourceError::IoError(format!("{}: {e}", path.display())))?;
    let snapshot = read_quotes_csv(file)?;
    debug!(path = %path.display(), quotes = snapshot.len(), "loaded quotes");
    Ok(snapshot)
}

// =============================================================================
// TIME SERIES
// =============================================================================

/// CSV record for time series points: `id,field,date,value`.
#[derive(Debug, Deserialize)]
struct SeriesRecord {
    id: String,
    #[serde(default)]
    field: Option<String>,
    date: Date,
    value: f64,
}

/// Historical time series keyed by `(data field, identifier)`.
#[derive(Debug, Default)]
pub struct InMemoryTimeSeriesSource {
    series: DashMap<(String, ExternalId), DateTimeSeries>,
}

impl InMemoryTimeSeriesSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation.
    pub fn insert_point(&self, field: &str, id: &ExternalId, date: Date, value: f64) {
        self.series
            .entry((field.to_string(), id.clone()))
            .or_default()
            .insert(date, value);
    }

    /// Adds a whole series, merging with anything already stored.
    pub fn insert_series(
        &self,
        field: &str,
        id: &ExternalId,
        points: impl IntoIterator<Item = (Date, f64)>,
    ) {
        let mut series = self
            .series
            .entry((field.to_string(), id.clone()))
            .or_default();
        for (date, value) in points {
            series.insert(date, value);
        }
    }

    /// Builder-style [`insert_series`](Self::insert_series) under `Market_Value`.
    #[must_use]
    pub fn with_series(
        self,
        id: &ExternalId,
        points: impl IntoIterator<Item = (Date, f64)>,
    ) -> Self {
        self.insert_series(MARKET_VALUE, id, points);
        self
    }

    /// Adds observations read from CSV. Rows without a field use `Market_Value`.
    pub fn read_csv(&self, reader: impl Read) -> SourceResult<usize> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut count = 0;
        for result in reader.deserialize() {
            let record: SeriesRecord =
                result.map_err(|e| SourceError::ParseError(e.to_string()))?;
            let id = ExternalId::parse(&record.id)?;
            let field = record.field.as_deref().unwrap_or(MARKET_VALUE);
            self.insert_point(field, &id, record.date, record.value);
            count += 1;
        }
        Ok(count)
    }

    /// Adds observations from a CSV file.
    pub fn load_csv(&self, path: impl AsRef<Path>) -> SourceResult<usize> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| SourceError::IoError(format!("{}: {e}", path.display())))?;
        let count = self.read_csv(file)?;
        debug!(path = %path.display(), points = count, "loaded time series");
        Ok(count)
    }
}

impl HistoricalTimeSeriesSource for InMemoryTimeSeriesSource {
    fn get_time_series(&self, data_field: &str, id: &ExternalId) -> SourceResult<DateTimeSeries> {
        self.series
            .get(&(data_field.to_string(), id.clone()))
            .map(|s| s.clone())
            .ok_or_else(|| SourceError::not_found("time series", format!("{id} {data_field}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use curvenode_traits::MarketDataBundle;

    #[test]
    fn test_quotes_csv() {
        let csv = "id,value\nOG_SYNTHETIC_TICKER~EUR_CASH_3M,0.035\nOG_SYNTHETIC_TICKER~EUR_SWAP_2Y,0.021\n";
        let snapshot = read_quotes_csv(csv.as_bytes()).unwrap();
        assert_eq!(snapshot.len(), 2);
        let id = ExternalId::new("OG_SYNTHETIC_TICKER", "EUR_CASH_3M");
        assert_relative_eq!(snapshot.get_quote(&id).unwrap(), 0.035);
    }

    #[test]
    fn test_quotes_csv_bad_id() {
        let csv = "id,value\nno-scheme,0.035\n";
        assert!(read_quotes_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_time_series_csv() {
        let csv = "id,field,date,value\n\
                   BLOOMBERG_TICKER~CPXTEMU Index,,2023-10-01,121.5\n\
                   BLOOMBERG_TICKER~CPXTEMU Index,,2023-11-01,121.9\n\
                   BLOOMBERG_TICKER~CPXTEMU Index,Close,2023-11-01,122.0\n";
        let source = InMemoryTimeSeriesSource::new();
        assert_eq!(source.read_csv(csv.as_bytes()).unwrap(), 3);

        let id = ExternalId::new("BLOOMBERG_TICKER", "CPXTEMU Index");
        let series = source.get_time_series(MARKET_VALUE, &id).unwrap();
        assert_eq!(series.len(), 2);
        assert_relative_eq!(series.value_in_month(2023, 11).unwrap(), 121.9);
        assert_eq!(source.get_time_series("Close", &id).unwrap().len(), 1);
        assert!(source
            .get_time_series("Open", &id)
            .unwrap_err()
            .is_not_found());
    }
}
