//! Environment documents: every source a conversion run needs, in one file.
//!
//! # TOML Format
//!
//! ```toml
//! quotes_csv = "quotes.csv"
//!
//! [[calendars]]
//! id = "HOLIDAY~TARGET"
//! kind = "Target2"
//!
//! [[regions]]
//! id = "FINANCIAL_REGION~EU"
//! name = "Euro area"
//! calendars = ["HOLIDAY~TARGET"]
//!
//! [[conventions]]
//! type = "Deposit"
//! name = "EUR Deposit"
//! day_count = "ACT/360"
//! business_day_convention = "ModifiedFollowing"
//! settlement_days = 2
//! currency = "EUR"
//! region_calendar = "FINANCIAL_REGION~EU"
//!
//! [[config.CurveDefinition]]
//! name = "EUR Discounting"
//! # ...
//! ```
//!
//! Relative file paths are resolved against the environment file's directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use curvenode_conventions::Convention;
use curvenode_core::calendars::{Calendar, HolidayCalendar, Target2Calendar, WeekendCalendar, WeekendType};
use curvenode_core::Date;
use curvenode_traits::market_data::MARKET_VALUE;
use curvenode_traits::{
    ExternalId, LegalEntity, Region, Security, SnapshotDataBundle, SourceError, SourceResult,
};

use crate::config::InMemoryConfigSource;
use crate::market_data::{load_quotes_csv, InMemoryTimeSeriesSource};
use crate::reference_data::{
    InMemoryConventionSource, InMemoryHolidaySource, InMemoryLegalEntitySource,
    InMemoryRegionSource, InMemorySecuritySource,
};

/// How a holiday calendar is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CalendarKind {
    /// The built-in TARGET2 calendar
    Target2,
    /// Weekends only
    Weekend,
    /// An explicit holiday list
    Holidays,
}

/// A holiday calendar entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarEntry {
    /// Calendar identifier
    pub id: ExternalId,
    /// Definition type
    pub kind: CalendarKind,
    /// Weekend rule for `Holidays` calendars
    #[serde(default)]
    pub weekend: WeekendType,
    /// Holidays for `Holidays` calendars
    #[serde(default)]
    pub holidays: Vec<Date>,
}

impl CalendarEntry {
    /// Builds the calendar.
    pub fn build(&self) -> Arc<dyn Calendar> {
        match self.kind {
            CalendarKind::Target2 => Arc::new(Target2Calendar),
            CalendarKind::Weekend => Arc::new(WeekendCalendar),
            CalendarKind::Holidays => {
                let mut calendar = HolidayCalendar::new(self.id.value(), self.weekend);
                for date in &self.holidays {
                    calendar.add_holiday(*date);
                }
                Arc::new(calendar)
            }
        }
    }
}

/// A security and the identifiers it is known by.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityEntry {
    /// Identifiers
    pub ids: Vec<ExternalId>,
    /// The security
    pub security: Security,
}

/// One observation of a time series.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SeriesPoint {
    /// Observation date
    pub date: Date,
    /// Value
    pub value: f64,
}

/// A historical time series.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesEntry {
    /// Series identifier
    pub id: ExternalId,
    /// Data field
    #[serde(default = "market_value")]
    pub field: String,
    /// Observations
    pub points: Vec<SeriesPoint>,
}

fn market_value() -> String {
    MARKET_VALUE.to_string()
}

/// Everything a conversion run reads, as one document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Conventions
    pub conventions: Vec<Convention>,
    /// Securities
    pub securities: Vec<SecurityEntry>,
    /// Bond and bill issuers
    pub legal_entities: Vec<LegalEntity>,
    /// Regions
    pub regions: Vec<Region>,
    /// Holiday calendars
    pub calendars: Vec<CalendarEntry>,
    /// Configuration documents by kind; each document carries a `name`
    pub config: BTreeMap<String, Vec<serde_json::Value>>,
    /// Inline quotes
    pub quotes: BTreeMap<ExternalId, f64>,
    /// CSV file of quotes (`id,value`)
    pub quotes_csv: Option<PathBuf>,
    /// Inline time series
    pub time_series: Vec<SeriesEntry>,
    /// CSV file of time series points (`id,field,date,value`)
    pub time_series_csv: Option<PathBuf>,
}

impl Environment {
    /// Parses an environment from TOML.
    pub fn from_toml(text: &str) -> SourceResult<Self> {
        toml::from_str(text).map_err(|e| SourceError::ParseError(e.to_string()))
    }

    /// Parses an environment from JSON.
    pub fn from_json(text: &str) -> SourceResult<Self> {
        serde_json::from_str(text).map_err(|e| SourceError::ParseError(e.to_string()))
    }

    /// Loads an environment file; `.json` files are read as JSON, anything
    /// else as TOML. Relative CSV paths are resolved against the file's
    /// directory.
    pub fn from_path(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SourceError::IoError(format!("{}: {e}", path.display())))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let mut environment = if is_json {
            Self::from_json(&text)?
        } else {
            Self::from_toml(&text)?
        };
        if let Some(dir) = path.parent() {
            environment.resolve_paths(dir);
        }
        Ok(environment)
    }

    fn resolve_paths(&mut self, dir: &Path) {
        for file in [&mut self.quotes_csv, &mut self.time_series_csv]
            .into_iter()
            .flatten()
        {
            if file.is_relative() {
                *file = dir.join(&*file);
            }
        }
    }

    /// Builds the sources.
    pub fn load(self) -> SourceResult<LoadedEnvironment> {
        let conventions = InMemoryConventionSource::new();
        for convention in self.conventions {
            conventions.insert(convention);
        }

        let securities = InMemorySecuritySource::new();
        for entry in self.securities {
            securities.insert(entry.ids, entry.security);
        }

        let legal_entities = InMemoryLegalEntitySource::new();
        for entity in self.legal_entities {
            legal_entities.insert(entity);
        }

        let regions = InMemoryRegionSource::new();
        for region in self.regions {
            regions.insert(region);
        }

        let holidays = InMemoryHolidaySource::new();
        for entry in &self.calendars {
            holidays.insert(entry.id.clone(), entry.build());
        }

        let config = InMemoryConfigSource::new();
        for (kind, documents) in self.config {
            for document in documents {
                config.put_named_document(kind.as_str(), document)?;
            }
        }

        let mut quotes: SnapshotDataBundle = self.quotes.into_iter().collect();
        if let Some(path) = &self.quotes_csv {
            for (id, value) in load_quotes_csv(path)?.iter() {
                quotes.insert(id.clone(), value);
            }
        }

        let time_series = InMemoryTimeSeriesSource::new();
        for entry in self.time_series {
            time_series.insert_series(
                &entry.field,
                &entry.id,
                entry.points.into_iter().map(|p| (p.date, p.value)),
            );
        }
        if let Some(path) = &self.time_series_csv {
            time_series.load_csv(path)?;
        }

        info!(
            conventions = conventions.len(),
            config_documents = config.len(),
            quotes = quotes.len(),
            "loaded environment"
        );
        Ok(LoadedEnvironment {
            conventions: Arc::new(conventions),
            securities: Arc::new(securities),
            legal_entities: Arc::new(legal_entities),
            regions: Arc::new(regions),
            holidays: Arc::new(holidays),
            config: Arc::new(config),
            time_series: Arc::new(time_series),
            quotes,
        })
    }
}

/// The sources built from an [`Environment`].
#[derive(Debug, Clone)]
pub struct LoadedEnvironment {
    /// Conventions
    pub conventions: Arc<InMemoryConventionSource>,
    /// Securities
    pub securities: Arc<InMemorySecuritySource>,
    /// Legal entities
    pub legal_entities: Arc<InMemoryLegalEntitySource>,
    /// Regions
    pub regions: Arc<InMemoryRegionSource>,
    /// Holiday calendars
    pub holidays: Arc<InMemoryHolidaySource>,
    /// Configuration documents
    pub config: Arc<InMemoryConfigSource>,
    /// Historical time series
    pub time_series: Arc<InMemoryTimeSeriesSource>,
    /// Quote snapshot
    pub quotes: SnapshotDataBundle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use curvenode_conventions::ConventionSource;
    use curvenode_traits::{
        ConfigSource, HistoricalTimeSeriesSource, HolidaySource, MarketDataBundle, RegionSource,
        VersionCorrection,
    };

    const ENV: &str = r#"
[quotes]
"OG_SYNTHETIC_TICKER~EUR_CASH_3M" = 0.035

[[calendars]]
id = "HOLIDAY~TARGET"
kind = "Target2"

[[calendars]]
id = "HOLIDAY~XMAS"
kind = "Holidays"
holidays = ["2024-12-25"]

[[regions]]
id = "FINANCIAL_REGION~EU"
name = "Euro area"
calendars = ["HOLIDAY~TARGET"]

[[conventions]]
type = "Deposit"
name = "EUR Deposit"
day_count = "ACT/360"
business_day_convention = "ModifiedFollowing"
settlement_days = 2
currency = "EUR"
region_calendar = "FINANCIAL_REGION~EU"

[[time_series]]
id = "BLOOMBERG_TICKER~CPXTEMU Index"
points = [{ date = "2023-10-01", value = 121.5 }]

[[config.DateSet]]
name = "ECB"
dates = ["2024-01-25", "2024-03-07"]
"#;

    #[test]
    fn test_toml_environment() {
        let loaded = Environment::from_toml(ENV).unwrap().load().unwrap();

        let id = ExternalId::new("OG_SYNTHETIC_TICKER", "EUR_CASH_3M");
        assert_relative_eq!(loaded.quotes.get_quote(&id).unwrap(), 0.035);
        assert!(loaded
            .conventions
            .get_convention(&ExternalId::convention("EUR Deposit"))
            .is_ok());
        assert!(loaded
            .regions
            .get_region(&ExternalId::region("EU"))
            .is_ok());

        let xmas = loaded
            .holidays
            .get_calendar(&ExternalId::new("HOLIDAY", "XMAS"))
            .unwrap();
        assert!(!xmas.is_business_day(Date::from_ymd(2024, 12, 25).unwrap()));

        let ecb = loaded
            .config
            .get_document("DateSet", "ECB", VersionCorrection::Latest)
            .unwrap();
        assert_eq!(ecb["dates"][1], "2024-03-07");

        let series = loaded
            .time_series
            .get_time_series(MARKET_VALUE, &ExternalId::new("BLOOMBERG_TICKER", "CPXTEMU Index"))
            .unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_unnamed_config_document_is_rejected() {
        let env = "[[config.DateSet]]\ndates = []\n";
        let err = Environment::from_toml(env).unwrap().load().unwrap_err();
        assert!(err.to_string().contains("has no name"));
    }

    #[test]
    fn test_relative_csv_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("quotes.csv"),
            "id,value\nOG_SYNTHETIC_TICKER~EUR_SWAP_2Y,0.021\n",
        )
        .unwrap();
        let env_path = dir.path().join("env.toml");
        std::fs::write(&env_path, "quotes_csv = \"quotes.csv\"\n").unwrap();

        let loaded = Environment::from_path(&env_path).unwrap().load().unwrap();
        let id = ExternalId::new("OG_SYNTHETIC_TICKER", "EUR_SWAP_2Y");
        assert_relative_eq!(loaded.quotes.get_quote(&id).unwrap(), 0.021);
    }
}
