//! Identifier types used across curve node conversion.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::SourceError;

/// Well-known identifier schemes.
pub mod schemes {
    /// Synthetic tickers generated for curve nodes.
    pub const OG_SYNTHETIC_TICKER: &str = "OG_SYNTHETIC_TICKER";
    /// Conventions referenced by name.
    pub const CONVENTION: &str = "CONVENTION";
    /// Financial regions; values may join several regions with `+`.
    pub const FINANCIAL_REGION: &str = "FINANCIAL_REGION";
    /// Holiday calendars referenced directly by name.
    pub const HOLIDAY: &str = "HOLIDAY";
    /// Bloomberg tickers.
    pub const BLOOMBERG_TICKER: &str = "BLOOMBERG_TICKER";
    /// ISIN codes.
    pub const ISIN: &str = "ISIN";
    /// Legal entities.
    pub const LEGAL_ENTITY: &str = "LEGAL_ENTITY";
}

/// An identifier qualified by its scheme, displayed as `SCHEME~VALUE`.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExternalId {
    scheme: String,
    value: String,
}

impl ExternalId {
    /// Creates an identifier.
    pub fn new(scheme: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            value: value.into(),
        }
    }

    /// Convention identifier in the `CONVENTION` scheme.
    pub fn convention(name: impl Into<String>) -> Self {
        Self::new(schemes::CONVENTION, name)
    }

    /// Region identifier in the `FINANCIAL_REGION` scheme.
    pub fn region(code: impl Into<String>) -> Self {
        Self::new(schemes::FINANCIAL_REGION, code)
    }

    /// Parses `SCHEME~VALUE`.
    pub fn parse(s: &str) -> Result<Self, SourceError> {
        match s.split_once('~') {
            Some((scheme, value)) if !scheme.is_empty() && !value.is_empty() => {
                Ok(Self::new(scheme, value))
            }
            _ => Err(SourceError::invalid_input(format!(
                "external id '{s}' is not of the form SCHEME~VALUE"
            ))),
        }
    }

    /// The scheme.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The value within the scheme.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True if the identifier is in the given scheme.
    pub fn is_scheme(&self, scheme: &str) -> bool {
        self.scheme == scheme
    }

    /// Wraps this identifier in a single-element bundle.
    pub fn to_bundle(&self) -> ExternalIdBundle {
        ExternalIdBundle::of(self.clone())
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.scheme, self.value)
    }
}

impl FromStr for ExternalId {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ExternalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExternalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        ExternalId::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// An ordered set of identifiers that all refer to the same item.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalIdBundle(BTreeSet<ExternalId>);

impl ExternalIdBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle containing one identifier.
    pub fn of(id: ExternalId) -> Self {
        let mut ids = BTreeSet::new();
        ids.insert(id);
        Self(ids)
    }

    /// Returns a bundle with `id` added.
    #[must_use]
    pub fn with(mut self, id: ExternalId) -> Self {
        self.0.insert(id);
        self
    }

    /// True if the bundle contains `id`.
    pub fn contains(&self, id: &ExternalId) -> bool {
        self.0.contains(id)
    }

    /// The identifier in `scheme`, if any.
    pub fn get(&self, scheme: &str) -> Option<&ExternalId> {
        self.0.iter().find(|id| id.is_scheme(scheme))
    }

    /// Iterates in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ExternalId> {
        self.0.iter()
    }

    /// Number of identifiers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the bundle is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ExternalId> for ExternalIdBundle {
    fn from_iter<I: IntoIterator<Item = ExternalId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ExternalIdBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", ids.join(", "))
    }
}

/// Which version of a versioned document to read.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionCorrection {
    /// The latest version.
    #[default]
    Latest,
    /// The version current as of the given version number.
    AsOf(u32),
}

impl fmt::Display for VersionCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionCorrection::Latest => write!(f, "LATEST"),
            VersionCorrection::AsOf(v) => write!(f, "V{v}"),
        }
    }
}
