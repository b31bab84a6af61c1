//! Curve construction configuration.
//!
//! Groups named curves into calibration stages and says what role each
//! curve plays (discounting, forward projection, issuer, inflation). A
//! configuration may also name other configurations whose curves are
//! calibrated beforehand and taken as given ("exogenous").

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use curvenode_core::Tenor;
use curvenode_traits::{ConfigItem, ConfigSource, ConfigSourceExt, ExternalId};

use crate::error::{CurveNodeError, CurveNodeResult};

/// What a curve is used for in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CurveTypeConfiguration {
    /// Discounting curve for a currency or other reference.
    Discounting {
        /// Currency code or reference name
        reference: String,
    },
    /// Forward curve of an Ibor index.
    IborCurve {
        /// Ibor index convention or security
        convention: ExternalId,
        /// Index tenor
        tenor: Tenor,
    },
    /// Forward curve of an overnight index.
    OvernightCurve {
        /// Overnight index convention or security
        convention: ExternalId,
    },
    /// Issuer-specific discounting curve.
    Issuer {
        /// Issuer name
        issuer_name: String,
        /// Reference the issuer curve is built over
        underlying_reference: String,
    },
    /// Price index curve.
    Inflation {
        /// Reference name
        reference: String,
        /// Price index security or convention
        price_index: ExternalId,
    },
}

/// One calibration stage: curves solved together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveGroupConfiguration {
    /// Calibration order (lower first)
    pub order: u32,
    /// Curve name to its roles
    pub curves: BTreeMap<String, Vec<CurveTypeConfiguration>>,
}

impl CurveGroupConfiguration {
    /// Creates an empty group.
    pub fn new(order: u32) -> Self {
        Self {
            order,
            curves: BTreeMap::new(),
        }
    }

    /// Adds a role for a curve.
    #[must_use]
    pub fn with_curve(mut self, name: impl Into<String>, role: CurveTypeConfiguration) -> Self {
        self.curves.entry(name.into()).or_default().push(role);
        self
    }
}

/// Named set of curve groups and exogenous configurations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveConstructionConfiguration {
    /// Configuration name
    pub name: String,
    /// Calibration stages
    pub curve_groups: Vec<CurveGroupConfiguration>,
    /// Names of configurations calibrated beforehand
    #[serde(default)]
    pub exogenous_configurations: Vec<String>,
    /// Convexity adjustment parameter configuration, if any
    #[serde(default)]
    pub convexity_adjustment_parameters: Option<String>,
    /// Whether futures quotes are convexity adjusted
    #[serde(default)]
    pub apply_convexity_adjustment: bool,
}

impl CurveConstructionConfiguration {
    /// Creates a configuration with no exogenous configurations.
    pub fn new(name: impl Into<String>, curve_groups: Vec<CurveGroupConfiguration>) -> Self {
        Self {
            name: name.into(),
            curve_groups,
            exogenous_configurations: Vec::new(),
            convexity_adjustment_parameters: None,
            apply_convexity_adjustment: false,
        }
    }

    /// Adds an exogenous configuration name.
    #[must_use]
    pub fn with_exogenous(mut self, name: impl Into<String>) -> Self {
        self.exogenous_configurations.push(name.into());
        self
    }

    /// Curve groups in calibration order.
    pub fn ordered_groups(&self) -> Vec<&CurveGroupConfiguration> {
        let mut groups: Vec<_> = self.curve_groups.iter().collect();
        groups.sort_by_key(|g| g.order);
        groups
    }

    /// Every curve name, in calibration order, each listed once.
    pub fn all_curve_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.ordered_groups()
            .into_iter()
            .flat_map(|g| g.curves.keys())
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Loads the exogenous configurations.
    ///
    /// Only the configurations named here are loaded; their own exogenous
    /// references are left to the caller, and cycles are not detected.
    pub fn resolve_exogenous(
        &self,
        config: &dyn ConfigSource,
    ) -> CurveNodeResult<Vec<CurveConstructionConfiguration>> {
        self.exogenous_configurations
            .iter()
            .map(|name| {
                debug!(configuration = %self.name, exogenous = %name, "loading exogenous configuration");
                config.get_latest_by_name(name).map_err(|e| {
                    if e.is_not_found() {
                        CurveNodeError::not_found("curve construction configuration", name)
                    } else {
                        e.into()
                    }
                })
            })
            .collect()
    }
}

impl ConfigItem for CurveConstructionConfiguration {
    const KIND: &'static str = "CurveConstructionConfiguration";

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eur_config() -> CurveConstructionConfiguration {
        let discounting = CurveGroupConfiguration::new(1)
            .with_curve(
                "EUR ESTR",
                CurveTypeConfiguration::Discounting {
                    reference: "EUR".into(),
                },
            )
            .with_curve(
                "EUR ESTR",
                CurveTypeConfiguration::OvernightCurve {
                    convention: ExternalId::convention("ESTR"),
                },
            );
        let forwards = CurveGroupConfiguration::new(2)
            .with_curve(
                "EUR 6M",
                CurveTypeConfiguration::IborCurve {
                    convention: ExternalId::convention("EURIBOR"),
                    tenor: Tenor::months(6),
                },
            )
            .with_curve(
                "EUR 3M",
                CurveTypeConfiguration::IborCurve {
                    convention: ExternalId::convention("EURIBOR"),
                    tenor: Tenor::months(3),
                },
            );
        CurveConstructionConfiguration::new("EUR", vec![forwards, discounting])
    }

    #[test]
    fn test_curve_names_in_calibration_order() {
        let config = eur_config();
        assert_eq!(config.all_curve_names(), vec!["EUR ESTR", "EUR 3M", "EUR 6M"]);
        assert_eq!(config.ordered_groups()[0].order, 1);
    }

    #[test]
    fn test_names_are_deduplicated() {
        let mut config = eur_config();
        config.curve_groups.push(CurveGroupConfiguration::new(3).with_curve(
            "EUR 6M",
            CurveTypeConfiguration::Discounting {
                reference: "EUR".into(),
            },
        ));
        assert_eq!(config.all_curve_names(), vec!["EUR ESTR", "EUR 3M", "EUR 6M"]);
    }

    #[test]
    fn test_serde_tags() {
        let json = r#"{
            "name": "USD",
            "curve_groups": [
                {"order": 1, "curves": {"USD SOFR": [{"type": "Discounting", "reference": "USD"}]}}
            ],
            "exogenous_configurations": ["EUR"]
        }"#;
        let config: CurveConstructionConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(config.exogenous_configurations, vec!["EUR".to_string()]);
        assert!(!config.apply_convexity_adjustment);
        assert_eq!(config.all_curve_names(), vec!["USD SOFR"]);
    }
}
