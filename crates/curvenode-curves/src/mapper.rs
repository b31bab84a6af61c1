//! Curve node id mappers.
//!
//! A [`CurveNodeIdMapper`] is named configuration that tells, for each node
//! kind and tenor, how to build the market data identifier of the node's
//! instrument. Each entry is a [`CurveInstrumentProvider`]:
//!
//! - `Static`: a fixed identifier
//! - `Synthetic`: `prefix + tenor + suffix`
//! - `Future`: `prefix + month code + last digit of year + suffix` of the
//!   Nth contract expiry
//! - `RollDate`: `prefix + start tenor + "x" + start number + "x" + end number`

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use curvenode_core::calendars::WeekendCalendar;
use curvenode_core::{Date, Tenor};
use curvenode_traits::{ConfigItem, ExternalId};

use crate::error::{CurveNodeError, CurveNodeResult};
use crate::expiry::expiry_calculator;
use crate::nodes::{CurveNode, CurveNodeKind, NodeIdArgs};

/// Default market data field.
pub const MARKET_VALUE: &str = "Market_Value";

/// Field names of the per-kind maps in the legacy mapper document format,
/// sorted case-insensitively. Each is accepted as a [`CurveNodeKind`] key.
pub const LEGACY_MAPPER_NAMES: [&str; 18] = [
    "billIds",
    "bondIds",
    "calendarSwapIds",
    "cashIds",
    "continuouslyCompoundedRateIds",
    "creditSpreadIds",
    "deliverableSwapFutureIds",
    "discountFactorIds",
    "fraIds",
    "fxForwardIds",
    "fxSwapIds",
    "immFRAIds",
    "immSwapIds",
    "periodicallyCompoundedRateIds",
    "rateFutureIds",
    "swapIds",
    "threeLegBasisSwapIds",
    "zeroCouponInflationIds",
];

const MONTH_CODES: [char; 12] = ['F', 'G', 'H', 'J', 'K', 'M', 'N', 'Q', 'U', 'V', 'X', 'Z'];

/// Whether a quote is an outright level or points over another quote.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum DataFieldType {
    /// Outright level
    #[default]
    Outright,
    /// Points (e.g. FX forward points)
    Points,
}

fn market_value() -> String {
    MARKET_VALUE.to_string()
}

/// Builds the market data identifier for one mapper entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CurveInstrumentProvider {
    /// A fixed identifier.
    Static {
        /// The identifier
        id: ExternalId,
        /// Market data field
        #[serde(default = "market_value")]
        data_field: String,
        /// Quote type
        #[serde(default)]
        field_type: DataFieldType,
    },
    /// `prefix + tenor + suffix` in the given scheme.
    Synthetic {
        /// Identifier scheme
        scheme: String,
        /// Ticker prefix
        prefix: String,
        /// Ticker suffix
        #[serde(default)]
        suffix: String,
    },
    /// Exchange ticker of the Nth future after the tenor.
    Future {
        /// Identifier scheme
        scheme: String,
        /// Contract prefix
        prefix: String,
        /// Ticker suffix
        #[serde(default)]
        suffix: String,
        /// Name of the expiry calculator
        expiry_calculator: String,
    },
    /// `prefix + start tenor + "x" + start + "x" + end` in the given scheme.
    RollDate {
        /// Identifier scheme
        scheme: String,
        /// Ticker prefix
        prefix: String,
    },
}

impl CurveInstrumentProvider {
    /// Builds the identifier for a node at `tenor` on `curve_date`.
    pub fn instrument(
        &self,
        curve_date: Date,
        tenor: Tenor,
        args: NodeIdArgs,
    ) -> CurveNodeResult<ExternalId> {
        match self {
            CurveInstrumentProvider::Static { id, .. } => Ok(id.clone()),
            CurveInstrumentProvider::Synthetic {
                scheme,
                prefix,
                suffix,
            } => Ok(ExternalId::new(scheme, format!("{prefix}{tenor}{suffix}"))),
            CurveInstrumentProvider::Future {
                scheme,
                prefix,
                suffix,
                expiry_calculator: calculator_name,
            } => {
                let NodeIdArgs::Future { future_number, .. } = args else {
                    return Err(CurveNodeError::invalid_input(format!(
                        "future id provider {prefix} needs a future number"
                    )));
                };
                let calculator = expiry_calculator(calculator_name)?;
                let from = tenor.add_to(curve_date, false)?;
                let expiry = calculator.expiry_date(future_number, from, &WeekendCalendar)?;
                let month_code = MONTH_CODES[(expiry.month() - 1) as usize];
                let year_digit = expiry.year().rem_euclid(10);
                Ok(ExternalId::new(
                    scheme,
                    format!("{prefix}{month_code}{year_digit}{suffix}"),
                ))
            }
            CurveInstrumentProvider::RollDate { scheme, prefix } => {
                let NodeIdArgs::RollDate {
                    start_number,
                    end_number,
                } = args
                else {
                    return Err(CurveNodeError::invalid_input(format!(
                        "roll date id provider {prefix} needs start and end numbers"
                    )));
                };
                Ok(ExternalId::new(
                    scheme,
                    format!("{prefix}{tenor}x{start_number}x{end_number}"),
                ))
            }
        }
    }

    /// Market data field of the quote.
    pub fn data_field(&self) -> &str {
        match self {
            CurveInstrumentProvider::Static { data_field, .. } => data_field,
            _ => MARKET_VALUE,
        }
    }

    /// Quote type.
    pub fn field_type(&self) -> DataFieldType {
        match self {
            CurveInstrumentProvider::Static { field_type, .. } => *field_type,
            _ => DataFieldType::Outright,
        }
    }
}

/// Named mapping from (node kind, tenor) to instrument providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveNodeIdMapper {
    /// Configuration name
    pub name: String,
    /// Providers by node kind and tenor
    #[serde(default)]
    pub node_ids: BTreeMap<CurveNodeKind, BTreeMap<Tenor, CurveInstrumentProvider>>,
}

impl CurveNodeIdMapper {
    /// An empty mapper.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_ids: BTreeMap::new(),
        }
    }

    /// Adds a provider.
    #[must_use]
    pub fn with_provider(
        mut self,
        kind: CurveNodeKind,
        tenor: Tenor,
        provider: CurveInstrumentProvider,
    ) -> Self {
        self.node_ids.entry(kind).or_default().insert(tenor, provider);
        self
    }

    /// True if any provider is configured for `kind`.
    pub fn has_kind(&self, kind: CurveNodeKind) -> bool {
        self.node_ids.contains_key(&kind)
    }

    /// The provider for `kind` at `tenor`.
    pub fn provider(
        &self,
        kind: CurveNodeKind,
        tenor: Tenor,
    ) -> CurveNodeResult<&CurveInstrumentProvider> {
        let providers = self.node_ids.get(&kind).ok_or_else(|| {
            CurveNodeError::missing_mapping(
                &self.name,
                format!(
                    "cannot get {} node id provider for curve node id mapper called {}",
                    kind.mapper_label(),
                    self.name
                ),
            )
        })?;
        providers.get(&tenor).ok_or_else(|| {
            CurveNodeError::missing_mapping(
                &self.name,
                format!("cannot get id mapper definition for {tenor}"),
            )
        })
    }

    /// Market data identifier of a node on `curve_date`.
    pub fn identifier(&self, curve_date: Date, node: &CurveNode) -> CurveNodeResult<ExternalId> {
        let tenor = node.mapper_tenor();
        self.provider(node.kind(), tenor)?
            .instrument(curve_date, tenor, node.id_args())
    }

    /// Market data field for `kind` at `tenor`.
    pub fn data_field(&self, kind: CurveNodeKind, tenor: Tenor) -> CurveNodeResult<&str> {
        Ok(self.provider(kind, tenor)?.data_field())
    }

    /// Quote type for `kind` at `tenor`.
    pub fn data_field_type(
        &self,
        kind: CurveNodeKind,
        tenor: Tenor,
    ) -> CurveNodeResult<DataFieldType> {
        Ok(self.provider(kind, tenor)?.field_type())
    }

    /// Every configured tenor, sorted and without duplicates.
    pub fn all_tenors(&self) -> Vec<Tenor> {
        self.node_ids
            .values()
            .flat_map(|providers| providers.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl ConfigItem for CurveNodeIdMapper {
    const KIND: &'static str = "CurveNodeIdMapper";

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::IMM_QUARTERLY_EXPIRY;
    use crate::nodes::{CashNode, RateFutureNode, RollDateSwapNode};

    fn curve_date() -> Date {
        Date::from_ymd(2024, 1, 15).unwrap()
    }

    fn synthetic(prefix: &str) -> CurveInstrumentProvider {
        CurveInstrumentProvider::Synthetic {
            scheme: "OG_SYNTHETIC_TICKER".into(),
            prefix: prefix.into(),
            suffix: String::new(),
        }
    }

    fn cash_node(tenor: Tenor) -> CurveNode {
        CurveNode::Cash(CashNode {
            start_tenor: Tenor::ZERO,
            maturity_tenor: tenor,
            convention: ExternalId::convention("EUR Deposit"),
            curve_node_id_mapper_name: "EUR Mapper".into(),
            name: None,
        })
    }

    #[test]
    fn test_synthetic_identifier() {
        let mapper = CurveNodeIdMapper::new("EUR Mapper").with_provider(
            CurveNodeKind::Cash,
            Tenor::months(3),
            synthetic("EUR_CASH_"),
        );
        let id = mapper
            .identifier(curve_date(), &cash_node(Tenor::months(3)))
            .unwrap();
        assert_eq!(id.to_string(), "OG_SYNTHETIC_TICKER~EUR_CASH_3M");
        assert_eq!(
            mapper.data_field(CurveNodeKind::Cash, Tenor::months(3)).unwrap(),
            MARKET_VALUE
        );
    }

    #[test]
    fn test_missing_entries() {
        let mapper = CurveNodeIdMapper::new("EUR Mapper").with_provider(
            CurveNodeKind::Cash,
            Tenor::months(3),
            synthetic("EUR_CASH_"),
        );
        let err = mapper
            .identifier(curve_date(), &cash_node(Tenor::months(6)))
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot get id mapper definition for 6M");
        assert!(err.is_not_found());

        let err = mapper.provider(CurveNodeKind::Fra, Tenor::months(3)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot get FRA node id provider for curve node id mapper called EUR Mapper"
        );
    }

    #[test]
    fn test_future_identifier() {
        let mapper = CurveNodeIdMapper::new("EUR Mapper").with_provider(
            CurveNodeKind::RateFuture,
            Tenor::ZERO,
            CurveInstrumentProvider::Future {
                scheme: "BLOOMBERG_TICKER".into(),
                prefix: "ER".into(),
                suffix: " Comdty".into(),
                expiry_calculator: IMM_QUARTERLY_EXPIRY.into(),
            },
        );
        let node = CurveNode::RateFuture(RateFutureNode {
            future_number: 2,
            start_tenor: Tenor::ZERO,
            future_tenor: Tenor::months(3),
            underlying_tenor: Tenor::months(3),
            future_convention: ExternalId::convention("EUR STIR"),
            underlying_convention: ExternalId::convention("EURIBOR"),
            curve_node_id_mapper_name: "EUR Mapper".into(),
            name: None,
        });
        let id = mapper.identifier(curve_date(), &node).unwrap();
        assert_eq!(id.to_string(), "BLOOMBERG_TICKER~ERM4 Comdty");
    }

    #[test]
    fn test_roll_date_identifier() {
        let mapper = CurveNodeIdMapper::new("EUR Mapper").with_provider(
            CurveNodeKind::RollDateSwap,
            Tenor::ZERO,
            CurveInstrumentProvider::RollDate {
                scheme: "OG_SYNTHETIC_TICKER".into(),
                prefix: "EUR_IMM_SWAP_".into(),
            },
        );
        let node = CurveNode::RollDateSwap(RollDateSwapNode {
            start_tenor: Tenor::ZERO,
            roll_date_start_number: 1,
            roll_date_end_number: 8,
            roll_date_swap_convention: ExternalId::convention("EUR IMM Swap"),
            curve_node_id_mapper_name: "EUR Mapper".into(),
            name: None,
        });
        let id = mapper.identifier(curve_date(), &node).unwrap();
        assert_eq!(id.value(), "EUR_IMM_SWAP_0Dx1x8");
    }

    #[test]
    fn test_legacy_keys_and_tenors() {
        for name in LEGACY_MAPPER_NAMES {
            let kind: CurveNodeKind = serde_json::from_value(serde_json::json!(name)).unwrap();
            assert!(CurveNodeKind::ALL.contains(&kind));
        }
        let json = r#"{
            "name": "Legacy",
            "node_ids": {
                "cashIds": {
                    "1M": {"type": "Static", "id": "TICKER~EUR1M"},
                    "3M": {"type": "Static", "id": "TICKER~EUR3M", "field_type": "Points"}
                },
                "swap": {"1Y": {"type": "Static", "id": "TICKER~EUR1Y"}}
            }
        }"#;
        let mapper: CurveNodeIdMapper = serde_json::from_str(json).unwrap();
        assert!(mapper.has_kind(CurveNodeKind::Cash));
        assert_eq!(
            mapper.all_tenors(),
            vec![Tenor::months(1), Tenor::months(3), Tenor::years(1)]
        );
        assert_eq!(
            mapper
                .data_field_type(CurveNodeKind::Cash, Tenor::months(3))
                .unwrap(),
            DataFieldType::Points
        );
    }
}
