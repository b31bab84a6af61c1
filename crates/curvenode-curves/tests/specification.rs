//! Curve definitions through specifications, validation and batch conversion.

mod common;

use approx::assert_relative_eq;

use common::*;
use curvenode_core::Tenor;
use curvenode_curves::date_set::DateSet;
use curvenode_curves::nodes::{CalendarSwapNode, CashNode, SwapNode};
use curvenode_curves::prelude::*;
use curvenode_traits::market_data::MARKET_VALUE;
use curvenode_traits::SnapshotDataBundle;

fn eur_definition() -> CurveDefinition {
    CurveDefinition::new(
        "EUR Discounting",
        [
            swap_node(Tenor::years(5)),
            cash_node(Tenor::months(6)),
            swap_node(Tenor::years(2)),
            cash_node(Tenor::months(3)),
        ],
    )
}

#[test]
fn test_build_and_convert_curve() {
    let fixture = fixture();
    fixture.config.put(&eur_definition()).unwrap();

    let builder = CurveSpecificationBuilder::new(fixture.config.clone());
    let specification = builder
        .build_named(valuation(), "EUR Discounting")
        .unwrap();
    assert_eq!(specification.name(), "EUR Discounting");
    assert_eq!(specification.curve_date(), valuation());

    let ids: Vec<String> = specification
        .identifiers()
        .iter()
        .map(|id| id.value().to_string())
        .collect();
    assert_eq!(ids, vec!["EUR_CASH_3M", "EUR_CASH_6M", "EUR_SWAP_2Y", "EUR_SWAP_5Y"]);
    assert!(specification
        .nodes()
        .iter()
        .all(|n| n.data_field == MARKET_VALUE && n.field_type == DataFieldType::Outright));

    let instruments = NodeConverterDispatch::standard()
        .convert_all(&fixture.sources, valuation(), &quotes(), &specification)
        .unwrap();
    let names: Vec<_> = instruments.iter().map(InstrumentDefinition::type_name).collect();
    assert_eq!(names, vec!["Cash", "Cash", "Swap", "Swap"]);
    let maturities: Vec<_> = instruments.iter().map(InstrumentDefinition::maturity).collect();
    assert!(maturities.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_batch_conversion_reports_first_failure_in_curve_order() {
    let fixture = fixture();
    let builder = CurveSpecificationBuilder::new(fixture.config.clone());
    let specification = builder.build_curve(valuation(), &eur_definition()).unwrap();

    let partial: SnapshotDataBundle = quotes()
        .iter()
        .filter(|(id, _)| !id.value().starts_with("EUR_SWAP"))
        .map(|(id, value)| (id.clone(), value))
        .collect();
    let err = NodeConverterDispatch::standard()
        .convert_all(&fixture.sources, valuation(), &partial, &specification)
        .unwrap_err();
    assert_eq!(err, CurveNodeError::missing_market_data(ticker("EUR_SWAP_2Y")));
}

#[test]
fn test_missing_definition_and_mapper() {
    let fixture = fixture();
    let builder = CurveSpecificationBuilder::new(fixture.config.clone());
    let err = builder.build_named(valuation(), "USD Discounting").unwrap_err();
    assert_eq!(err, CurveNodeError::not_found("curve definition", "USD Discounting"));

    let orphan = CurveDefinition::new(
        "Orphan",
        [CurveNode::Cash(
            CashNode {
                start_tenor: Tenor::ZERO,
                maturity_tenor: Tenor::months(3),
                convention: conv("EUR Deposit"),
                curve_node_id_mapper_name: "Missing Mapper".into(),
                name: None,
            },
        )],
    );
    let err = builder.build_curve(valuation(), &orphan).unwrap_err();
    assert_eq!(err, CurveNodeError::not_found("curve node id mapper", "Missing Mapper"));
}

#[test]
fn test_mapper_without_tenor_fails_build() {
    let fixture = fixture();
    let builder = CurveSpecificationBuilder::new(fixture.config.clone());
    let definition = CurveDefinition::new("Long", [cash_node(Tenor::years(1))]);
    let err = builder.build_curve(valuation(), &definition).unwrap_err();
    assert!(matches!(err, CurveNodeError::MissingMapping { .. }));
    assert!(err.to_string().contains("1Y"));
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_valid_curve_passes() {
    let fixture = fixture();
    let report = CurveValidator::new(fixture.sources.clone()).validate(valuation(), &eur_definition());
    assert!(report.is_valid(), "{report}");
    assert_eq!(report.nodes_checked(), 4);
    assert!(report.to_string().contains("PASSED"));
}

#[test]
fn test_validation_collects_every_problem() {
    let fixture = fixture();
    let definition = CurveDefinition::new(
        "Broken",
        [
            cash_node(Tenor::months(3)),
            cash_node(Tenor::years(1)),
            CurveNode::Swap(SwapNode {
                start_tenor: Tenor::ZERO,
                maturity_tenor: Tenor::years(2),
                pay_leg_convention: conv("EUR Fixed 1Y"),
                receive_leg_convention: conv("EUR 12M Euribor"),
                curve_node_id_mapper_name: MAPPER.into(),
                name: None,
            }),
            CurveNode::CalendarSwap(CalendarSwapNode {
                date_set_name: "ECB Dates".into(),
                start_tenor: Tenor::ZERO,
                start_date_number: 1,
                end_date_number: 2,
                swap_convention: conv("EUR Fixed / 6M Euribor"),
                curve_node_id_mapper_name: "Missing Mapper".into(),
                name: None,
            }),
        ],
    );
    let report = CurveValidator::new(fixture.sources.clone()).validate(valuation(), &definition);
    assert!(!report.is_valid());
    assert!(report.has_errors());

    let errors = report.errors();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::MissingMapping { .. })));
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::UnresolvedConvention { convention, .. } if convention.value() == "EUR 12M Euribor")));
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::MissingMapper { mapper, .. } if mapper == "Missing Mapper")));
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::MissingDateSet { date_set, .. } if date_set == "ECB Dates")));
    assert!(report.to_string().contains("FAILED"));
}

#[test]
fn test_empty_curve_warns() {
    let fixture = fixture();
    let report = CurveValidator::new(fixture.sources.clone())
        .validate(valuation(), &CurveDefinition::new("Empty", []));
    assert!(report.is_valid());
    assert!(report.has_warnings());
    assert!(matches!(report.warnings()[0], ValidationWarning::EmptyCurve));
}

// =============================================================================
// CALENDAR SWAPS
// =============================================================================

#[test]
fn test_calendar_swap_on_date_set() {
    let fixture = fixture();
    let dates = DateSet::new(
        "ECB Dates",
        [d(2024, 1, 31), d(2024, 3, 13), d(2024, 4, 17), d(2024, 6, 12)],
    );
    fixture.config.put(&dates).unwrap();

    let node = CurveNode::CalendarSwap(CalendarSwapNode {
        date_set_name: "ECB Dates".into(),
        start_tenor: Tenor::ZERO,
        start_date_number: 1,
        end_date_number: 2,
        swap_convention: conv("EUR Fixed / 6M Euribor"),
        curve_node_id_mapper_name: MAPPER.into(),
        name: None,
    });
    let market_data = quotes().with(ticker("EUR_ECB_1x2"), 0.039);
    let instrument = convert(&fixture, &market_data, &node, &ticker("EUR_ECB_1x2")).unwrap();
    let InstrumentDefinition::Swap(swap) = instrument else {
        panic!("expected swap");
    };
    assert_eq!(swap.pay_leg.start_date, d(2024, 1, 31));
    assert_eq!(swap.pay_leg.end_date, d(2024, 3, 13));
    assert_eq!(swap.pay_leg.coupons.len(), 1);
    assert_relative_eq!(swap.pay_leg.coupons[0].rate_or_spread(), 0.039);

    let far = CurveNode::CalendarSwap(CalendarSwapNode {
        date_set_name: "ECB Dates".into(),
        start_tenor: Tenor::ZERO,
        start_date_number: 4,
        end_date_number: 5,
        swap_convention: conv("EUR Fixed / 6M Euribor"),
        curve_node_id_mapper_name: MAPPER.into(),
        name: None,
    });
    let err = convert(&fixture, &market_data, &far, &ticker("EUR_ECB_1x2")).unwrap_err();
    assert!(matches!(err, CurveNodeError::InvalidInput { .. }));
}
