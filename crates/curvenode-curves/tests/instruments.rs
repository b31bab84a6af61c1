//! Nodes whose terms come from securities, price index history or
//! roll-date and futures schedules.

mod common;

use approx::assert_relative_eq;

use common::*;
use curvenode_conventions::*;
use curvenode_core::calendars::BusinessDayConvention;
use curvenode_core::daycounts::DayCountConvention;
use curvenode_core::{Currency, Tenor};
use curvenode_curves::expiry::{IMM_QUARTERLY_EXPIRY, QUARTERLY_IMM_ROLL};
use curvenode_curves::nodes::*;
use curvenode_curves::prelude::*;
use curvenode_traits::market_data::MARKET_VALUE;
use curvenode_traits::{BillSecurity, BondSecurity, ExternalId, LegalEntity, Security};

fn bund_id() -> ExternalId {
    ExternalId::new("ISIN", "DE000BU2Z015")
}

fn schatz_id() -> ExternalId {
    ExternalId::new("ISIN", "DE000BU0E188")
}

fn germany() -> ExternalId {
    ExternalId::new("LEGAL_ENTITY", "DE")
}

fn hicp() -> ExternalId {
    ExternalId::new("BLOOMBERG_TICKER", "CPTFEMU Index")
}

fn with_government_securities(fixture: &Fixture) {
    fixture.conventions.insert(
        BondConvention {
            name: "DE Government".into(),
            settlement_days: 2,
            business_day_convention: BusinessDayConvention::Following,
            is_eom: false,
            ex_dividend_days: 1,
            schedule_from_maturity: true,
        }
        .into(),
    );
    fixture.legal_entities.insert(LegalEntity {
        id: germany(),
        name: "Federal Republic of Germany".into(),
        ratings: Vec::new(),
        region: Some(eu()),
        sector: Some("Sovereign".into()),
    });
    fixture.securities.insert(
        [bund_id()],
        Security::Bond(BondSecurity {
            name: "DBR 2.2 02/15/34".into(),
            currency: Currency::EUR,
            issuer: germany(),
            coupon_rate: 0.022,
            coupon_frequency: Tenor::years(1),
            day_count: DayCountConvention::ActActIsda,
            first_coupon: None,
            maturity: d(2034, 2, 15),
            region: eu(),
            convention: conv("DE Government"),
        }),
    );
    fixture.securities.insert(
        [schatz_id()],
        Security::Bill(BillSecurity {
            name: "BUBILL 07/17/24".into(),
            currency: Currency::EUR,
            issuer: germany(),
            maturity: d(2024, 7, 17),
            day_count: DayCountConvention::Act360,
            settlement_days: 2,
            region: eu(),
        }),
    );
}

// =============================================================================
// BONDS AND BILLS
// =============================================================================

#[test]
fn test_bond_from_security() {
    let fixture = fixture();
    with_government_securities(&fixture);
    let market_data = quotes().with(bund_id(), 0.0235);
    let node = CurveNode::Bond(BondNode {
        tenor: Tenor::years(10),
        curve_node_id_mapper_name: MAPPER.into(),
        name: None,
    });
    let instrument = convert(&fixture, &market_data, &node, &bund_id()).unwrap();
    assert_eq!(instrument.currency(), Some(Currency::EUR));
    let InstrumentDefinition::Bond(bond) = instrument else {
        panic!("expected bond");
    };
    assert_eq!(bond.issuer, "Federal Republic of Germany");
    assert_eq!(bond.sector.as_deref(), Some("Sovereign"));
    assert_eq!(bond.settlement_date, d(2024, 1, 17));
    assert_eq!(bond.ex_dividend_days, 1);
    // First accrual starts on the last coupon date before settlement.
    assert_eq!(bond.coupons.len(), 11);
    assert_eq!(bond.coupons[0].accrual_start(), d(2023, 2, 15));
    assert_eq!(bond.coupons[10].accrual_end(), d(2034, 2, 15));
    assert!(bond.coupons.iter().all(|c| c.rate_or_spread() == 0.022));
    assert_relative_eq!(bond.yield_quote, 0.0235);
}

#[test]
fn test_bill_from_security() {
    let fixture = fixture();
    with_government_securities(&fixture);
    let market_data = quotes().with(schatz_id(), 0.0385);
    let node = CurveNode::Bill(BillNode {
        tenor: Tenor::months(6),
        curve_node_id_mapper_name: MAPPER.into(),
        name: None,
    });
    let InstrumentDefinition::Bill(bill) =
        convert(&fixture, &market_data, &node, &schatz_id()).unwrap()
    else {
        panic!("expected bill");
    };
    assert_eq!(bill.settlement_date, d(2024, 1, 17));
    assert_relative_eq!(bill.accrual_factor, 182.0 / 360.0, epsilon = 1e-12);
}

#[test]
fn test_bill_maturing_before_settlement_is_rejected() {
    let fixture = fixture();
    with_government_securities(&fixture);
    let expiring = ExternalId::new("ISIN", "DE000BU0E170");
    fixture.securities.insert(
        [expiring.clone()],
        Security::Bill(BillSecurity {
            name: "BUBILL 01/16/24".into(),
            currency: Currency::EUR,
            issuer: germany(),
            maturity: d(2024, 1, 16),
            day_count: DayCountConvention::Act360,
            settlement_days: 2,
            region: eu(),
        }),
    );
    let market_data = quotes().with(expiring.clone(), 0.0385);
    let node = CurveNode::Bill(BillNode {
        tenor: Tenor::days(1),
        curve_node_id_mapper_name: MAPPER.into(),
        name: None,
    });
    let err = convert(&fixture, &market_data, &node, &expiring).unwrap_err();
    assert!(matches!(err, CurveNodeError::InvalidInput { .. }));
    assert!(err.to_string().contains("2024-01-17"));
}

#[test]
fn test_bond_node_on_bill_security_is_mismatch() {
    let fixture = fixture();
    with_government_securities(&fixture);
    let market_data = quotes().with(schatz_id(), 0.0385);
    let node = CurveNode::Bond(BondNode {
        tenor: Tenor::months(6),
        curve_node_id_mapper_name: MAPPER.into(),
        name: None,
    });
    let err = convert(&fixture, &market_data, &node, &schatz_id()).unwrap_err();
    assert!(matches!(err, CurveNodeError::ConventionTypeMismatch { .. }));
}

// =============================================================================
// INFLATION
// =============================================================================

fn with_hicp(fixture: &Fixture) {
    with_hicp_conventions(fixture);
    fixture.time_series.insert_series(
        MARKET_VALUE,
        &hicp(),
        [
            (d(2023, 9, 1), 121.5),
            (d(2023, 10, 1), 122.0),
            (d(2023, 11, 1), 123.0),
        ],
    );
}

fn with_hicp_conventions(fixture: &Fixture) {
    fixture.conventions.insert(
        PriceIndexConvention {
            name: "EU HICP".into(),
            currency: Currency::EUR,
            region: eu(),
            price_index_id: hicp(),
        }
        .into(),
    );
    fixture.conventions.insert(
        InflationLegConvention {
            name: "EUR HICP Leg".into(),
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            day_count: DayCountConvention::Act365Fixed,
            is_eom: false,
            month_lag: 3,
            spot_lag: 2,
            price_index_convention: conv("EU HICP"),
        }
        .into(),
    );
}

fn zci_node(tenor: Tenor, inflation_node_type: InflationNodeType) -> CurveNode {
    CurveNode::ZeroCouponInflation(ZeroCouponInflationNode {
        tenor,
        fixed_leg_convention: conv("EUR Fixed 1Y"),
        inflation_leg_convention: conv("EUR HICP Leg"),
        inflation_node_type,
        curve_node_id_mapper_name: MAPPER.into(),
        name: None,
    })
}

#[test]
fn test_zero_coupon_inflation_swap() {
    let fixture = fixture();
    with_hicp(&fixture);
    let id = ticker("EUR_ZCI_5Y");
    let market_data = quotes().with(id.clone(), 0.0215);

    let instrument =
        convert(&fixture, &market_data, &zci_node(Tenor::years(5), InflationNodeType::Monthly), &id)
            .unwrap();
    assert_eq!(instrument.currency(), Some(Currency::EUR));
    let InstrumentDefinition::ZeroCouponInflationSwap(monthly) = instrument else {
        panic!("expected zero-coupon inflation swap");
    };
    assert_eq!(monthly.settlement_date, d(2024, 1, 17));
    assert_eq!(monthly.payment_date, d(2029, 1, 17));
    assert_eq!(monthly.compounding_periods, 5);
    assert_eq!(monthly.reference_start_month, d(2023, 10, 1));
    assert_eq!(monthly.reference_end_month, d(2028, 10, 1));
    assert_relative_eq!(monthly.reference_start_value, 122.0);
    assert_relative_eq!(monthly.fixed_rate, 0.0215);

    let InstrumentDefinition::ZeroCouponInflationSwap(interpolated) = convert(
        &fixture,
        &market_data,
        &zci_node(Tenor::years(5), InflationNodeType::Interpolated),
        &id,
    )
    .unwrap() else {
        panic!("expected zero-coupon inflation swap");
    };
    assert_relative_eq!(
        interpolated.reference_start_value,
        122.0 + 16.0 / 31.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_inflation_needs_whole_years_and_history() {
    let fixture = fixture();
    with_hicp(&fixture);
    let id = ticker("EUR_ZCI");
    let market_data = quotes().with(id.clone(), 0.0215);
    let err = convert(
        &fixture,
        &market_data,
        &zci_node(Tenor::months(18), InflationNodeType::Monthly),
        &id,
    )
    .unwrap_err();
    assert!(matches!(err, CurveNodeError::InvalidInput { .. }));

    let bare = common::fixture();
    with_hicp_conventions(&bare);
    bare.time_series
        .insert_series(MARKET_VALUE, &hicp(), [(d(2023, 12, 1), 124.0)]);
    let err = convert(
        &bare,
        &market_data,
        &zci_node(Tenor::years(2), InflationNodeType::Monthly),
        &id,
    )
    .unwrap_err();
    // October 2023 was never published to this source.
    assert!(matches!(err, CurveNodeError::MissingMarketData { .. }));
}

// =============================================================================
// ROLL DATES AND SWAP FUTURES
// =============================================================================

#[test]
fn test_roll_date_swap() {
    let fixture = fixture();
    fixture.conventions.insert(
        RollDateSwapConvention {
            name: "EUR IMM Swap".into(),
            pay_leg_convention: conv("EUR Fixed 1Y"),
            receive_leg_convention: conv("EUR 3M Euribor"),
            roll_date_adjuster: QUARTERLY_IMM_ROLL.into(),
        }
        .into(),
    );
    let id = ticker("EUR_IMM_SWAP_1x5");
    let market_data = quotes().with(id.clone(), 0.028);
    let node = CurveNode::RollDateSwap(RollDateSwapNode {
        start_tenor: Tenor::ZERO,
        roll_date_start_number: 1,
        roll_date_end_number: 5,
        roll_date_swap_convention: conv("EUR IMM Swap"),
        curve_node_id_mapper_name: MAPPER.into(),
        name: None,
    });
    let InstrumentDefinition::Swap(swap) = convert(&fixture, &market_data, &node, &id).unwrap()
    else {
        panic!("expected swap");
    };
    assert_eq!(swap.pay_leg.start_date, d(2024, 3, 20));
    assert_eq!(swap.pay_leg.end_date, d(2025, 3, 19));
    assert_eq!(swap.pay_leg.coupons.len(), 1);
    assert_relative_eq!(swap.pay_leg.coupons[0].rate_or_spread(), 0.028);

    let ends: Vec<_> = swap
        .receive_leg
        .coupons
        .iter()
        .map(Coupon::accrual_end)
        .collect();
    assert_eq!(
        ends,
        vec![d(2024, 6, 19), d(2024, 9, 18), d(2024, 12, 18), d(2025, 3, 19)]
    );
    assert!(swap.receive_leg.coupons.iter().all(|c| c.rate_or_spread() == 0.0));
}

#[test]
fn test_deliverable_swap_future() {
    let fixture = fixture();
    fixture.conventions.insert(
        DeliverablePriceQuotedSwapFutureConvention {
            name: "EUR 2Y DSF".into(),
            expiry_convention: IMM_QUARTERLY_EXPIRY.into(),
            swap_convention: conv("EUR Fixed / 6M Euribor"),
            notional: 100_000.0,
            coupon: 0.02,
        }
        .into(),
    );
    let id = ticker("EUR_DSF_2Y_1");
    let market_data = quotes().with(id.clone(), 99.25);
    let node = CurveNode::DeliverableSwapFuture(DeliverableSwapFutureNode {
        future_number: 1,
        start_tenor: Tenor::ZERO,
        future_tenor: Tenor::months(3),
        underlying_tenor: Tenor::years(2),
        future_convention: conv("EUR 2Y DSF"),
        swap_convention: conv("EUR Fixed / 6M Euribor"),
        curve_node_id_mapper_name: MAPPER.into(),
        name: None,
    });
    let instrument = convert(&fixture, &market_data, &node, &id).unwrap();
    assert_eq!(instrument.currency(), Some(Currency::EUR));
    let InstrumentDefinition::SwapFuture(future) = instrument else {
        panic!("expected swap future");
    };
    assert_eq!(future.last_trade_date, d(2024, 3, 18));
    assert_eq!(future.delivery_date, d(2024, 3, 20));
    assert_relative_eq!(future.notional, 100_000.0);
    assert_relative_eq!(future.price, 99.25);

    let underlying = &future.underlying;
    assert_eq!(underlying.pay_leg.start_date, future.delivery_date);
    assert_eq!(underlying.pay_leg.coupons.len(), 2);
    assert!(underlying
        .pay_leg
        .coupons
        .iter()
        .all(|c| c.rate_or_spread() == 0.02));
    assert_eq!(underlying.receive_leg.coupons.len(), 4);
    assert!(underlying
        .receive_leg
        .coupons
        .iter()
        .all(|c| c.rate_or_spread() == 0.0));
}
