//! EUR reference data shared by the integration tests.
//!
//! Valuation is Monday 2024-01-15 on the TARGET calendar, so spot is
//! Wednesday 2024-01-17.

#![allow(dead_code)]

use std::sync::Arc;

use curvenode_conventions::*;
use curvenode_core::calendars::{BusinessDayConvention, Target2Calendar};
use curvenode_core::daycounts::DayCountConvention;
use curvenode_core::{Currency, Date, StubType, Tenor};
use curvenode_curves::expiry::{IMM_QUARTERLY_EXPIRY, QUARTERLY_IMM_ROLL};
use curvenode_curves::prelude::*;
use curvenode_ext_file::*;
use curvenode_traits::ids::schemes;
use curvenode_traits::{ExternalId, Region, SnapshotDataBundle};

pub const MAPPER: &str = "EUR Mapper";
pub const SYNTHETIC: &str = "OG_SYNTHETIC_TICKER";

pub fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

pub fn valuation() -> Date {
    d(2024, 1, 15)
}

pub fn eu() -> ExternalId {
    ExternalId::region("EU")
}

pub fn target() -> ExternalId {
    ExternalId::new(schemes::HOLIDAY, "TARGET")
}

pub fn conv(name: &str) -> ExternalId {
    ExternalId::convention(name)
}

pub fn ticker(value: &str) -> ExternalId {
    ExternalId::new(SYNTHETIC, value)
}

// =============================================================================
// CONVENTIONS
// =============================================================================

pub fn deposit() -> DepositConvention {
    DepositConvention {
        name: "EUR Deposit".into(),
        day_count: DayCountConvention::Act360,
        business_day_convention: BusinessDayConvention::ModifiedFollowing,
        settlement_days: 2,
        is_eom: false,
        currency: Currency::EUR,
        region_calendar: eu(),
    }
}

pub fn euribor() -> IborIndexConvention {
    IborIndexConvention {
        name: "EURIBOR".into(),
        day_count: DayCountConvention::Act360,
        business_day_convention: BusinessDayConvention::ModifiedFollowing,
        settlement_days: 2,
        is_eom: true,
        currency: Currency::EUR,
        fixing_calendar: eu(),
        region_calendar: eu(),
        fixing_page: String::new(),
    }
}

pub fn fixed_leg() -> SwapFixedLegConvention {
    SwapFixedLegConvention {
        name: "EUR Fixed 1Y".into(),
        payment_tenor: Tenor::years(1),
        day_count: DayCountConvention::Thirty360E,
        business_day_convention: BusinessDayConvention::ModifiedFollowing,
        currency: Currency::EUR,
        region_calendar: eu(),
        settlement_days: 2,
        is_eom: false,
        stub_type: StubType::ShortStart,
        payment_lag: 0,
    }
}

pub fn ibor_leg(name: &str, reset_tenor: Tenor) -> VanillaIborLegConvention {
    VanillaIborLegConvention {
        name: name.into(),
        ibor_index_convention: conv("EURIBOR"),
        is_advance_fixing: true,
        reset_tenor,
        settlement_days: 2,
        is_eom: false,
        stub_type: StubType::ShortStart,
        payment_lag: 0,
    }
}

pub fn estr() -> OvernightIndexConvention {
    OvernightIndexConvention {
        name: "ESTR".into(),
        day_count: DayCountConvention::Act360,
        publication_lag: 1,
        currency: Currency::EUR,
        region_calendar: eu(),
    }
}

pub fn ois_leg() -> OisLegConvention {
    OisLegConvention {
        name: "EUR ESTR 1Y".into(),
        overnight_index_convention: conv("ESTR"),
        payment_tenor: Tenor::years(1),
        business_day_convention: BusinessDayConvention::ModifiedFollowing,
        payment_lag: 1,
        is_eom: false,
        stub_type: StubType::ShortStart,
        settlement_days: 2,
    }
}

pub fn estr_average_leg() -> OnArithmeticAverageLegConvention {
    OnArithmeticAverageLegConvention {
        name: "EUR ESTR Average 3M".into(),
        overnight_index_convention: conv("ESTR"),
        payment_tenor: Tenor::months(3),
        business_day_convention: BusinessDayConvention::ModifiedFollowing,
        payment_lag: 0,
        is_eom: false,
        stub_type: StubType::ShortStart,
        settlement_days: 2,
    }
}

/// Semi-annual payments of two compounded 3M fixings.
pub fn compounding_leg() -> CompoundingIborLegConvention {
    CompoundingIborLegConvention {
        name: "EUR 3M Euribor Compounded 6M".into(),
        ibor_index_convention: conv("EURIBOR"),
        payment_tenor: Tenor::months(6),
        compounding_type: CompoundingType::Compounding,
        composition_tenor: Tenor::months(3),
        stub_type_compound: StubType::ShortStart,
        settlement_days: 2,
        is_eom: false,
        stub_type_leg: StubType::ShortStart,
        payment_lag: 0,
    }
}

pub fn conventions() -> InMemoryConventionSource {
    InMemoryConventionSource::new()
        .with(deposit())
        .with(euribor())
        .with(fixed_leg())
        .with(ibor_leg("EUR 6M Euribor", Tenor::months(6)))
        .with(ibor_leg("EUR 3M Euribor", Tenor::months(3)))
        .with(estr())
        .with(ois_leg())
        .with(estr_average_leg())
        .with(compounding_leg())
        .with(SwapConvention {
            name: "EUR Fixed / 6M Euribor".into(),
            pay_leg_convention: conv("EUR Fixed 1Y"),
            receive_leg_convention: conv("EUR 6M Euribor"),
        })
        .with(RollDateFraConvention {
            name: "EUR IMM FRA".into(),
            index_convention: conv("EURIBOR"),
            roll_date_adjuster: QUARTERLY_IMM_ROLL.into(),
        })
        .with(InterestRateFutureConvention {
            name: "EUR 3M Future".into(),
            expiry_convention: IMM_QUARTERLY_EXPIRY.into(),
            index_convention: conv("EURIBOR"),
        })
        .with(FxSpotConvention {
            name: "EURUSD Spot".into(),
            settlement_days: 2,
            settlement_region: eu(),
        })
        .with(FxForwardAndSwapConvention {
            name: "EURUSD Forward".into(),
            spot_convention: conv("EURUSD Spot"),
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            is_eom: false,
            settlement_region: eu(),
        })
}

// =============================================================================
// SOURCES
// =============================================================================

pub struct Fixture {
    pub conventions: Arc<InMemoryConventionSource>,
    pub securities: Arc<InMemorySecuritySource>,
    pub legal_entities: Arc<InMemoryLegalEntitySource>,
    pub config: Arc<InMemoryConfigSource>,
    pub time_series: Arc<InMemoryTimeSeriesSource>,
    pub sources: ConverterSources,
}

pub fn fixture() -> Fixture {
    let conventions = Arc::new(conventions());
    let securities = Arc::new(InMemorySecuritySource::new());
    let legal_entities = Arc::new(InMemoryLegalEntitySource::new());
    let time_series = Arc::new(InMemoryTimeSeriesSource::new());
    let config = Arc::new(InMemoryConfigSource::new());
    config.put(&mapper()).unwrap();

    let regions = InMemoryRegionSource::new().with(Region {
        id: eu(),
        name: "Euro area".into(),
        currency: Some(Currency::EUR),
        calendars: vec![target()],
    });
    let holidays = InMemoryHolidaySource::new().with(target(), Arc::new(Target2Calendar));

    let sources = SourceSet {
        conventions: conventions.clone(),
        securities: securities.clone(),
        legal_entities: legal_entities.clone(),
        regions: Arc::new(regions),
        holidays: Arc::new(holidays),
        config: config.clone(),
        time_series: time_series.clone(),
    }
    .into();

    Fixture {
        conventions,
        securities,
        legal_entities,
        config,
        time_series,
        sources,
    }
}

pub fn synthetic(prefix: &str) -> CurveInstrumentProvider {
    CurveInstrumentProvider::Synthetic {
        scheme: SYNTHETIC.into(),
        prefix: prefix.into(),
        suffix: String::new(),
    }
}

pub fn mapper() -> CurveNodeIdMapper {
    CurveNodeIdMapper::new(MAPPER)
        .with_provider(CurveNodeKind::Cash, Tenor::months(3), synthetic("EUR_CASH_"))
        .with_provider(CurveNodeKind::Cash, Tenor::months(6), synthetic("EUR_CASH_"))
        .with_provider(CurveNodeKind::Swap, Tenor::years(2), synthetic("EUR_SWAP_"))
        .with_provider(CurveNodeKind::Swap, Tenor::years(5), synthetic("EUR_SWAP_"))
}

pub fn quotes() -> SnapshotDataBundle {
    SnapshotDataBundle::new()
        .with(ticker("EUR_CASH_3M"), 0.035)
        .with(ticker("EUR_CASH_6M"), 0.036)
        .with(ticker("EUR_SWAP_2Y"), 0.021)
        .with(ticker("EUR_SWAP_5Y"), 0.024)
}

// =============================================================================
// NODES
// =============================================================================

pub fn cash_node(maturity: Tenor) -> CurveNode {
    CurveNode::Cash(curvenode_curves::nodes::CashNode {
        start_tenor: Tenor::ZERO,
        maturity_tenor: maturity,
        convention: conv("EUR Deposit"),
        curve_node_id_mapper_name: MAPPER.into(),
        name: None,
    })
}

pub fn swap_node(maturity: Tenor) -> CurveNode {
    CurveNode::Swap(curvenode_curves::nodes::SwapNode {
        start_tenor: Tenor::ZERO,
        maturity_tenor: maturity,
        pay_leg_convention: conv("EUR Fixed 1Y"),
        receive_leg_convention: conv("EUR 6M Euribor"),
        curve_node_id_mapper_name: MAPPER.into(),
        name: None,
    })
}

/// Converts one node against the fixture with the standard dispatcher.
pub fn convert(
    fixture: &Fixture,
    market_data: &SnapshotDataBundle,
    node: &CurveNode,
    data_id: &ExternalId,
) -> CurveNodeResult<InstrumentDefinition> {
    let ctx = ConversionContext::new(&fixture.sources, valuation(), market_data, data_id);
    NodeConverterDispatch::standard().convert(&ctx, node)
}
