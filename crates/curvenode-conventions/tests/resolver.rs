//! Convention and calendar resolution against small in-test sources.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use curvenode_conventions::*;
use curvenode_core::calendars::{BusinessDayConvention, Calendar, HolidayCalendar, Target2Calendar};
use curvenode_core::daycounts::DayCountConvention;
use curvenode_core::{Currency, Date, Tenor};
use curvenode_traits::*;

#[derive(Default)]
struct Conventions {
    items: HashMap<ExternalId, Convention>,
    calls: AtomicUsize,
}

impl ConventionSource for Conventions {
    fn get_convention(&self, id: &ExternalId) -> SourceResult<Convention> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.items
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::not_found("convention", id))
    }
}

#[derive(Default)]
struct Securities {
    items: HashMap<ExternalId, Security>,
    broken: bool,
}

impl SecuritySource for Securities {
    fn get_security(&self, ids: &ExternalIdBundle) -> SourceResult<Security> {
        if self.broken {
            return Err(SourceError::IoError("connection reset".to_string()));
        }
        ids.iter()
            .find_map(|id| self.items.get(id).cloned())
            .ok_or_else(|| SourceError::not_found("security", ids))
    }
}

fn euribor() -> IborIndexConvention {
    IborIndexConvention {
        name: "EURIBOR".to_string(),
        day_count: DayCountConvention::Act360,
        business_day_convention: BusinessDayConvention::ModifiedFollowing,
        settlement_days: 2,
        is_eom: true,
        currency: Currency::EUR,
        fixing_calendar: ExternalId::region("EU"),
        region_calendar: ExternalId::region("EU"),
        fixing_page: String::new(),
    }
}

fn resolver(conventions: Arc<Conventions>, securities: Securities) -> ConventionResolver {
    ConventionResolver::new(conventions, Arc::new(securities))
}

#[test]
fn security_path_resolves_embedded_convention() {
    let index_id = ExternalId::new("BLOOMBERG_TICKER", "EUR003M Index");
    let mut conventions = Conventions::default();
    conventions
        .items
        .insert(ExternalId::convention("EURIBOR"), euribor().into());
    let mut securities = Securities::default();
    securities.items.insert(
        index_id.clone(),
        Security::IborIndex(IborIndexSecurity {
            name: "EURIBOR 3M".to_string(),
            convention: ExternalId::convention("EURIBOR"),
            tenor: Tenor::months(3),
        }),
    );
    let conventions = Arc::new(conventions);
    let resolver = resolver(conventions.clone(), securities);

    let convention: IborIndexConvention = resolver.resolve_as(&index_id).unwrap();
    assert_eq!(convention.name, "EURIBOR");
    assert_eq!(conventions.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn legacy_fallback_on_missing_security() {
    let mut conventions = Conventions::default();
    conventions
        .items
        .insert(ExternalId::convention("EURIBOR"), euribor().into());
    let resolver = resolver(Arc::new(conventions), Securities::default());

    let reference = ExternalId::convention("EURIBOR");
    let convention = resolver
        .resolve(&reference, ConventionKind::IborIndex)
        .unwrap();
    assert_eq!(convention.name(), "EURIBOR");
}

#[test]
fn legacy_path_tried_exactly_once_and_error_names_both_ids() {
    let conventions = Arc::new(Conventions::default());
    let resolver = resolver(conventions.clone(), Securities::default());

    let reference = ExternalId::new("BLOOMBERG_TICKER", "EUR006M Index");
    let err = resolver.resolve_any(&reference).unwrap_err();

    assert_eq!(conventions.calls.load(Ordering::SeqCst), 1);
    assert!(err.is_not_found());
    let message = err.to_string();
    assert!(message.contains("security BLOOMBERG_TICKER~EUR006M Index"));
    assert!(message.contains("convention CONVENTION~EUR006M Index"));
}

#[test]
fn other_failures_do_not_fall_back() {
    let conventions = Arc::new(Conventions::default());
    let securities = Securities {
        broken: true,
        ..Securities::default()
    };
    let resolver = resolver(conventions.clone(), securities);

    let err = resolver
        .resolve_any(&ExternalId::convention("EURIBOR"))
        .unwrap_err();
    assert!(matches!(err, ConventionError::Source(SourceError::IoError(_))));
    assert_eq!(conventions.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn wrong_variant_is_a_type_mismatch() {
    let mut conventions = Conventions::default();
    conventions
        .items
        .insert(ExternalId::convention("EURIBOR"), euribor().into());
    let resolver = resolver(Arc::new(conventions), Securities::default());

    let err = resolver
        .resolve(&ExternalId::convention("EURIBOR"), ConventionKind::Deposit)
        .unwrap_err();
    assert!(matches!(err, ConventionError::TypeMismatch { .. }));
    assert!(!err.is_not_found());
}

struct Regions(HashMap<ExternalId, Region>);

impl RegionSource for Regions {
    fn get_region(&self, id: &ExternalId) -> SourceResult<Region> {
        self.0
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::not_found("region", id))
    }
}

struct Holidays(HashMap<ExternalId, Arc<dyn Calendar>>);

impl HolidaySource for Holidays {
    fn get_calendar(&self, id: &ExternalId) -> SourceResult<Arc<dyn Calendar>> {
        self.0
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::not_found("holiday", id))
    }
}

#[test]
fn region_calendars_are_joined() {
    let d = |y, m, day| Date::from_ymd(y, m, day).unwrap();
    let target = ExternalId::new("HOLIDAY", "TARGET");
    let gblo = ExternalId::new("HOLIDAY", "GBLO");
    let mut holidays: HashMap<ExternalId, Arc<dyn Calendar>> = HashMap::new();
    holidays.insert(target.clone(), Arc::new(*Target2Calendar::global()));
    holidays.insert(
        gblo.clone(),
        Arc::new(HolidayCalendar::from_dates("GBLO", vec![d(2024, 5, 27)])),
    );
    let mut regions = HashMap::new();
    for (code, calendar) in [("EU", target), ("GB", gblo)] {
        regions.insert(
            ExternalId::region(code),
            Region {
                id: ExternalId::region(code),
                name: code.to_string(),
                currency: None,
                calendars: vec![calendar],
            },
        );
    }
    let resolver = CalendarResolver::new(Arc::new(Regions(regions)), Arc::new(Holidays(holidays)));

    let joint = resolver.resolve(&ExternalId::region("EU+GB")).unwrap();
    assert!(!joint.is_business_day(d(2024, 5, 27))); // London only
    assert!(!joint.is_business_day(d(2024, 5, 1))); // TARGET only
    assert!(joint.is_business_day(d(2024, 5, 28)));

    let err = resolver.resolve(&ExternalId::region("JP")).err().unwrap();
    assert!(matches!(err, ConventionError::CalendarNotFound { .. }));
}
