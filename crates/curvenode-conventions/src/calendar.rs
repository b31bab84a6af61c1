//! Calendar resolution from region and holiday references.

use std::sync::Arc;

use tracing::debug;

use curvenode_core::calendars::{Calendar, JointCalendar, WeekendCalendar};
use curvenode_traits::ids::schemes;
use curvenode_traits::{ExternalId, HolidaySource, RegionSource, SourceError};

use crate::error::{ConventionError, ConventionResult};

/// Builds business-day calendars from region or holiday identifiers.
///
/// A `FINANCIAL_REGION` identifier may join several regions with `+`
/// (e.g. `FINANCIAL_REGION~US+GB`); the result is a business day only where
/// every region's calendars agree. Any other scheme names a holiday calendar
/// directly.
#[derive(Clone)]
pub struct CalendarResolver {
    regions: Arc<dyn RegionSource>,
    holidays: Arc<dyn HolidaySource>,
}

impl CalendarResolver {
    /// Creates a resolver over the given sources.
    pub fn new(regions: Arc<dyn RegionSource>, holidays: Arc<dyn HolidaySource>) -> Self {
        Self { regions, holidays }
    }

    /// Resolves a region or calendar identifier.
    pub fn resolve(&self, id: &ExternalId) -> ConventionResult<Arc<dyn Calendar>> {
        if !id.is_scheme(schemes::FINANCIAL_REGION) {
            return self
                .holidays
                .get_calendar(id)
                .map_err(|e| calendar_error(id, e));
        }

        let mut members: Vec<Arc<dyn Calendar>> = Vec::new();
        for code in id.value().split('+').map(str::trim) {
            let region_id = ExternalId::region(code);
            let region = self
                .regions
                .get_region(&region_id)
                .map_err(|e| calendar_error(id, e))?;
            for calendar_id in &region.calendars {
                let calendar = self
                    .holidays
                    .get_calendar(calendar_id)
                    .map_err(|e| calendar_error(id, e))?;
                members.push(calendar);
            }
        }
        debug!(region = %id, calendars = members.len(), "resolved region calendar");

        Ok(match members.len() {
            0 => Arc::new(WeekendCalendar),
            1 => members.remove(0),
            _ => Arc::new(JointCalendar::new(members)),
        })
    }
}

impl std::fmt::Debug for CalendarResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarResolver").finish_non_exhaustive()
    }
}

fn calendar_error(id: &ExternalId, e: SourceError) -> ConventionError {
    if e.is_not_found() {
        ConventionError::CalendarNotFound {
            id: id.to_string(),
            reason: e.to_string(),
        }
    } else {
        ConventionError::Source(e)
    }
}
