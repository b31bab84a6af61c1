//! Named sets of dates used by calendar swap nodes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use curvenode_core::Date;
use curvenode_traits::ConfigItem;

/// An ordered set of dates, for example central bank meeting dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSet {
    /// Configuration name
    pub name: String,
    /// Dates in ascending order
    pub dates: BTreeSet<Date>,
}

impl DateSet {
    /// Creates a date set.
    pub fn new(name: impl Into<String>, dates: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            dates: dates.into_iter().collect(),
        }
    }

    /// The `n`th date (1 = first) strictly after `date`.
    pub fn nth_after(&self, date: Date, n: u32) -> Option<Date> {
        if n == 0 {
            return None;
        }
        self.dates
            .range(date.next_day()?..)
            .nth(n as usize - 1)
            .copied()
    }
}

impl ConfigItem for DateSet {
    const KIND: &'static str = "DateSet";

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_nth_after() {
        let meetings = DateSet::new(
            "ECB meetings",
            [d(2024, 1, 25), d(2024, 3, 7), d(2024, 4, 11), d(2024, 6, 6)],
        );
        assert_eq!(meetings.nth_after(d(2024, 1, 15), 1), Some(d(2024, 1, 25)));
        assert_eq!(meetings.nth_after(d(2024, 1, 25), 1), Some(d(2024, 3, 7)));
        assert_eq!(meetings.nth_after(d(2024, 1, 15), 4), Some(d(2024, 6, 6)));
        assert_eq!(meetings.nth_after(d(2024, 1, 15), 5), None);
        assert_eq!(meetings.nth_after(d(2024, 1, 15), 0), None);
    }
}
