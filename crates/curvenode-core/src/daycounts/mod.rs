//! Day count conventions for accrual factors.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360, money market and most floating legs
//! - [`Act365Fixed`]: Actual/365 Fixed
//! - [`ActActIsda`]: Actual/Actual ISDA
//! - [`Thirty360US`]: 30/360 US (bond basis)
//! - [`Thirty360E`]: 30E/360 (Eurobond basis)
//!
//! # Usage
//!
//! ```rust
//! use curvenode_core::daycounts::{DayCount, DayCountConvention};
//! use curvenode_core::types::Date;
//! use rust_decimal::prelude::ToPrimitive;
//!
//! let dc = DayCountConvention::Act360;
//! let start = Date::from_ymd(2024, 1, 17).unwrap();
//! let end = Date::from_ymd(2024, 4, 17).unwrap();
//!
//! assert_eq!(dc.day_count(start, end), 91);
//! let tau = dc.year_fraction(start, end).to_f64().unwrap();
//! assert!((tau - 91.0 / 360.0).abs() < 1e-12);
//! ```

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::ActActIsda;
pub use thirty360::{Thirty360E, Thirty360US};

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// Trait for day count conventions.
pub trait DayCount: Send + Sync {
    /// Returns the market name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Year fraction between two dates. Negative if `end` is before `start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Number of days between two dates under this convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of the supported day count conventions.
///
/// Serialized by market name, so reference data can say `"ACT/360"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360
    #[serde(rename = "ACT/360")]
    Act360,
    /// Actual/365 Fixed
    #[serde(rename = "ACT/365F")]
    Act365Fixed,
    /// Actual/Actual ISDA
    #[serde(rename = "ACT/ACT ISDA")]
    ActActIsda,
    /// 30/360 US
    #[serde(rename = "30/360 US")]
    Thirty360US,
    /// 30E/360
    #[serde(rename = "30E/360")]
    Thirty360E,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::ActActIsda => Box::new(ActActIsda),
            DayCountConvention::Thirty360US => Box::new(Thirty360US),
            DayCountConvention::Thirty360E => Box::new(Thirty360E),
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
            DayCountConvention::Thirty360US => "30/360 US",
            DayCountConvention::Thirty360E => "30E/360",
        }
    }

    /// Year fraction as `f64`, the representation instrument definitions carry.
    #[must_use]
    pub fn accrual_factor(&self, start: Date, end: Date) -> f64 {
        self.year_fraction(start, end).to_f64().unwrap_or(0.0)
    }
}

impl DayCount for DayCountConvention {
    fn name(&self) -> &'static str {
        DayCountConvention::name(self)
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        self.to_day_count().year_fraction(start, end)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        self.to_day_count().day_count(start, end)
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(DayCountConvention::name(self))
    }
}

impl FromStr for DayCountConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_uppercase().replace(['_', '-'], " ");
        match key.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(Self::Act360),
            "ACT/365F" | "ACT/365" | "ACT/365 FIXED" | "ACTUAL/365" => Ok(Self::Act365Fixed),
            "ACT/ACT ISDA" | "ACT/ACT" | "ACTUAL/ACTUAL ISDA" => Ok(Self::ActActIsda),
            "30/360 US" | "30/360" | "30U/360" | "BOND BASIS" => Ok(Self::Thirty360US),
            "30E/360" | "30/360 ICMA" | "EUROBOND BASIS" => Ok(Self::Thirty360E),
            _ => Err(CoreError::UnknownDayCount {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "Actual/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "30/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360US
        );
        assert!("BUS/252".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&DayCountConvention::Act360).unwrap();
        assert_eq!(json, "\"ACT/360\"");
        let dc: DayCountConvention = serde_json::from_str("\"30E/360\"").unwrap();
        assert_eq!(dc, DayCountConvention::Thirty360E);
    }

    #[test]
    fn test_accrual_factor() {
        let start = Date::from_ymd(2024, 1, 17).unwrap();
        let end = Date::from_ymd(2024, 4, 17).unwrap();
        assert_relative_eq!(
            DayCountConvention::Act360.accrual_factor(start, end),
            91.0 / 360.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            DayCountConvention::Act365Fixed.accrual_factor(start, end),
            91.0 / 365.0,
            epsilon = 1e-12
        );
    }
}
