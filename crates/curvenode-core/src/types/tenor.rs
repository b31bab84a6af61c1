//! Relative time spans ("3M", "10Y") added to anchor dates.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TenorUnit {
    /// Calendar days
    Day,
    /// Calendar weeks
    Week,
    /// Calendar months
    Month,
    /// Calendar years
    Year,
}

impl TenorUnit {
    fn suffix(self) -> char {
        match self {
            TenorUnit::Day => 'D',
            TenorUnit::Week => 'W',
            TenorUnit::Month => 'M',
            TenorUnit::Year => 'Y',
        }
    }

    /// Approximate length of one unit in thousandths of a day.
    fn milli_days(self) -> i64 {
        match self {
            TenorUnit::Day => 1_000,
            TenorUnit::Week => 7_000,
            TenorUnit::Month => 30_437,
            TenorUnit::Year => 365_250,
        }
    }
}

/// A relative time span such as `0D`, `3M` or `10Y`.
///
/// Tenors are ordered by their approximate length, so a set of tenors
/// iterates from the shortest to the longest regardless of unit. Tenors
/// with the same approximate length (`7D` and `1W`) are ordered by unit.
///
/// Serialized as its display string.
///
/// # Example
///
/// ```rust
/// use curvenode_core::types::{Date, Tenor};
///
/// let tenor: Tenor = "3M".parse().unwrap();
/// let start = Date::from_ymd(2024, 1, 17).unwrap();
/// assert_eq!(tenor.add_to(start, false).unwrap(), Date::from_ymd(2024, 4, 17).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tenor {
    amount: i32,
    unit: TenorUnit,
}

impl Tenor {
    /// The zero-length tenor.
    pub const ZERO: Tenor = Tenor::days(0);

    /// Creates a tenor from an amount and unit.
    #[must_use]
    pub const fn new(amount: i32, unit: TenorUnit) -> Self {
        Self { amount, unit }
    }

    /// A tenor of `n` days.
    #[must_use]
    pub const fn days(n: i32) -> Self {
        Self::new(n, TenorUnit::Day)
    }

    /// A tenor of `n` weeks.
    #[must_use]
    pub const fn weeks(n: i32) -> Self {
        Self::new(n, TenorUnit::Week)
    }

    /// A tenor of `n` months.
    #[must_use]
    pub const fn months(n: i32) -> Self {
        Self::new(n, TenorUnit::Month)
    }

    /// A tenor of `n` years.
    #[must_use]
    pub const fn years(n: i32) -> Self {
        Self::new(n, TenorUnit::Year)
    }

    /// Returns the amount.
    #[must_use]
    pub fn amount(&self) -> i32 {
        self.amount
    }

    /// Returns the unit.
    #[must_use]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// True if the tenor has zero length.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// True if the tenor points backwards in time.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Whole months in this tenor; day and week tenors count as zero.
    ///
    /// Fails when a year tenor is too long to count in months.
    pub fn total_months(&self) -> CoreResult<i32> {
        match self.unit {
            TenorUnit::Month => Ok(self.amount),
            TenorUnit::Year => self
                .amount
                .checked_mul(12)
                .ok_or_else(|| CoreError::invalid_tenor(self.to_string(), "too many months")),
            TenorUnit::Day | TenorUnit::Week => Ok(0),
        }
    }

    /// Adds the tenor to `date`.
    ///
    /// Day and week tenors add calendar days. Month and year tenors add
    /// months with the day clamped to the target month; when `eom` is set and
    /// `date` is the last day of its month, the result is moved to the last
    /// day of the target month.
    pub fn add_to(&self, date: Date, eom: bool) -> CoreResult<Date> {
        match self.unit {
            TenorUnit::Day => date.add_days(i64::from(self.amount)),
            TenorUnit::Week => date.add_days(7 * i64::from(self.amount)),
            TenorUnit::Month | TenorUnit::Year => {
                let shifted = date.add_months(self.total_months()?)?;
                if eom && date.is_end_of_month() {
                    Ok(shifted.end_of_month())
                } else {
                    Ok(shifted)
                }
            }
        }
    }

    /// Multiplies the tenor by an integer factor.
    pub fn times(&self, factor: i32) -> CoreResult<Self> {
        self.amount
            .checked_mul(factor)
            .map(|amount| Self::new(amount, self.unit))
            .ok_or_else(|| CoreError::invalid_tenor(self.to_string(), format!("cannot scale by {factor}")))
    }

    /// Parses a tenor string such as `3M`, `P10Y`, `ON` or `TN`.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let text = s.trim().to_uppercase();
        match text.as_str() {
            "" => return Err(CoreError::invalid_tenor(s, "empty tenor string")),
            "ON" => return Ok(Tenor::days(1)),
            "TN" => return Ok(Tenor::days(2)),
            "SN" => return Ok(Tenor::days(3)),
            _ => {}
        }
        let body = text.strip_prefix('P').unwrap_or(&text);
        let Some(unit_char) = body.chars().last() else {
            return Err(CoreError::invalid_tenor(s, "missing unit"));
        };
        let unit = match unit_char {
            'D' => TenorUnit::Day,
            'W' => TenorUnit::Week,
            'M' => TenorUnit::Month,
            'Y' => TenorUnit::Year,
            other => {
                return Err(CoreError::invalid_tenor(
                    s,
                    format!("unknown unit '{other}'"),
                ))
            }
        };
        let amount: i32 = body[..body.len() - 1]
            .parse()
            .map_err(|_| CoreError::invalid_tenor(s, "amount is not an integer"))?;
        Ok(Tenor::new(amount, unit))
    }

    fn sort_key(&self) -> i64 {
        i64::from(self.amount) * self.unit.milli_days()
    }
}

impl Default for Tenor {
    fn default() -> Self {
        Tenor::ZERO
    }
}

impl Ord for Tenor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then(self.unit.cmp(&other.unit))
            .then(self.amount.cmp(&other.amount))
    }
}

impl PartialOrd for Tenor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Tenor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tenor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Tenor::parse(&text).map_err(serde::de::Error::custom)
    }
}
