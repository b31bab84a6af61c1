//! Rate indices referenced by floating coupons.

use serde::{Deserialize, Serialize};

use curvenode_conventions::{IborIndexConvention, OvernightIndexConvention, PriceIndexConvention};
use curvenode_core::calendars::BusinessDayConvention;
use curvenode_core::daycounts::DayCountConvention;
use curvenode_core::{Currency, Tenor};
use curvenode_traits::ExternalId;

/// An Ibor index of a given tenor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IborIndex {
    /// Index name
    pub name: String,
    /// Currency
    pub currency: Currency,
    /// Index tenor
    pub tenor: Tenor,
    /// Business days between fixing and accrual start
    pub spot_lag: u32,
    /// Day count
    pub day_count: DayCountConvention,
    /// Business day adjustment of the fixing period end
    pub business_day_convention: BusinessDayConvention,
    /// End-of-month rule
    pub is_eom: bool,
}

impl IborIndex {
    /// Builds the index from its convention. The spot lag is the index's own,
    /// not the lag of any leg referencing it.
    pub fn from_convention(convention: &IborIndexConvention, tenor: Tenor) -> Self {
        Self {
            name: format!("{} {}", convention.name, tenor),
            currency: convention.currency,
            tenor,
            spot_lag: convention.settlement_days,
            day_count: convention.day_count,
            business_day_convention: convention.business_day_convention,
            is_eom: convention.is_eom,
        }
    }
}

/// An overnight index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvernightIndex {
    /// Index name
    pub name: String,
    /// Currency
    pub currency: Currency,
    /// Day count
    pub day_count: DayCountConvention,
    /// Days between fixing and publication
    pub publication_lag: u32,
}

impl From<&OvernightIndexConvention> for OvernightIndex {
    fn from(convention: &OvernightIndexConvention) -> Self {
        Self {
            name: convention.name.clone(),
            currency: convention.currency,
            day_count: convention.day_count,
            publication_lag: convention.publication_lag,
        }
    }
}

/// A consumer price index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceIndex {
    /// Index name
    pub name: String,
    /// Currency
    pub currency: Currency,
    /// Region whose calendar applies
    pub region: ExternalId,
}

impl From<&PriceIndexConvention> for PriceIndex {
    fn from(convention: &PriceIndexConvention) -> Self {
        Self {
            name: convention.name.clone(),
            currency: convention.currency,
            region: convention.region.clone(),
        }
    }
}
