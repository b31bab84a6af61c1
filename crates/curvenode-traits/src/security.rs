//! Securities referenced by curve nodes and conventions.
//!
//! Index securities exist mainly to point at the convention that describes
//! the index; bonds and bills carry their own terms and an issuer reference.

use serde::{Deserialize, Serialize};

use crate::ids::ExternalId;
use curvenode_core::daycounts::DayCountConvention;
use curvenode_core::{Currency, Date, Tenor};

// =============================================================================
// INDEX SECURITIES
// =============================================================================

/// An Ibor index (e.g. EURIBOR 3M).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IborIndexSecurity {
    /// Index name
    pub name: String,
    /// Convention describing the index
    pub convention: ExternalId,
    /// Index tenor
    pub tenor: Tenor,
}

/// An overnight index (e.g. ESTR, SOFR).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvernightIndexSecurity {
    /// Index name
    pub name: String,
    /// Convention describing the index
    pub convention: ExternalId,
}

/// A consumer price index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceIndexSecurity {
    /// Index name
    pub name: String,
    /// Convention describing the index
    pub convention: ExternalId,
}

// =============================================================================
// BONDS AND BILLS
// =============================================================================

/// A fixed-coupon government or corporate bond.
///
/// A zero coupon rate or a zero coupon frequency marks a zero-coupon bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondSecurity {
    /// Description
    pub name: String,
    /// Currency
    pub currency: Currency,
    /// Issuer legal entity
    pub issuer: ExternalId,
    /// Annual coupon rate as a decimal
    pub coupon_rate: f64,
    /// Coupon period
    pub coupon_frequency: Tenor,
    /// Accrual day count
    pub day_count: DayCountConvention,
    /// First coupon date, if irregular
    #[serde(default)]
    pub first_coupon: Option<Date>,
    /// Maturity date
    pub maturity: Date,
    /// Region whose calendar governs settlement
    pub region: ExternalId,
    /// Bond convention
    pub convention: ExternalId,
}

impl BondSecurity {
    /// True if the bond pays no coupons.
    pub fn is_zero_coupon(&self) -> bool {
        self.coupon_rate == 0.0 || self.coupon_frequency.is_zero()
    }
}

/// A discount bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSecurity {
    /// Description
    pub name: String,
    /// Currency
    pub currency: Currency,
    /// Issuer legal entity
    pub issuer: ExternalId,
    /// Maturity date
    pub maturity: Date,
    /// Yield day count
    pub day_count: DayCountConvention,
    /// Settlement lag in business days
    pub settlement_days: u32,
    /// Region whose calendar governs settlement
    pub region: ExternalId,
}

/// Security variants this layer understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Security {
    /// Ibor index
    IborIndex(IborIndexSecurity),
    /// Overnight index
    OvernightIndex(OvernightIndexSecurity),
    /// Price index
    PriceIndex(PriceIndexSecurity),
    /// Coupon bond
    Bond(BondSecurity),
    /// Discount bill
    Bill(BillSecurity),
}

impl Security {
    /// Security name.
    pub fn name(&self) -> &str {
        match self {
            Security::IborIndex(s) => &s.name,
            Security::OvernightIndex(s) => &s.name,
            Security::PriceIndex(s) => &s.name,
            Security::Bond(s) => &s.name,
            Security::Bill(s) => &s.name,
        }
    }

    /// Variant name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Security::IborIndex(_) => "IborIndex",
            Security::OvernightIndex(_) => "OvernightIndex",
            Security::PriceIndex(_) => "PriceIndex",
            Security::Bond(_) => "Bond",
            Security::Bill(_) => "Bill",
        }
    }

    /// The convention embedded in the security, if it carries one.
    pub fn convention_id(&self) -> Option<&ExternalId> {
        match self {
            Security::IborIndex(s) => Some(&s.convention),
            Security::OvernightIndex(s) => Some(&s.convention),
            Security::PriceIndex(s) => Some(&s.convention),
            Security::Bond(s) => Some(&s.convention),
            Security::Bill(_) => None,
        }
    }
}

// =============================================================================
// LEGAL ENTITIES
// =============================================================================

/// A credit rating from one agency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRatingEntry {
    /// Rating agency (e.g. "Moodys")
    pub agency: String,
    /// Rating (e.g. "Aaa")
    pub rating: String,
}

/// A bond or bill issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalEntity {
    /// Identifier
    pub id: ExternalId,
    /// Name
    pub name: String,
    /// Credit ratings
    #[serde(default)]
    pub ratings: Vec<CreditRatingEntry>,
    /// Region of domicile
    #[serde(default)]
    pub region: Option<ExternalId>,
    /// Industry sector
    #[serde(default)]
    pub sector: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_tagged_json() {
        let json = r#"{
            "type": "IborIndex",
            "name": "EURIBOR 3M",
            "convention": "CONVENTION~EURIBOR",
            "tenor": "3M"
        }"#;
        let security: Security = serde_json::from_str(json).unwrap();
        assert_eq!(security.type_name(), "IborIndex");
        assert_eq!(
            security.convention_id(),
            Some(&ExternalId::convention("EURIBOR"))
        );
    }

    #[test]
    fn test_zero_coupon_bond() {
        let bond = BondSecurity {
            name: "DBR 0 02/15/32".to_string(),
            currency: Currency::EUR,
            issuer: ExternalId::new("LEGAL_ENTITY", "DE"),
            coupon_rate: 0.0,
            coupon_frequency: Tenor::years(1),
            day_count: DayCountConvention::ActActIsda,
            first_coupon: None,
            maturity: Date::from_ymd(2032, 2, 15).unwrap(),
            region: ExternalId::region("DE"),
            convention: ExternalId::convention("DE Bond"),
        };
        assert!(bond.is_zero_coupon());
        assert!(Security::Bond(bond).convention_id().is_some());
    }
}
