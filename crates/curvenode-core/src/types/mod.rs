//! Domain types for schedule construction.
//!
//! - [`Date`]: Calendar date
//! - [`Tenor`]: Relative time span added to dates
//! - [`Currency`]: ISO currency codes
//! - [`StubType`]: Irregular period placement

mod currency;
mod date;
mod stub;
mod tenor;

pub use currency::Currency;
pub use date::Date;
pub use stub::StubType;
pub use tenor::{Tenor, TenorUnit};
