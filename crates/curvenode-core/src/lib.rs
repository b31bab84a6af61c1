//! # Curvenode Core
//!
//! Foundational types shared by every crate in the curve node workspace.
//!
//! - **Types**: [`Date`], [`Tenor`], [`Currency`], [`StubType`]
//! - **Day Count Conventions**: year fractions between accrual dates
//! - **Business Day Calendars**: holiday predicates and date rolling
//!
//! ## Example
//!
//! ```rust
//! use curvenode_core::prelude::*;
//!
//! let valuation = Date::from_ymd(2024, 1, 15).unwrap();
//! let calendar = Target2Calendar::global();
//!
//! let spot = calendar.settlement_date(valuation, 2);
//! let end = calendar.adjust(
//!     Tenor::months(3).add_to(spot, false).unwrap(),
//!     BusinessDayConvention::ModifiedFollowing,
//! );
//!
//! assert_eq!(spot, Date::from_ymd(2024, 1, 17).unwrap());
//! assert_eq!(end, Date::from_ymd(2024, 4, 17).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayConvention, Calendar, HolidayCalendar, JointCalendar, Target2Calendar,
        WeekendCalendar,
    };
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Currency, Date, StubType, Tenor, TenorUnit};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Currency, Date, StubType, Tenor, TenorUnit};
