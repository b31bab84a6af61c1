//! Stub placement for irregular schedule periods.

use serde::{Deserialize, Serialize};

/// Where an irregular (stub) period is placed when the payment tenor does
/// not divide the leg length exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StubType {
    /// No stub expected. Falls back to a short first period if one is needed.
    None,
    /// Short first period; schedule is rolled backwards from maturity.
    #[default]
    ShortStart,
    /// Long first period; the short first period is merged into the next one.
    LongStart,
    /// Short last period; schedule is rolled forwards from the start date.
    ShortEnd,
    /// Long last period; the short last period is merged into the previous one.
    LongEnd,
}

impl StubType {
    /// True if the schedule should be generated forwards from the start date.
    #[must_use]
    pub fn rolls_forward(&self) -> bool {
        matches!(self, StubType::ShortEnd | StubType::LongEnd)
    }

    /// True if a short stub should be merged into its neighbouring period.
    #[must_use]
    pub fn is_long(&self) -> bool {
        matches!(self, StubType::LongStart | StubType::LongEnd)
    }
}
