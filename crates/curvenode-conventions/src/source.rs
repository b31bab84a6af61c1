//! Convention storage interface.

use curvenode_traits::{ExternalId, ExternalIdBundle, SourceError, SourceResult};

use crate::convention::Convention;

/// Trait for convention lookups.
pub trait ConventionSource: Send + Sync {
    /// Returns the convention stored under `id`.
    ///
    /// Fails with `NotFound` if there is none.
    fn get_convention(&self, id: &ExternalId) -> SourceResult<Convention>;

    /// Returns the convention matching the first identifier in the bundle that resolves.
    fn get_convention_by_bundle(&self, ids: &ExternalIdBundle) -> SourceResult<Convention> {
        for id in ids.iter() {
            match self.get_convention(id) {
                Ok(convention) => return Ok(convention),
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            }
        }
        Err(SourceError::not_found("convention", ids))
    }
}
