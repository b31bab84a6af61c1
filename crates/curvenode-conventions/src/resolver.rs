//! Convention resolution with fallback to legacy convention identifiers.
//!
//! A node refers to a convention through an identifier that is, in current
//! reference data, the identifier of an index or bond security carrying the
//! convention id. Older reference data stores the convention directly under
//! a `CONVENTION~name` identifier. [`ConventionResolver`] tries the security
//! path first and, only when that path reports a missing item, tries the
//! legacy identifier once.

use std::sync::Arc;

use tracing::{debug, warn};

use curvenode_traits::ids::schemes;
use curvenode_traits::{ExternalId, SecuritySource, SourceError, SourceResult};

use crate::convention::{Convention, ConventionKind, ConventionVariant};
use crate::error::{ConventionError, ConventionResult};
use crate::source::ConventionSource;

/// Resolves one named convention per call.
#[derive(Clone)]
pub struct ConventionResolver {
    conventions: Arc<dyn ConventionSource>,
    securities: Arc<dyn SecuritySource>,
}

impl ConventionResolver {
    /// Creates a resolver over the given sources.
    pub fn new(conventions: Arc<dyn ConventionSource>, securities: Arc<dyn SecuritySource>) -> Self {
        Self {
            conventions,
            securities,
        }
    }

    /// The legacy convention identifier for a reference.
    pub fn legacy_id(reference: &ExternalId) -> ExternalId {
        if reference.is_scheme(schemes::CONVENTION) {
            reference.clone()
        } else {
            ExternalId::convention(reference.value())
        }
    }

    /// Resolves a reference and checks that it is of the expected variant.
    pub fn resolve(
        &self,
        reference: &ExternalId,
        expected: ConventionKind,
    ) -> ConventionResult<Convention> {
        let convention = self.resolve_any(reference)?;
        if convention.kind() == expected {
            Ok(convention)
        } else {
            Err(ConventionError::type_mismatch(
                reference,
                expected.to_string(),
                convention.kind().to_string(),
            ))
        }
    }

    /// Resolves a reference into a concrete convention type.
    pub fn resolve_as<T: ConventionVariant>(&self, reference: &ExternalId) -> ConventionResult<T> {
        let convention = self.resolve_any(reference)?;
        T::from_convention(convention).map_err(|other| {
            ConventionError::type_mismatch(reference, T::KIND.to_string(), other.kind().to_string())
        })
    }

    /// Resolves a reference to whatever convention it names.
    pub fn resolve_any(&self, reference: &ExternalId) -> ConventionResult<Convention> {
        debug!(reference = %reference, "resolving convention");
        let mut attempted = Vec::with_capacity(3);

        match self.resolve_via_security(reference, &mut attempted) {
            Ok(convention) => return Ok(convention),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let legacy = Self::legacy_id(reference);
        warn!(
            reference = %reference,
            legacy = %legacy,
            "security-linked convention not found, trying legacy convention id"
        );
        attempted.push(format!("convention {legacy}"));
        match self.conventions.get_convention(&legacy) {
            Ok(convention) => Ok(convention),
            Err(e) if e.is_not_found() => Err(ConventionError::not_found(reference, attempted)),
            Err(e) => Err(e.into()),
        }
    }

    fn resolve_via_security(
        &self,
        reference: &ExternalId,
        attempted: &mut Vec<String>,
    ) -> SourceResult<Convention> {
        attempted.push(format!("security {reference}"));
        let security = self.securities.get_security(&reference.to_bundle())?;
        let Some(convention_id) = security.convention_id() else {
            return Err(SourceError::not_found(
                "convention",
                format!("{} security {reference}", security.type_name()),
            ));
        };
        attempted.push(format!("convention {convention_id}"));
        self.conventions.get_convention(convention_id)
    }
}

impl std::fmt::Debug for ConventionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConventionResolver").finish_non_exhaustive()
    }
}
