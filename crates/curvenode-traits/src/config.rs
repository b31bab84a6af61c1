//! Configuration source traits.
//!
//! Configuration documents (curve definitions, node id mappers, construction
//! configurations, date sets) are stored untyped as JSON values, keyed by a
//! kind and a name. [`ConfigItem`] ties a Rust type to its kind so callers
//! read typed values through [`ConfigSourceExt`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{SourceError, SourceResult};
use crate::ids::VersionCorrection;

/// A type that can be stored in a [`ConfigSource`].
pub trait ConfigItem: Serialize + DeserializeOwned + Send + Sync {
    /// Kind under which documents of this type are stored.
    const KIND: &'static str;

    /// Name of this document.
    fn name(&self) -> &str;
}

/// Trait for versioned configuration storage.
pub trait ConfigSource: Send + Sync {
    /// Returns the raw document of `kind` called `name` at the given version.
    fn get_document(
        &self,
        kind: &str,
        name: &str,
        version: VersionCorrection,
    ) -> SourceResult<serde_json::Value>;

    /// Names of all documents of `kind`.
    fn names(&self, kind: &str) -> Vec<String>;
}

/// Typed access to a [`ConfigSource`].
pub trait ConfigSourceExt: ConfigSource {
    /// Reads and deserializes one document.
    fn get_single<T: ConfigItem>(&self, name: &str, version: VersionCorrection) -> SourceResult<T> {
        let document = self.get_document(T::KIND, name, version)?;
        serde_json::from_value(document).map_err(|e| {
            SourceError::ParseError(format!("{} '{}': {}", T::KIND, name, e))
        })
    }

    /// Reads the latest version of a document.
    fn get_latest_by_name<T: ConfigItem>(&self, name: &str) -> SourceResult<T> {
        self.get_single(name, VersionCorrection::Latest)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSourceExt for S {}
