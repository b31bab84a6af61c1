//! In-memory, versioned configuration documents.

use dashmap::DashMap;
use tracing::debug;

use curvenode_traits::{ConfigItem, ConfigSource, SourceError, SourceResult, VersionCorrection};

/// Configuration documents keyed by `(kind, name)`.
///
/// Every [`put`](Self::put) of an existing document appends a new version;
/// versions are numbered from 1.
#[derive(Debug, Default)]
pub struct InMemoryConfigSource {
    documents: DashMap<(String, String), Vec<serde_json::Value>>,
}

impl InMemoryConfigSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new version of a raw document; returns its version number.
    pub fn put_document(
        &self,
        kind: impl Into<String>,
        name: impl Into<String>,
        document: serde_json::Value,
    ) -> u32 {
        let mut versions = self.documents.entry((kind.into(), name.into())).or_default();
        versions.push(document);
        versions.len() as u32
    }

    /// Stores a new version of a typed item; returns its version number.
    pub fn put<T: ConfigItem>(&self, item: &T) -> SourceResult<u32> {
        let document = serde_json::to_value(item)
            .map_err(|e| SourceError::SerializationError(format!("{} '{}': {e}", T::KIND, item.name())))?;
        Ok(self.put_document(T::KIND, item.name(), document))
    }

    /// Builder-style [`put`](Self::put).
    pub fn with<T: ConfigItem>(self, item: &T) -> SourceResult<Self> {
        self.put(item)?;
        Ok(self)
    }

    /// Stores a raw document, taking its name from its `name` field.
    pub fn put_named_document(
        &self,
        kind: impl Into<String>,
        document: serde_json::Value,
    ) -> SourceResult<u32> {
        let kind = kind.into();
        let name = document
            .get("name")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| SourceError::invalid_input(format!("{kind} document has no name")))?;
        Ok(self.put_document(kind, name, document))
    }

    /// Number of stored documents (all versions counted once).
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ConfigSource for InMemoryConfigSource {
    fn get_document(
        &self,
        kind: &str,
        name: &str,
        version: VersionCorrection,
    ) -> SourceResult<serde_json::Value> {
        let not_found = || SourceError::not_found(kind, format!("{name} ({version})"));
        let versions = self
            .documents
            .get(&(kind.to_string(), name.to_string()))
            .ok_or_else(not_found)?;
        let document = match version {
            VersionCorrection::Latest => versions.last(),
            VersionCorrection::AsOf(0) => None,
            VersionCorrection::AsOf(v) => versions
                .get((v as usize).min(versions.len()).saturating_sub(1)),
        };
        debug!(kind, name, %version, found = document.is_some(), "config lookup");
        document.cloned().ok_or_else(not_found)
    }

    fn names(&self, kind: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .documents
            .iter()
            .filter(|e| e.key().0 == kind)
            .map(|e| e.key().1.clone())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvenode_traits::ConfigSourceExt;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        name: String,
        text: String,
    }

    impl ConfigItem for Note {
        const KIND: &'static str = "Note";

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn note(text: &str) -> Note {
        Note {
            name: "greeting".into(),
            text: text.into(),
        }
    }

    #[test]
    fn test_versions() {
        let source = InMemoryConfigSource::new();
        assert_eq!(source.put(&note("hello")).unwrap(), 1);
        assert_eq!(source.put(&note("bonjour")).unwrap(), 2);

        let latest: Note = source.get_latest_by_name("greeting").unwrap();
        assert_eq!(latest.text, "bonjour");
        let first: Note = source
            .get_single("greeting", VersionCorrection::AsOf(1))
            .unwrap();
        assert_eq!(first.text, "hello");
        let later: Note = source
            .get_single("greeting", VersionCorrection::AsOf(7))
            .unwrap();
        assert_eq!(later.text, "bonjour");
        assert!(source
            .get_document("Note", "greeting", VersionCorrection::AsOf(0))
            .unwrap_err()
            .is_not_found());
        assert_eq!(source.names("Note"), vec!["greeting".to_string()]);
    }

    #[test]
    fn test_named_document() {
        let source = InMemoryConfigSource::new();
        source
            .put_named_document("Note", serde_json::json!({"name": "n", "text": "t"}))
            .unwrap();
        assert!(source
            .put_named_document("Note", serde_json::json!({"text": "t"}))
            .is_err());
        let missing = source.get_latest_by_name::<Note>("other").unwrap_err();
        assert!(missing.is_not_found());
    }
}
