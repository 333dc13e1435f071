//! Named dictionary registry.
//!
//! Front ends select a dictionary by name at invocation time. Descriptors
//! are shared through [`Arc`], so every user of a registered dictionary sees
//! the same match index and it is built at most once.

use fbp_core::DictionaryDescriptor;
use fbp_core::error::{FbpError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name under which [`DictionaryRegistry::with_builtin`] registers the
/// compiled-in dictionary.
pub const BUILTIN_NAME: &str = "default";

/// Mapping from names to dictionaries with a default entry.
///
/// The first dictionary registered becomes the default unless another is
/// chosen with [`DictionaryRegistry::set_default`]. An empty name selects
/// the default.
#[derive(Debug, Clone, Default)]
pub struct DictionaryRegistry {
    entries: BTreeMap<String, Arc<DictionaryDescriptor>>,
    default: Option<String>,
}

impl DictionaryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in dictionary as [`BUILTIN_NAME`].
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(BUILTIN_NAME, DictionaryDescriptor::builtin().clone());
        registry
    }

    /// Register a dictionary, returning the one it replaces.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        dict: impl Into<Arc<DictionaryDescriptor>>,
    ) -> Option<Arc<DictionaryDescriptor>> {
        let name = name.into();
        if self.default.is_none() {
            self.default = Some(name.clone());
        }
        tracing::debug!(name = %name, "registered dictionary");
        self.entries.insert(name, dict.into())
    }

    /// Remove a dictionary.
    ///
    /// Removing the default promotes the first remaining name, in sorted
    /// order, to default.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<DictionaryDescriptor>> {
        let removed = self.entries.remove(name)?;
        if self.default.as_deref() == Some(name) {
            self.default = self.entries.keys().next().cloned();
        }
        tracing::debug!(name, "unregistered dictionary");
        Some(removed)
    }

    /// Make `name` the default dictionary.
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.entries.contains_key(name) {
            return Err(FbpError::unknown_dictionary(name));
        }
        self.default = Some(name.to_owned());
        Ok(())
    }

    /// Name of the default dictionary.
    pub fn default_name(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Look up a dictionary; an empty name selects the default.
    pub fn get(&self, name: &str) -> Option<Arc<DictionaryDescriptor>> {
        let name = if name.is_empty() {
            self.default.as_deref()?
        } else {
            name
        };
        self.entries.get(name).cloned()
    }

    /// Look up a dictionary, failing with [`FbpError::UnknownDictionary`].
    pub fn resolve(&self, name: &str) -> Result<Arc<DictionaryDescriptor>> {
        self.get(name)
            .ok_or_else(|| FbpError::unknown_dictionary(name))
    }

    /// Whether a dictionary is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered dictionaries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no dictionary is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbp_core::DictionaryLayout;

    fn small(table: &[u8]) -> DictionaryDescriptor {
        DictionaryDescriptor::new(table.to_vec(), DictionaryLayout::packed(table.len() as u16, 0))
            .unwrap()
    }

    #[test]
    fn test_builtin_is_default() {
        let registry = DictionaryRegistry::with_builtin();
        assert_eq!(registry.default_name(), Some(BUILTIN_NAME));
        let dict = registry.get("").unwrap();
        assert_eq!(dict.as_ref(), DictionaryDescriptor::builtin());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = DictionaryRegistry::new();
        assert!(registry.register("ui", small(b"ab")).is_none());
        let previous = registry.register("ui", small(b"xyz")).unwrap();
        assert_eq!(previous.entry_count(), 2);
        assert_eq!(registry.get("ui").unwrap().entry_count(), 3);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_promotes_default() {
        let mut registry = DictionaryRegistry::new();
        registry.register("logs", small(b"a"));
        registry.register("alerts", small(b"b"));
        registry.register("ui", small(b"c"));
        assert_eq!(registry.default_name(), Some("logs"));

        assert!(registry.unregister("logs").is_some());
        assert_eq!(registry.default_name(), Some("alerts"));
        assert!(registry.unregister("logs").is_none());

        registry.unregister("alerts");
        registry.unregister("ui");
        assert!(registry.is_empty());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn test_set_default_and_resolve() {
        let mut registry = DictionaryRegistry::with_builtin();
        registry.register("ui", small(b"q"));
        registry.set_default("ui").unwrap();
        assert_eq!(registry.get("").unwrap().entry_count(), 1);
        assert!(matches!(
            registry.set_default("nope"),
            Err(FbpError::UnknownDictionary { .. })
        ));
        assert!(registry.resolve("nope").is_err());
        assert_eq!(registry.names().collect::<Vec<_>>(), ["default", "ui"]);
    }

    #[test]
    fn test_shared_index() {
        let mut registry = DictionaryRegistry::new();
        registry.register("ui", small(b"ab"));
        let a = registry.get("ui").unwrap();
        let b = registry.get("ui").unwrap();
        let _ = a.match_index();
        assert!(b.is_indexed());
    }
}
