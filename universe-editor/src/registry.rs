//! An explicit registry of editor factories.
//!
//! Hosts create one registry at startup, define the tags they need, and
//! build editors from it. Nothing is registered as a side effect of loading
//! the crate.

use std::collections::HashMap;
use std::fmt;

use crate::editor::UniverseEditor;
use crate::error::Error;

/// Tag the default editor is registered under
pub const TAG_NAME: &str = "universe-editor";

type Factory = Box<dyn Fn() -> UniverseEditor>;

/// Maps tag names to editor factories.
#[derive(Default)]
pub struct EditorRegistry {
    factories: HashMap<String, Factory>,
}

impl fmt::Debug for EditorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&String> = self.factories.keys().collect();
        tags.sort();
        f.debug_struct("EditorRegistry").field("tags", &tags).finish()
    }
}

impl EditorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with [`TAG_NAME`] defined.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut factories: HashMap<String, Factory> = HashMap::new();
        factories.insert(TAG_NAME.to_string(), Box::new(UniverseEditor::default));
        Self { factories }
    }

    /// Registers `factory` under `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyDefined`] if `tag` is taken.
    pub fn define<F>(&mut self, tag: &str, factory: F) -> Result<(), Error>
    where
        F: Fn() -> UniverseEditor + 'static,
    {
        if self.factories.contains_key(tag) {
            return Err(Error::AlreadyDefined(tag.to_string()));
        }

        tracing::debug!(tag, "editor element defined");
        self.factories.insert(tag.to_string(), Box::new(factory));
        Ok(())
    }

    #[must_use]
    pub fn is_defined(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Builds a new editor for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedElement`] if nothing is registered under
    /// `tag`.
    pub fn create(&self, tag: &str) -> Result<UniverseEditor, Error> {
        self.factories
            .get(tag)
            .map(|factory| factory())
            .ok_or_else(|| Error::UndefinedElement(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_define_tag() {
        let registry = EditorRegistry::with_defaults();
        assert!(registry.is_defined(TAG_NAME));
        assert!(registry.create(TAG_NAME).is_ok_and(|editor| editor.content().is_empty()));
    }

    #[test]
    fn test_duplicate_define_is_rejected() {
        let mut registry = EditorRegistry::with_defaults();
        let result = registry.define(TAG_NAME, UniverseEditor::default);
        assert_eq!(result, Err(Error::AlreadyDefined(TAG_NAME.to_string())));
    }

    #[test]
    fn test_custom_factory() {
        let mut registry = EditorRegistry::new();
        assert_eq!(
            registry.define("sql-editor", || UniverseEditor::new("select 1", "sql")),
            Ok(())
        );

        let editor = registry.create("sql-editor");
        assert!(editor.is_ok_and(|editor| editor.language() == "sql"));
    }

    #[test]
    fn test_create_undefined() {
        let registry = EditorRegistry::new();
        assert!(matches!(
            registry.create("missing"),
            Err(Error::UndefinedElement(tag)) if tag == "missing"
        ));
    }
}
