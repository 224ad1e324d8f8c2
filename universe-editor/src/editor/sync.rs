//! Attribute synchronization.
//!
//! Each attribute refreshes only the layers that depend on it. The `code`
//! attribute defers its syntax render until layout has settled, signalled
//! by the next frame.

use super::{RenderSet, UniverseEditor};
use crate::attributes::{Attribute, Mode, parse_height};
use crate::error::Error;
use crate::theme;

impl UniverseEditor {
    /// Applies an attribute value.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use universe_editor::{Attribute, UniverseEditor};
    ///
    /// let mut editor = UniverseEditor::default();
    /// editor.set_attribute(Attribute::Language, "sql");
    /// editor.set_attribute(Attribute::Code, "SELECT 1;");
    /// assert_eq!(editor.syntax_layer().class_name(), "language-sql");
    /// ```
    pub fn set_attribute(&mut self, attribute: Attribute, value: &str) {
        tracing::debug!(%attribute, "attribute changed");

        match attribute {
            Attribute::Code => {
                self.document.set_text(value);
                self.syntax_layer.set_plain(self.document.text());
                self.update_line_numbers();
                self.layout.schedule(RenderSet::SYNTAX);
            }
            Attribute::Language => {
                self.attributes.language = value.to_string();
                self.syntax_layer.set_language(value);
                self.render(RenderSet::SYNTAX);
            }
            Attribute::Theme => {
                self.attributes.theme = value.to_string();
                self.restyle();
            }
            Attribute::Mode => match Mode::parse(value) {
                Some(mode) => {
                    self.attributes.mode = mode;
                    self.restyle();
                    self.render(RenderSet::SYNTAX);
                }
                None => tracing::warn!(value, "ignoring mode, expected `light` or `dark`"),
            },
            Attribute::Height => {
                if value.trim().is_empty() {
                    self.attributes.height = None;
                } else if let Some(height) = parse_height(value) {
                    self.attributes.height = Some(height);
                } else {
                    tracing::warn!(value, "ignoring height, expected a pixel value");
                }
            }
            Attribute::Schema => {
                self.attributes.schema = value.to_string();
            }
        }
    }

    /// Applies an attribute given by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] if `name` is not an observed
    /// attribute.
    pub fn set_attribute_by_name(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let attribute = name.parse::<Attribute>()?;
        self.set_attribute(attribute, value);
        Ok(())
    }

    /// Runs every render deferred until layout settled.
    ///
    /// [`Message::Tick`](super::Message::Tick) calls this; hosts driving the
    /// editor without [`UniverseEditor::subscription`] call it after layout.
    pub fn notify_layout_ready(&mut self) {
        let pending = self.layout.take();
        if !pending.is_empty() {
            self.render(pending);
        }
    }

    /// Returns `true` while a deferred render is waiting for layout.
    #[must_use]
    pub fn is_layout_pending(&self) -> bool {
        !self.layout.pending().is_empty()
    }

    fn restyle(&mut self) {
        self.style = theme::resolve(&self.attributes.theme, self.attributes.mode);
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_shows_plain_text_then_markup() {
        let mut editor = UniverseEditor::new("", "sql");
        editor.set_attribute(Attribute::Code, "select 1\nfrom t");

        assert_eq!(editor.content(), "select 1\nfrom t");
        assert_eq!(editor.syntax_layer().text(), "select 1\nfrom t");
        assert!(!editor.syntax_layer().is_highlighted());
        assert_eq!(editor.gutter().entries().len(), 2);
        assert!(editor.is_layout_pending());

        editor.notify_layout_ready();
        assert!(editor.syntax_layer().is_highlighted());
        assert!(!editor.is_layout_pending());
        assert!((editor.content_size().height - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_code_with_crlf_is_normalized_in_every_layer() {
        let mut editor = UniverseEditor::new("", "sql");
        editor.set_attribute(Attribute::Code, "select 1\r\nfrom t\r\n");

        assert_eq!(editor.content(), "select 1\nfrom t\n");
        assert_eq!(editor.syntax_layer().text(), "select 1\nfrom t\n");
        assert_eq!(editor.gutter().entries().len(), 3);

        editor.notify_layout_ready();
        assert_eq!(editor.syntax_layer().text(), editor.content());
        let plain = editor.metrics.content_size("select 1", "").width;
        assert!((editor.content_size().width - plain).abs() < 0.001);
    }

    #[test]
    fn test_rapid_code_changes_settle_on_last() {
        let mut editor = UniverseEditor::new("", "sql");
        for value in ["select", "select 1", "select 1\nfrom t"] {
            editor.set_attribute(Attribute::Code, value);
        }

        editor.notify_layout_ready();
        assert_eq!(editor.syntax_layer().text(), "select 1\nfrom t");
        assert_eq!(editor.gutter().entries().len(), 2);
        assert!(editor.syntax_layer().is_highlighted());

        // A second signal has nothing left to do
        let before = editor.syntax_layer().clone();
        editor.notify_layout_ready();
        assert_eq!(editor.syntax_layer(), &before);
    }

    #[test]
    fn test_language_sets_class() {
        let mut editor = UniverseEditor::default();
        editor.set_attribute(Attribute::Language, "python");

        assert_eq!(editor.syntax_layer().class_name(), "language-python");
        assert_eq!(editor.language(), "python");
    }

    #[test]
    fn test_theme_and_mode_restyle() {
        let mut editor = UniverseEditor::default();
        editor.set_attribute(Attribute::Theme, "invasion");
        assert_eq!(editor.style(), &theme::invasion(Mode::Dark));

        editor.set_attribute(Attribute::Mode, "light");
        assert_eq!(editor.attributes().mode, Mode::Light);
        assert_eq!(editor.style(), &theme::invasion(Mode::Light));

        // Unknown modes are ignored
        editor.set_attribute(Attribute::Mode, "sepia");
        assert_eq!(editor.attributes().mode, Mode::Light);
    }

    #[test]
    fn test_height_and_schema_are_stored() {
        let mut editor = UniverseEditor::default();
        editor.set_attribute(Attribute::Height, "320px");
        assert_eq!(editor.attributes().height.map(|h| h as i32), Some(320));

        editor.set_attribute(Attribute::Height, "tall");
        assert_eq!(editor.attributes().height.map(|h| h as i32), Some(320));

        editor.set_attribute(Attribute::Height, "");
        assert_eq!(editor.attributes().height, None);

        editor.set_attribute(Attribute::Schema, "{\"users\": [\"id\"]}");
        assert_eq!(editor.attributes().schema, "{\"users\": [\"id\"]}");
    }

    #[test]
    fn test_unrelated_attributes_leave_layers_alone() {
        let mut editor = UniverseEditor::new("a\nb", "sql");
        let gutter = editor.gutter().clone();
        let syntax = editor.syntax_layer().clone();

        editor.set_attribute(Attribute::Theme, "invasion");
        editor.set_attribute(Attribute::Schema, "{}");
        editor.set_attribute(Attribute::Height, "200");

        assert_eq!(editor.gutter(), &gutter);
        assert_eq!(editor.syntax_layer(), &syntax);
    }

    #[test]
    fn test_set_attribute_by_name() {
        let mut editor = UniverseEditor::default();
        assert_eq!(editor.set_attribute_by_name("language", "sql"), Ok(()));
        assert_eq!(
            editor.set_attribute_by_name("colour", "red"),
            Err(Error::UnknownAttribute("colour".to_string()))
        );
    }
}
