//! The render dispatcher and the refresh routine behind each category.

use std::ops::BitOr;

use web_time::Instant;

use super::UniverseEditor;
use crate::gutter::GutterController;

/// A set of layers to refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSet {
    line: bool,
    syntax: bool,
}

impl RenderSet {
    /// Refresh nothing
    pub const NONE: Self = Self { line: false, syntax: false };
    /// Active-line highlight and active gutter entry
    pub const LINE: Self = Self { line: true, syntax: false };
    /// Syntax layer and sizing
    pub const SYNTAX: Self = Self { line: false, syntax: true };
    pub const ALL: Self = Self { line: true, syntax: true };

    /// Returns `true` if every category in `other` is in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.line || !other.line) && (self.syntax || !other.syntax)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.line && !self.syntax
    }
}

impl BitOr for RenderSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self { line: self.line || rhs.line, syntax: self.syntax || rhs.syntax }
    }
}

impl UniverseEditor {
    /// Refreshes the layers in `categories`.
    ///
    /// `line` moves the active-line band and the active gutter entry.
    /// `syntax` redraws the syntax layer and recomputes sizes. Layers outside
    /// `categories` are left untouched. Calling this again with unchanged
    /// text and caret changes nothing.
    pub fn render(&mut self, categories: RenderSet) {
        tracing::trace!(?categories, "render");

        if categories.contains(RenderSet::LINE) {
            self.highlight_active_line();
            self.highlight_active_line_number();
        }

        if categories.contains(RenderSet::SYNTAX) {
            self.redraw_syntax_highlighting();
            self.adjust_size();
        }

        self.cache.clear();
    }

    /// Regenerates every gutter entry, then refreshes the active line.
    pub(crate) fn update_line_numbers(&mut self) {
        self.gutter.regenerate(self.document.line_count());
        self.render(RenderSet::LINE);
    }

    fn highlight_active_line(&mut self) {
        self.highlight.move_to(
            self.document.active_line(),
            self.metrics.line_height,
            Instant::now(),
        );
    }

    fn highlight_active_line_number(&mut self) {
        self.gutter.mark_active(self.document.active_line());
    }

    fn redraw_syntax_highlighting(&mut self) {
        self.syntax_layer.redraw(
            self.document.text(),
            self.tokenizer.as_ref(),
            self.attributes.mode,
        );
    }

    /// Sizes the input surface, the band and the gutter from the content.
    fn adjust_size(&mut self) {
        let size = self.metrics.content_size(self.document.text(), &self.placeholder);

        self.content_size = size;
        self.set_gutter_height(size.height);
        self.highlight.set_width(size.width.max(self.scrollbar.viewport_width()));
        self.scrollbar.set_content_width(size.width + crate::measure::TEXT_PADDING);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::attributes::Mode;
    use crate::syntax::tests::FailingTokenizer;
    use crate::syntax::{HighlightedLine, TokenizeError, Tokenizer};

    /// Counts calls and returns plain spans.
    struct CountingTokenizer(Rc<Cell<usize>>);

    impl Tokenizer for CountingTokenizer {
        fn tokenize(
            &self,
            text: &str,
            _language: &str,
            _mode: Mode,
        ) -> Result<Vec<HighlightedLine>, TokenizeError> {
            self.0.set(self.0.get() + 1);
            Ok(text.split('\n').map(|_| Vec::new()).collect())
        }
    }

    fn gutter_numbers(editor: &UniverseEditor) -> Vec<usize> {
        editor.gutter().entries().iter().map(|entry| entry.number).collect()
    }

    #[test]
    fn test_render_set_operations() {
        assert!(RenderSet::ALL.contains(RenderSet::LINE));
        assert!(!RenderSet::LINE.contains(RenderSet::SYNTAX));
        assert_eq!(RenderSet::LINE | RenderSet::SYNTAX, RenderSet::ALL);
        assert!(RenderSet::NONE.is_empty());
        assert!(RenderSet::default().is_empty());
    }

    #[test]
    fn test_gutter_has_one_entry_per_line() {
        for text in ["", "a", "a\n", "a\nb\nc", "\n\n\n\n"] {
            let editor = UniverseEditor::new(text, "");
            let breaks = text.matches('\n').count();
            let expected: Vec<usize> = (1..=breaks + 1).collect();
            assert_eq!(gutter_numbers(&editor), expected, "text: {text:?}");
        }
    }

    #[test]
    fn test_active_line_scenario() {
        let mut editor = UniverseEditor::new("a\nb\nc", "");
        editor.set_caret(3);

        assert_eq!(editor.active_line(), 2);
        assert_eq!(editor.gutter().active(), Some(2));
        assert_eq!(gutter_numbers(&editor), vec![1, 2, 3]);
        assert!((editor.highlight().top() - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_text_measures_placeholder() {
        let editor = UniverseEditor::new("", "").with_placeholder("-- type a query");

        assert_eq!(gutter_numbers(&editor), vec![1]);
        let expected = editor.metrics.content_size("-- type a query", "").width;
        assert!((editor.content_size().width - expected).abs() < f32::EPSILON);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut editor = UniverseEditor::new("select 1\nfrom t", "sql");
        editor.set_caret(10);

        editor.render(RenderSet::ALL);
        let gutter = editor.gutter().clone();
        let highlight = editor.highlight().clone();
        let syntax = editor.syntax_layer().clone();
        let size = editor.content_size();

        editor.render(RenderSet::ALL);
        assert_eq!(editor.gutter(), &gutter);
        assert_eq!(editor.highlight(), &highlight);
        assert_eq!(editor.syntax_layer(), &syntax);
        assert_eq!(editor.content_size(), size);
    }

    #[test]
    fn test_line_render_leaves_syntax_untouched() {
        let calls = Rc::new(Cell::new(0));
        let mut editor = UniverseEditor::with_tokenizer(
            "a\nb",
            "sql",
            Box::new(CountingTokenizer(Rc::clone(&calls))),
        );
        let after_new = calls.get();

        editor.document.set_caret(2);
        editor.render(RenderSet::LINE);
        assert_eq!(calls.get(), after_new);
        assert_eq!(editor.gutter().active(), Some(2));
    }

    #[test]
    fn test_syntax_render_leaves_line_untouched() {
        let mut editor = UniverseEditor::new("a\nb", "");
        editor.document.set_caret(2);
        editor.render(RenderSet::SYNTAX);

        // The caret moved but no line render ran yet
        assert_eq!(editor.gutter().active(), Some(1));
        assert!(editor.highlight().top().abs() < f32::EPSILON);
    }

    #[test]
    fn test_failing_tokenizer_degrades_to_plain_text() {
        let mut editor =
            UniverseEditor::with_tokenizer("select 1", "sql", Box::new(FailingTokenizer));
        editor.render(RenderSet::SYNTAX);

        assert_eq!(editor.syntax_layer().text(), "select 1");
        assert!(!editor.syntax_layer().is_highlighted());

        // Still editable afterwards
        editor.set_caret(8);
        assert_eq!(editor.active_line(), 1);
    }
}
