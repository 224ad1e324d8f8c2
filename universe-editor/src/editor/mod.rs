//! The editor widget.
//!
//! [`UniverseEditor`] owns the document and every layer derived from it.
//! Layers are refreshed through [`UniverseEditor::render`]; attributes are
//! applied through [`UniverseEditor::set_attribute`].

use iced::widget::{Id, canvas, scrollable};
use iced::{Point, Rectangle, Size};

use crate::attributes::Attributes;
use crate::document::Document;
use crate::gutter::Gutter;
use crate::highlight::ActiveLineHighlight;
use crate::keyboard::{EditorEvent, Shortcut};
use crate::measure::Metrics;
use crate::scrollbar::Scrollbar;
use crate::syntax::{SyntaxLayer, SyntectTokenizer, Tokenizer};
use crate::theme::{self, Style};

mod canvas_impl;
mod controllers;
mod render;
mod sync;
mod update;
mod view;

pub use render::RenderSet;

/// Placeholder shown (and measured) while the document is empty
pub const DEFAULT_PLACEHOLDER: &str = "Enter your code here...";

/// Messages handled by [`UniverseEditor::update`].
#[derive(Debug, Clone)]
pub enum Message {
    /// An editing or navigation shortcut
    Shortcut(Shortcut),
    /// Mouse pressed inside the input surface
    MouseClick(Point),
    /// Mouse moved while pressed
    MouseDrag(Point),
    MouseRelease,
    /// Mouse pressed outside the editor
    Blur,
    Copy,
    Cut,
    /// Read the clipboard and paste its content
    PasteFromClipboard,
    /// Insert text at the caret; empty text is ignored
    Paste(String),
    /// Animation frame. Flushes deferred renders and settles the pulse.
    Tick,
    /// The vertical scrollable moved
    Scrolled(scrollable::Viewport),
    /// Horizontal wheel scroll by a delta in pixels
    ScrolledHorizontally(f32),
    /// Horizontal scroll to an absolute offset
    ScrollTo(f32),
    /// The input surface was laid out with a new size
    ViewportResized(Size),
    /// The scrollbar track was laid out at new window bounds
    TrackLaidOut(Rectangle),
    /// An event for the host; the editor ignores it
    Emitted(EditorEvent),
}

/// Render categories waiting for the next laid-out frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LayoutSignal {
    pending: RenderSet,
}

impl LayoutSignal {
    /// Queues `categories` for the next frame. Repeated calls coalesce.
    pub(crate) fn schedule(&mut self, categories: RenderSet) {
        self.pending = self.pending | categories;
    }

    /// Takes everything queued so far.
    pub(crate) fn take(&mut self) -> RenderSet {
        std::mem::take(&mut self.pending)
    }

    pub(crate) const fn pending(&self) -> RenderSet {
        self.pending
    }
}

/// An embeddable code editor.
pub struct UniverseEditor {
    /// Text, caret and selection
    pub(crate) document: Document,
    /// Current attribute values
    pub(crate) attributes: Attributes,
    /// Resolved theme
    pub(crate) style: Style,
    pub(crate) metrics: Metrics,
    /// Line-number gutter
    pub(crate) gutter: Gutter,
    /// Band behind the active line
    pub(crate) highlight: ActiveLineHighlight,
    /// Rendered and highlighted copy of the text
    pub(crate) syntax_layer: SyntaxLayer,
    pub(crate) tokenizer: Box<dyn Tokenizer>,
    /// Renders deferred until layout has settled
    pub(crate) layout: LayoutSignal,
    /// Size of the input surface, from the size adjuster
    pub(crate) content_size: Size,
    /// Horizontal scroll state
    pub(crate) scrollbar: Scrollbar,
    pub(crate) placeholder: String,
    pub(crate) focused: bool,
    /// Mouse is currently dragging a selection
    pub(crate) is_dragging: bool,
    /// Events queued by the shortcut hooks, drained by `update`
    pub(crate) outbox: Vec<EditorEvent>,
    /// Cache for canvas rendering
    pub(crate) cache: canvas::Cache,
    /// Scrollable ID for programmatic scrolling
    pub(crate) scrollable_id: Id,
    /// Current viewport scroll position (Y offset)
    pub(crate) viewport_scroll: f32,
    /// Viewport height (visible area)
    pub(crate) viewport_height: f32,
}

impl Default for UniverseEditor {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl UniverseEditor {
    /// Creates an editor holding `code`, highlighted as `language`.
    ///
    /// The syntax layer and gutter are rendered immediately.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use universe_editor::UniverseEditor;
    ///
    /// let editor = UniverseEditor::new("SELECT * FROM users;", "sql");
    /// assert_eq!(editor.line_count(), 1);
    /// ```
    #[must_use]
    pub fn new(code: &str, language: &str) -> Self {
        Self::with_tokenizer(code, language, Box::new(SyntectTokenizer::default()))
    }

    /// Creates an editor that highlights through `tokenizer`.
    #[must_use]
    pub fn with_tokenizer(code: &str, language: &str, tokenizer: Box<dyn Tokenizer>) -> Self {
        let attributes = Attributes { language: language.to_string(), ..Attributes::default() };
        let style = theme::resolve(&attributes.theme, attributes.mode);

        let mut syntax_layer = SyntaxLayer::default();
        syntax_layer.set_language(language);

        let mut editor = Self {
            document: Document::new(code),
            attributes,
            style,
            metrics: Metrics::default(),
            gutter: Gutter::default(),
            highlight: ActiveLineHighlight::default(),
            syntax_layer,
            tokenizer,
            layout: LayoutSignal::default(),
            content_size: Size::ZERO,
            scrollbar: Scrollbar::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            focused: false,
            is_dragging: false,
            outbox: Vec::new(),
            cache: canvas::Cache::default(),
            scrollable_id: Id::unique(),
            viewport_scroll: 0.0,
            viewport_height: 600.0, // Default, will be updated
        };

        editor.render(RenderSet::SYNTAX);
        editor.update_line_numbers();
        editor
    }

    /// Sets the placeholder shown while the document is empty.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self.render(RenderSet::SYNTAX);
        self
    }

    /// Sets the initial viewport height used before the first scroll event.
    #[must_use]
    pub fn with_viewport_height(mut self, height: f32) -> Self {
        self.viewport_height = height;
        self
    }

    /// Overrides the font metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self.render(RenderSet::ALL);
        self
    }

    /// Returns the current text.
    #[must_use]
    pub fn content(&self) -> &str {
        self.document.text()
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.attributes.language
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Number of lines in the document.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.document.line_count()
    }

    /// The 1-based line holding the caret.
    #[must_use]
    pub fn active_line(&self) -> usize {
        self.document.active_line()
    }

    #[must_use]
    pub fn gutter(&self) -> &Gutter {
        &self.gutter
    }

    #[must_use]
    pub fn highlight(&self) -> &ActiveLineHighlight {
        &self.highlight
    }

    #[must_use]
    pub fn syntax_layer(&self) -> &SyntaxLayer {
        &self.syntax_layer
    }

    /// Size of the input surface computed by the last syntax render.
    #[must_use]
    pub const fn content_size(&self) -> Size {
        self.content_size
    }

    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Moves the caret to a character offset.
    pub fn set_caret(&mut self, offset: usize) {
        self.document.set_caret(offset);
        self.render(RenderSet::LINE);
    }

    /// Gives or removes focus, showing or hiding the active-line band.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        self.highlight.set_visible(focused);
        self.cache.clear();
    }

    /// Returns the subscription driving deferred renders and the pulse.
    ///
    /// Hosts must map it into their own message type and feed every
    /// [`Message::Tick`] back to [`UniverseEditor::update`]. Frames are only
    /// requested while a deferred render or a pulse is outstanding.
    pub fn subscription(&self) -> iced::Subscription<Message> {
        if self.is_layout_pending() || self.highlight.is_pulsing() {
            iced::window::frames().map(|_| Message::Tick)
        } else {
            iced::Subscription::none()
        }
    }

    /// Left edge of the text, right of the gutter.
    pub(crate) fn text_origin(&self) -> f32 {
        self.gutter.width(&self.metrics) + crate::measure::TEXT_PADDING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_editor_renders_immediately() {
        let editor = UniverseEditor::new("select 1\nfrom t", "sql");

        assert_eq!(editor.gutter().entries().len(), 2);
        assert_eq!(editor.gutter().active(), Some(1));
        assert!(editor.syntax_layer().is_highlighted());
        assert_eq!(editor.syntax_layer().text(), "select 1\nfrom t");
        assert!((editor.content_size().height - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_highlight_hidden_until_focus() {
        let mut editor = UniverseEditor::default();
        assert!(editor.highlight().opacity() < f32::EPSILON);

        editor.set_focus(true);
        assert!((editor.highlight().opacity() - 1.0).abs() < f32::EPSILON);
        editor.set_focus(false);
        assert!(editor.highlight().opacity() < f32::EPSILON);
    }

    #[test]
    fn test_layout_signal_coalesces() {
        let mut signal = LayoutSignal::default();
        signal.schedule(RenderSet::SYNTAX);
        signal.schedule(RenderSet::SYNTAX);
        signal.schedule(RenderSet::LINE);

        assert_eq!(signal.take(), RenderSet::ALL);
        assert!(signal.pending().is_empty());
    }
}
