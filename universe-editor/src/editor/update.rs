//! Message handling and update logic.

use iced::widget::operation::scroll_to;
use iced::widget::scrollable;
use iced::{Point, Task};
use web_time::Instant;

use super::{Message, RenderSet, UniverseEditor};
use crate::document::normalize_line_endings;
use crate::keyboard;
use crate::measure::CARET_WIDTH;
use crate::scrollbar::{self, ScrollbarController};

impl UniverseEditor {
    /// Updates the editor state based on messages and returns scroll commands.
    ///
    /// Events queued for the host come back as [`Message::Emitted`].
    ///
    /// # Arguments
    ///
    /// * `message` - The message to process
    pub fn update(&mut self, message: &Message) -> Task<Message> {
        let task = match message {
            Message::Shortcut(shortcut) => {
                keyboard::perform(self, *shortcut);
                self.reveal_caret();
                self.scroll_to_caret()
            }
            Message::MouseClick(point) => {
                self.set_focus(true);
                let offset = self.offset_at(*point);
                self.document.set_caret(offset);
                self.is_dragging = true;
                self.render(RenderSet::LINE);
                Task::none()
            }
            Message::MouseDrag(point) => {
                if self.is_dragging {
                    let offset = self.offset_at(*point);
                    self.document.extend_to(offset);
                    self.render(RenderSet::LINE);
                }
                Task::none()
            }
            Message::MouseRelease => {
                self.is_dragging = false;
                Task::none()
            }
            Message::Blur => {
                self.is_dragging = false;
                self.set_focus(false);
                Task::none()
            }
            Message::Copy => self.copy_selection(),
            Message::Cut => {
                let task = self.copy_selection();
                if self.document.delete_selection() {
                    keyboard::text_changed(self);
                }
                task
            }
            Message::PasteFromClipboard => iced::clipboard::read().and_then(|text| {
                if text.is_empty() { Task::none() } else { Task::done(Message::Paste(text)) }
            }),
            Message::Paste(text) => {
                if text.is_empty() {
                    Task::none()
                } else {
                    self.document.insert(&normalize_line_endings(text));
                    keyboard::text_changed(self);
                    self.reveal_caret();
                    self.scroll_to_caret()
                }
            }
            Message::Tick => {
                self.notify_layout_ready();
                if self.highlight.settle(Instant::now()) {
                    self.cache.clear();
                }
                Task::none()
            }
            Message::Scrolled(viewport) => {
                self.viewport_scroll = viewport.absolute_offset().y;
                let new_height = viewport.bounds().height;
                if (self.viewport_height - new_height).abs() > 1.0 {
                    self.cache.clear();
                }
                self.viewport_height = new_height;
                Task::none()
            }
            Message::ScrolledHorizontally(delta) => {
                scrollbar::scroll_by(self, *delta);
                Task::none()
            }
            Message::ScrollTo(offset) => {
                self.scroll_horizontally_to(*offset);
                Task::none()
            }
            Message::ViewportResized(size) => {
                self.scrollbar.set_viewport_width(size.width - self.text_origin());
                self.highlight
                    .set_width(self.content_size.width.max(self.scrollbar.viewport_width()));
                self.cache.clear();
                Task::none()
            }
            Message::TrackLaidOut(bounds) => {
                self.scrollbar.set_track_bounds(*bounds);
                Task::none()
            }
            Message::Emitted(_) => Task::none(),
        };

        Task::batch([task, self.drain_events()])
    }

    /// Turns every queued [`EditorEvent`](crate::keyboard::EditorEvent) into
    /// a task.
    fn drain_events(&mut self) -> Task<Message> {
        if self.outbox.is_empty() {
            return Task::none();
        }
        Task::batch(
            self.outbox
                .drain(..)
                .map(|event| Task::done(Message::Emitted(event)))
                .collect::<Vec<_>>(),
        )
    }

    /// Copies selected text to clipboard.
    fn copy_selection(&self) -> Task<Message> {
        match self.document.selected_text() {
            Some(text) => iced::clipboard::write(text.to_string()),
            None => Task::none(),
        }
    }

    /// Character offset under a point of the input surface.
    pub(crate) fn offset_at(&self, point: Point) -> usize {
        let line = ((point.y / self.metrics.line_height).max(0.0) as usize)
            .min(self.document.line_count() - 1);
        let x = point.x - self.text_origin() + self.scrollbar.offset();
        let column = self.metrics.column_at(self.document.line(line), x);

        self.document.offset_of(line, column)
    }

    /// Horizontal position of the caret within the text, before scrolling.
    pub(crate) fn caret_x(&self) -> f32 {
        let (line, column) = self.document.position();
        self.metrics.prefix_width(self.document.line(line), column)
    }

    /// Scrolls horizontally so the caret stays in view.
    fn reveal_caret(&mut self) {
        let x = self.caret_x();
        if self.scrollbar.reveal(x, x + CARET_WIDTH + self.metrics.char_width) {
            self.cache.clear();
        }
    }

    /// Returns a scroll command keeping the caret line in the viewport.
    fn scroll_to_caret(&self) -> Task<Message> {
        let line_height = self.metrics.line_height;
        let caret_y = self.document.position().0 as f32 * line_height;

        let viewport_top = self.viewport_scroll;
        let viewport_bottom = self.viewport_scroll + self.viewport_height;

        // Keep a margin so the caret is never exactly at the edge
        let margin = line_height * 2.0;

        let new_scroll = if caret_y < viewport_top + margin {
            (caret_y - margin).max(0.0)
        } else if caret_y + line_height > viewport_bottom - margin {
            caret_y + line_height + margin - self.viewport_height
        } else {
            return Task::none();
        };

        if (new_scroll - self.viewport_scroll).abs() < f32::EPSILON {
            return Task::none();
        }

        scroll_to(
            self.scrollable_id.clone(),
            scrollable::AbsoluteOffset { x: 0.0, y: new_scroll },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Motion;
    use crate::keyboard::{EditorEvent, Shortcut};

    fn click_point(editor: &UniverseEditor, line: usize, column: usize) -> Point {
        let metrics = editor.metrics;
        Point::new(
            editor.text_origin() + column as f32 * metrics.char_width + 1.0,
            line as f32 * metrics.line_height + metrics.line_height / 2.0,
        )
    }

    #[test]
    fn test_typing_updates_every_layer() {
        let mut editor = UniverseEditor::new("select", "sql");
        editor.set_caret(6);
        let _ = editor.update(&Message::Shortcut(Shortcut::Newline));
        let _ = editor.update(&Message::Shortcut(Shortcut::Type('x')));

        assert_eq!(editor.content(), "select\nx");
        assert_eq!(editor.gutter().entries().len(), 2);
        assert_eq!(editor.gutter().active(), Some(2));
        assert_eq!(editor.syntax_layer().text(), "select\nx");
        assert!(editor.outbox.is_empty());
    }

    #[test]
    fn test_mouse_click_focuses_and_places_caret() {
        let mut editor = UniverseEditor::new("ab\ncdef", "");
        let point = click_point(&editor, 1, 2);
        let _ = editor.update(&Message::MouseClick(point));

        assert!(editor.is_focused());
        assert_eq!(editor.document().caret(), 5);
        assert_eq!(editor.gutter().active(), Some(2));
        assert!((editor.highlight().opacity() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mouse_drag_selects() {
        let mut editor = UniverseEditor::new("hello world", "");
        let _ = editor.update(&Message::MouseClick(click_point(&editor, 0, 0)));
        let _ = editor.update(&Message::MouseDrag(click_point(&editor, 0, 5)));
        let _ = editor.update(&Message::MouseRelease);

        assert_eq!(editor.document().selected_text(), Some("hello"));

        // Moves after release no longer extend the selection
        let _ = editor.update(&Message::MouseDrag(click_point(&editor, 0, 8)));
        assert_eq!(editor.document().selected_text(), Some("hello"));
    }

    #[test]
    fn test_blur_hides_highlight() {
        let mut editor = UniverseEditor::new("a", "");
        let _ = editor.update(&Message::MouseClick(click_point(&editor, 0, 0)));
        let _ = editor.update(&Message::Blur);

        assert!(!editor.is_focused());
        assert!(editor.highlight().opacity() < f32::EPSILON);
    }

    #[test]
    fn test_paste_and_cut() {
        let mut editor = UniverseEditor::new("", "sql");
        let _ = editor.update(&Message::Paste("select 1\r\nfrom t".to_string()));
        assert_eq!(editor.content(), "select 1\nfrom t");
        assert_eq!(editor.gutter().entries().len(), 2);

        editor.document.select(0, 9);
        let _ = editor.update(&Message::Cut);
        assert_eq!(editor.content(), "from t");
        assert_eq!(editor.gutter().entries().len(), 1);
    }

    #[test]
    fn test_empty_paste_does_nothing() {
        let mut editor = UniverseEditor::new("select", "sql");
        editor.set_caret(6);

        let task = editor.update(&Message::Paste(String::new()));
        assert_eq!(task.units(), 0);
        assert_eq!(editor.content(), "select");
        assert!(editor.outbox.is_empty());
    }

    #[test]
    fn test_paste_from_clipboard_reads_once() {
        let mut editor = UniverseEditor::new("select", "sql");

        // One clipboard read, nothing inserted until its text arrives
        let task = editor.update(&Message::PasteFromClipboard);
        assert_eq!(task.units(), 1);
        assert_eq!(editor.content(), "select");
    }

    #[test]
    fn test_submit_event_is_drained_into_task() {
        let mut editor = UniverseEditor::new("select 1", "sql");
        keyboard::perform(&mut editor, Shortcut::Submit);
        assert_eq!(editor.outbox, vec![EditorEvent::Submit { code: "select 1".to_string() }]);
        editor.outbox.clear();

        // The caret line is already in view, so the only work left is the event
        let task = editor.update(&Message::Shortcut(Shortcut::Submit));
        assert!(editor.outbox.is_empty());
        assert_eq!(task.units(), 1);

        let task = editor.update(&Message::Shortcut(Shortcut::Move(Motion::LineEnd, false)));
        assert_eq!(task.units(), 0);
    }

    #[test]
    fn test_caret_after_tab_sits_on_tab_stop() {
        let mut editor = UniverseEditor::new("\tselect", "sql");
        let stop = crate::measure::TAB_WIDTH as f32 * editor.metrics.char_width;

        editor.set_caret(1);
        assert!((editor.caret_x() - stop).abs() < 0.001);

        // Clicking just right of the tab stop lands after the tab
        let y = editor.metrics.line_height / 2.0;
        let point = Point::new(editor.text_origin() + stop + 1.0, y);
        let _ = editor.update(&Message::MouseClick(point));
        assert_eq!(editor.document().caret(), 1);
    }

    #[test]
    fn test_tick_flushes_deferred_render() {
        let mut editor = UniverseEditor::new("", "sql");
        editor.set_attribute(crate::attributes::Attribute::Code, "select 1");
        assert!(!editor.syntax_layer().is_highlighted());

        let _ = editor.update(&Message::Tick);
        assert!(editor.syntax_layer().is_highlighted());
        assert!(!editor.is_layout_pending());
    }

    #[test]
    fn test_horizontal_scroll_is_clamped() {
        let long_line = "x".repeat(200);
        let mut editor = UniverseEditor::new(&long_line, "");
        let width = editor.text_origin() + 100.0;
        let _ = editor.update(&Message::ViewportResized(iced::Size::new(width, 200.0)));

        let _ = editor.update(&Message::ScrolledHorizontally(50.0));
        assert!((editor.scrollbar.offset() - 50.0).abs() < f32::EPSILON);

        let _ = editor.update(&Message::ScrollTo(1.0e6));
        assert!((editor.scrollbar.offset() - editor.scrollbar.max_offset()).abs() < f32::EPSILON);

        let _ = editor.update(&Message::ScrollTo(-10.0));
        assert!(editor.scrollbar.offset().abs() < f32::EPSILON);
    }

    #[test]
    fn test_caret_motion_reveals_caret() {
        let long_line = "x".repeat(200);
        let mut editor = UniverseEditor::new(&long_line, "");
        let width = editor.text_origin() + 100.0;
        let _ = editor.update(&Message::ViewportResized(iced::Size::new(width, 200.0)));

        let _ = editor.update(&Message::Shortcut(Shortcut::Move(Motion::LineEnd, false)));
        let caret_x = editor.caret_x();
        let offset = editor.scrollbar.offset();
        assert!(offset > 0.0);
        assert!(caret_x >= offset && caret_x <= offset + 100.0);
    }
}
