//! Canvas rendering implementation using Iced's `canvas::Program`.

use std::ops::Range;

use iced::mouse;
use iced::widget::canvas::{self, Action, Frame, Geometry};
use iced::{Color, Event, Point, Rectangle, Size, Theme, Vector, keyboard, window};

use super::{Message, UniverseEditor};
use crate::gutter;
use crate::keyboard::{Binding, resolve};
use crate::measure::{CARET_WIDTH, Metrics, TEXT_PADDING, expand_tabs};

fn draw_text(frame: &mut Frame, metrics: &Metrics, content: &str, position: Point, color: Color) {
    frame.fill_text(canvas::Text {
        content: content.to_string(),
        position,
        color,
        size: metrics.font_size.into(),
        font: iced::Font::MONOSPACE,
        ..canvas::Text::default()
    });
}

impl UniverseEditor {
    /// Rows intersecting the viewport, plus a small overscan.
    fn visible_rows(&self, bounds: Rectangle) -> Range<usize> {
        let line_height = self.metrics.line_height;
        // Use bounds.height until the first scroll event reports the viewport
        let effective_viewport_height =
            if self.viewport_height > 0.0 { self.viewport_height } else { bounds.height };

        let first = (self.viewport_scroll / line_height).floor() as usize;
        let count = (effective_viewport_height / line_height).ceil() as usize + 2;
        let last = (first + count).min(self.document.line_count());

        first.min(last)..last
    }

    fn draw_highlight(&self, frame: &mut Frame, gutter_width: f32) {
        if self.highlight.opacity() <= 0.0 {
            return;
        }

        let line_height = self.metrics.line_height;
        let height = line_height * self.highlight.scale();
        let top = self.highlight.top() - (height - line_height) / 2.0;

        frame.fill_rectangle(
            Point::new(gutter_width, top),
            Size::new(self.highlight.width() + TEXT_PADDING, height),
            Color {
                a: self.style.current_line_highlight.a * self.highlight.opacity(),
                ..self.style.current_line_highlight
            },
        );
    }

    fn draw_selection(&self, frame: &mut Frame, rows: &Range<usize>, origin: f32) {
        let Some(selection) = self.document.selection() else {
            return;
        };

        let metrics = &self.metrics;
        let mut line_start = self.document.line_start(rows.start);

        for (row, line) in self.document.lines().enumerate().skip(rows.start).take(rows.len()) {
            let line_end = line_start + line.chars().count();
            let start = selection.start.max(line_start);
            let end = selection.end.min(line_end);
            // The line break itself is selected
            let takes_break = selection.end > line_end && selection.start <= line_end;

            if start < end || takes_break {
                let left = metrics.prefix_width(line, start.min(end) - line_start);
                let mut right = metrics.prefix_width(line, end.max(start) - line_start);
                if takes_break {
                    right += metrics.char_width / 2.0;
                }

                frame.fill_rectangle(
                    Point::new(origin + left, row as f32 * metrics.line_height),
                    Size::new(right - left, metrics.line_height),
                    self.style.selection_color,
                );
            }

            line_start = line_end + 1;
        }
    }

    /// Returns `true` if a press outside the input surface hit the scrollbar
    /// track below it.
    ///
    /// The scrollable shifts the cursor by its vertical offset; the track
    /// bounds are in window coordinates.
    fn is_track_press(&self, cursor: mouse::Cursor) -> bool {
        let (mouse::Cursor::Available(point) | mouse::Cursor::Levitating(point)) = cursor else {
            return false;
        };
        self.scrollbar.is_over_track(point - Vector::new(0.0, self.viewport_scroll))
    }

    /// Draws the syntax layer: markup when available, plain text otherwise.
    fn draw_syntax_layer(&self, frame: &mut Frame, rows: &Range<usize>, origin: f32) {
        let metrics = &self.metrics;
        let markup = self.syntax_layer.markup();

        let lines = self.syntax_layer.text().split('\n').enumerate();

        for (row, line) in lines.skip(rows.start).take(rows.len()) {
            let y = row as f32 * metrics.line_height + 2.0;

            match markup.and_then(|lines| lines.get(row)) {
                Some(spans) => {
                    let mut x = origin;
                    let mut column = 0;
                    for span in spans {
                        let (content, next) = expand_tabs(&span.text, column);
                        draw_text(frame, metrics, &content, Point::new(x, y), span.color);
                        x += metrics.text_width(&content);
                        column = next;
                    }
                }
                None => {
                    let (content, _) = expand_tabs(line, 0);
                    let color = self.style.text_color;
                    draw_text(frame, metrics, &content, Point::new(origin, y), color);
                }
            }
        }
    }
}

impl canvas::Program<Message> for UniverseEditor {
    /// Modifiers held during the last event, for shift+wheel scrolling
    type State = keyboard::Modifiers;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let gutter_width = self.gutter.width(&self.metrics);
            let origin = self.text_origin() - self.scrollbar.offset();
            let rows = self.visible_rows(bounds);

            frame.fill_rectangle(Point::ORIGIN, bounds.size(), self.style.background);

            self.draw_highlight(frame, gutter_width);
            self.draw_selection(frame, &rows, origin);
            self.draw_syntax_layer(frame, &rows, origin);

            if self.document.text().is_empty() {
                draw_text(
                    frame,
                    &self.metrics,
                    &self.placeholder,
                    Point::new(origin, 2.0),
                    self.style.placeholder_color,
                );
            }

            if self.focused {
                let line = self.document.position().0;
                frame.fill_rectangle(
                    Point::new(origin + self.caret_x(), line as f32 * self.metrics.line_height),
                    Size::new(CARET_WIDTH, self.metrics.line_height),
                    self.style.caret_color,
                );
            }

            // Drawn last so text scrolled to the left slides under it
            gutter::draw(frame, self, &self.style, rows);
        });

        vec![geometry]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
                *state = *modifiers;
                None
            }
            Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                // Only process keyboard events if the editor has focus
                if !self.focused {
                    return None;
                }

                let message = match resolve(key, *modifiers)? {
                    Binding::Shortcut(shortcut) => Message::Shortcut(shortcut),
                    Binding::Copy => Message::Copy,
                    Binding::Cut => Message::Cut,
                    Binding::Paste => Message::PasteFromClipboard,
                };
                Some(Action::publish(message).and_capture())
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                match cursor.position_in(bounds) {
                    // Don't capture the event so it can bubble up for focus management
                    Some(position) => Some(Action::publish(Message::MouseClick(position))),
                    None if self.focused && !self.is_track_press(cursor) => {
                        Some(Action::publish(Message::Blur))
                    }
                    None => None,
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) if self.is_dragging => cursor
                .position_in(bounds)
                .map(|position| Action::publish(Message::MouseDrag(position)).and_capture()),
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) if self.is_dragging => {
                Some(Action::publish(Message::MouseRelease).and_capture())
            }
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if !cursor.is_over(bounds) {
                    return None;
                }

                let (x, y) = match delta {
                    mouse::ScrollDelta::Lines { x, y } => {
                        (x * self.metrics.line_height, y * self.metrics.line_height)
                    }
                    mouse::ScrollDelta::Pixels { x, y } => (*x, *y),
                };
                let horizontal = if x.abs() > f32::EPSILON {
                    x
                } else if state.shift() {
                    y
                } else {
                    return None;
                };

                Some(Action::publish(Message::ScrolledHorizontally(-horizontal)).and_capture())
            }
            Event::Window(window::Event::RedrawRequested(_)) => {
                let width = (bounds.width - self.text_origin()).max(0.0);
                ((width - self.scrollbar.viewport_width()).abs() > 0.5)
                    .then(|| Action::publish(Message::ViewportResized(bounds.size())))
            }
            _ => None,
        }
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match cursor.position_in(bounds) {
            Some(position) if position.x >= self.gutter.width(&self.metrics) => {
                mouse::Interaction::Text
            }
            _ => mouse::Interaction::default(),
        }
    }
}
