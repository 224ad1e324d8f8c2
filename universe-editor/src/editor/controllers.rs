//! The capability interfaces the editor exposes to its collaborators.

use super::{RenderSet, UniverseEditor};
use crate::document::Document;
use crate::gutter::{Gutter, GutterController};
use crate::keyboard::{self, EditorEvent, IndentDirection, ShortcutHooks};
use crate::measure::Metrics;
use crate::scrollbar::{Scrollbar, ScrollbarController};

impl GutterController for UniverseEditor {
    fn gutter(&self) -> &Gutter {
        &self.gutter
    }

    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn set_gutter_height(&mut self, height: f32) {
        self.gutter.set_height(height);
    }
}

impl ScrollbarController for UniverseEditor {
    fn scrollbar(&self) -> &Scrollbar {
        &self.scrollbar
    }

    fn scroll_horizontally_to(&mut self, offset: f32) {
        if self.scrollbar.scroll_to(offset) {
            self.cache.clear();
        }
    }
}

impl ShortcutHooks for UniverseEditor {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    fn language(&self) -> &str {
        &self.attributes.language
    }

    fn on_syntax_change(&mut self) {
        self.render(RenderSet::SYNTAX);
    }

    fn on_line_numbers_change(&mut self) {
        self.update_line_numbers();
    }

    fn on_line_change(&mut self) {
        self.render(RenderSet::LINE);
    }

    fn indent(&mut self, direction: IndentDirection) {
        if keyboard::indent_lines(&mut self.document, direction) {
            keyboard::text_changed(self);
        }
    }

    fn dispatch(&mut self, event: EditorEvent) {
        self.outbox.push(event);
    }
}
