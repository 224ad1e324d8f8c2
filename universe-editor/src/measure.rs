//! Text measurement and content sizing.

use iced::Size;
use unicode_width::UnicodeWidthChar;

/// Width of the caret bar in pixels
pub(crate) const CARET_WIDTH: f32 = 2.0;
/// Horizontal padding between the gutter and the text
pub(crate) const TEXT_PADDING: f32 = 5.0;

/// Font metrics used to lay out the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Font size in pixels
    pub font_size: f32,
    /// Height of one line in pixels
    pub line_height: f32,
    /// Advance of a narrow (single-column) character
    pub char_width: f32,
    /// Advance of a wide (double-column) character, such as CJK
    pub full_char_width: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            line_height: 20.0,
            char_width: 8.4,
            full_char_width: 16.8,
        }
    }
}

/// Columns between tab stops
pub(crate) const TAB_WIDTH: usize = crate::keyboard::INDENT.len();

/// Display columns taken by `ch` when it starts at `column`.
///
/// A tab runs to the next tab stop. Wide characters take two columns and
/// control characters none.
fn columns(ch: char, column: usize) -> usize {
    match ch {
        '\t' => TAB_WIDTH - column % TAB_WIDTH,
        _ => ch.width().unwrap_or(0),
    }
}

/// Replaces the tabs of `text` with spaces up to each tab stop.
///
/// `column` is the display column `text` starts at. Returns the expanded
/// text and the column after it, so consecutive spans of a line can be
/// expanded in turn.
#[must_use]
pub fn expand_tabs(text: &str, column: usize) -> (String, usize) {
    let mut expanded = String::with_capacity(text.len());
    let mut column = column;

    for ch in text.chars() {
        let taken = columns(ch, column);
        if ch == '\t' {
            expanded.extend(std::iter::repeat_n(' ', taken));
        } else {
            expanded.push(ch);
        }
        column += taken;
    }

    (expanded, column)
}

impl Metrics {
    /// Width of a character taking `taken` display columns.
    fn advance(&self, ch: char, taken: usize) -> f32 {
        match (ch, taken) {
            ('\t', _) => taken as f32 * self.char_width,
            (_, 2) => self.full_char_width,
            (_, 0) => 0.0,
            _ => self.char_width,
        }
    }

    /// Advance of every character of a line, in order.
    pub fn advances<'a>(&'a self, line: &'a str) -> impl Iterator<Item = f32> + 'a {
        line.chars().scan(0, move |column, ch| {
            let taken = columns(ch, *column);
            *column += taken;
            Some(self.advance(ch, taken))
        })
    }

    /// Measures a single line of text.
    #[must_use]
    pub fn text_width(&self, text: &str) -> f32 {
        self.advances(text).sum()
    }

    /// Width of the first `column` characters of `line`.
    #[must_use]
    pub fn prefix_width(&self, line: &str, column: usize) -> f32 {
        self.advances(line).take(column).sum()
    }

    /// Returns the column closest to `x` within `line`.
    #[must_use]
    pub fn column_at(&self, line: &str, x: f32) -> usize {
        let mut left = 0.0;

        for (column, advance) in self.advances(line).enumerate() {
            if x < left + advance / 2.0 {
                return column;
            }
            left += advance;
        }

        line.chars().count()
    }

    /// Computes the size the input surface needs for `text`.
    ///
    /// Height is the line count times the line height. Width is the widest
    /// line plus room for the caret. Empty text is measured through
    /// `placeholder` so the surface never collapses.
    #[must_use]
    pub fn content_size(&self, text: &str, placeholder: &str) -> Size {
        let lines = crate::document::line_count(text);
        let height = lines as f32 * self.line_height;

        let measured = if text.is_empty() { placeholder } else { text };
        let widest = measured
            .split('\n')
            .map(|line| self.text_width(line))
            .fold(0.0_f32, f32::max);

        Size::new(widest + CARET_WIDTH, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_handles_wide_chars() {
        let metrics = Metrics::default();
        let narrow = metrics.text_width("ab");
        let wide = metrics.text_width("世界");
        assert!((narrow - 16.8).abs() < 0.001);
        assert!((wide - 33.6).abs() < 0.001);
    }

    #[test]
    fn test_column_at_rounds_to_nearest() {
        let metrics = Metrics::default();
        assert_eq!(metrics.column_at("hello", 0.0), 0);
        assert_eq!(metrics.column_at("hello", 3.0), 0);
        assert_eq!(metrics.column_at("hello", 5.0), 1);
        assert_eq!(metrics.column_at("hello", 500.0), 5);
    }

    #[test]
    fn test_content_size_uses_widest_line() {
        let metrics = Metrics::default();
        let size = metrics.content_size("ab\nabcd\na", "");
        assert!((size.height - 60.0).abs() < 0.001);
        assert!((size.width - (4.0 * 8.4 + CARET_WIDTH)).abs() < 0.001);
    }

    #[test]
    fn test_empty_text_measures_placeholder() {
        let metrics = Metrics::default();
        let size = metrics.content_size("", "Type here");
        assert!((size.height - 20.0).abs() < 0.001);
        assert!((size.width - metrics.content_size("Type here", "").width).abs() < 0.001);
    }

    #[test]
    fn test_tab_runs_to_next_stop() {
        let metrics = Metrics::default();
        let stop = TAB_WIDTH as f32 * metrics.char_width;
        assert!((metrics.text_width("\t") - stop).abs() < 0.001);
        assert!((metrics.text_width("ab\t") - stop).abs() < 0.001);
        assert!((metrics.text_width("abcd\t") - 2.0 * stop).abs() < 0.001);
        assert!((metrics.prefix_width("\tx", 1) - stop).abs() < 0.001);
    }

    #[test]
    fn test_tab_indented_text_is_wider() {
        let metrics = Metrics::default();
        let tabbed = metrics.content_size("\t\t\tSELECT 1", "");
        let plain = metrics.content_size("SELECT 1", "");
        let expected = plain.width + 3.0 * TAB_WIDTH as f32 * metrics.char_width;
        assert!(tabbed.width > plain.width);
        assert!((tabbed.width - expected).abs() < 0.001);
    }

    #[test]
    fn test_column_at_steps_over_tabs() {
        let metrics = Metrics::default();
        let stop = TAB_WIDTH as f32 * metrics.char_width;
        assert_eq!(metrics.column_at("\tx", stop / 2.0 - 1.0), 0);
        assert_eq!(metrics.column_at("\tx", stop / 2.0 + 1.0), 1);
        assert_eq!(metrics.column_at("\tx", stop + metrics.char_width), 2);
    }

    #[test]
    fn test_expand_tabs_carries_column() {
        assert_eq!(expand_tabs("a\tb", 0), ("a   b".to_string(), 5));
        // A span starting mid-line continues from its column
        assert_eq!(expand_tabs("\tx", 2), ("  x".to_string(), 5));
        assert_eq!(expand_tabs("世\t", 0), ("世  ".to_string(), 4));
    }

    #[test]
    fn test_width_shrinks_with_content() {
        // Removing the only long line must shrink the width again
        let metrics = Metrics::default();
        let long = metrics.content_size("short\na much much longer line", "");
        let short = metrics.content_size("short", "");
        assert!(short.width < long.width);
    }
}
