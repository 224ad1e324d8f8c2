//! The document model: text, caret and selection.
//!
//! Offsets are character indices, not byte indices. Lines are separated by
//! `'\n'` only.

use std::ops::Range;

/// Returns the 1-based line number containing the character `offset`.
///
/// This is `1 + ` the number of line breaks in `text[0..offset)`.
#[must_use]
pub fn line_at(text: &str, offset: usize) -> usize {
    1 + text.chars().take(offset).filter(|ch| *ch == '\n').count()
}

/// Returns the number of lines in `text`. Empty text has one line.
#[must_use]
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Converts `"\r\n"` and lone `'\r'` line endings to `'\n'`.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// A caret movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// Start of the current line
    LineStart,
    /// End of the current line
    LineEnd,
    /// Start of the document
    DocumentStart,
    /// End of the document
    DocumentEnd,
}

/// Editable text with a caret and an optional selection anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    caret: usize,
    anchor: Option<usize>,
}

impl Document {
    /// Creates a document with the caret at the start.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self { text: normalize_line_endings(text), caret: 0, anchor: None }
    }

    /// The full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The caret as a character offset.
    #[must_use]
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// Number of characters in the text.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Replaces the whole text, keeping the caret where possible.
    ///
    /// Line endings are normalized to `'\n'`.
    pub fn set_text(&mut self, text: &str) {
        self.text = normalize_line_endings(text);
        self.caret = self.caret.min(self.len_chars());
        self.anchor = None;
    }

    /// Moves the caret and clears the selection.
    pub fn set_caret(&mut self, offset: usize) {
        self.caret = offset.min(self.len_chars());
        self.anchor = None;
    }

    /// Moves the caret while keeping (or starting) a selection.
    pub fn extend_to(&mut self, offset: usize) {
        if self.anchor.is_none() {
            self.anchor = Some(self.caret);
        }
        self.caret = offset.min(self.len_chars());
    }

    /// Selects the given range, leaving the caret at its end.
    pub fn select(&mut self, anchor: usize, caret: usize) {
        let len = self.len_chars();
        self.anchor = Some(anchor.min(len));
        self.caret = caret.min(len);
    }

    /// Selects the whole text.
    pub fn select_all(&mut self) {
        self.select(0, self.len_chars());
    }

    /// Returns the normalized selection, or `None` when nothing is selected.
    #[must_use]
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let range = anchor.min(self.caret)..anchor.max(self.caret);
        (!range.is_empty()).then_some(range)
    }

    /// Returns the selected text.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        let range = self.selection()?;
        Some(&self.text[self.byte_index(range.start)..self.byte_index(range.end)])
    }

    /// Number of lines; always at least one.
    #[must_use]
    pub fn line_count(&self) -> usize {
        line_count(&self.text)
    }

    /// The 1-based line number holding the caret.
    #[must_use]
    pub fn active_line(&self) -> usize {
        line_at(&self.text, self.caret)
    }

    /// Iterates over lines without their terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Returns the line at the 0-based `index`, or an empty string.
    #[must_use]
    pub fn line(&self, index: usize) -> &str {
        self.lines().nth(index).unwrap_or("")
    }

    /// Converts a character offset into a 0-based `(line, column)`.
    #[must_use]
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;

        for ch in self.text.chars().take(offset) {
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }

        (line, column)
    }

    /// The caret as a 0-based `(line, column)`.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        self.position_of(self.caret)
    }

    /// Converts a 0-based `(line, column)` into a character offset, clamping
    /// both to the text.
    #[must_use]
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        let line = line.min(self.line_count() - 1);
        self.line_start(line) + column.min(self.line(line).chars().count())
    }

    /// Character offset where the 0-based `line` starts.
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        self.lines()
            .take(line)
            .map(|text| text.chars().count() + 1)
            .sum()
    }

    /// Computes where `motion` would put the caret.
    #[must_use]
    pub fn target(&self, motion: Motion) -> usize {
        let (line, column) = self.position();

        match motion {
            Motion::Left => self.caret.saturating_sub(1),
            Motion::Right => (self.caret + 1).min(self.len_chars()),
            Motion::Up if line == 0 => 0,
            Motion::Up => self.offset_of(line - 1, column),
            Motion::Down if line + 1 >= self.line_count() => self.len_chars(),
            Motion::Down => self.offset_of(line + 1, column),
            Motion::LineStart => self.line_start(line),
            Motion::LineEnd => self.offset_of(line, usize::MAX),
            Motion::DocumentStart => 0,
            Motion::DocumentEnd => self.len_chars(),
        }
    }

    /// Inserts `text` at the caret, replacing the selection.
    pub fn insert(&mut self, text: &str) {
        self.delete_selection();

        let at = self.byte_index(self.caret);
        self.text.insert_str(at, text);
        self.caret += text.chars().count();
    }

    /// Deletes the selection, or the character before the caret.
    ///
    /// Returns `true` if the text changed.
    pub fn backspace(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.caret == 0 {
            return false;
        }

        self.replace(self.caret - 1..self.caret, "");
        true
    }

    /// Deletes the selection, or the character after the caret.
    ///
    /// Returns `true` if the text changed.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.caret >= self.len_chars() {
            return false;
        }

        self.replace(self.caret..self.caret + 1, "");
        true
    }

    /// Deletes the selected text. Returns `true` if anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection() else {
            self.anchor = None;
            return false;
        };

        self.replace(range, "");
        true
    }

    /// Replaces a character range and puts the caret after the replacement.
    pub fn replace(&mut self, range: Range<usize>, with: &str) {
        let start = self.byte_index(range.start);
        let end = self.byte_index(range.end);

        self.text.replace_range(start..end, with);
        self.caret = range.start + with.chars().count();
        self.anchor = None;
    }

    /// Leading whitespace of the 0-based `line`.
    #[must_use]
    pub fn indentation(&self, line: usize) -> &str {
        let text = self.line(line);
        &text[..text.len() - text.trim_start_matches([' ', '\t']).len()]
    }

    pub(crate) fn byte_index(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map_or(self.text.len(), |(index, _)| index)
    }

    /// Restores a selection after a line-wise edit shifted offsets.
    pub(crate) fn restore_selection(&mut self, anchor: Option<usize>, caret: usize) {
        let len = self.len_chars();
        self.caret = caret.min(len);
        self.anchor = anchor.map(|anchor| anchor.min(len));
    }

    pub(crate) const fn anchor(&self) -> Option<usize> {
        self.anchor
    }
}
