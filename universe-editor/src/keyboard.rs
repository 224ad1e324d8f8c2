//! Keyboard shortcuts.
//!
//! [`resolve`] turns an Iced key press into a [`Binding`]. [`perform`] runs an
//! editing [`Shortcut`] against any host implementing [`ShortcutHooks`]; the
//! host decides how to refresh its layers when the hooks fire.

use iced::keyboard::{self, key};

use crate::document::{Document, Motion};

/// One level of indentation
pub const INDENT: &str = "    ";

/// Events the editor emits to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The text was edited by the user
    Changed { code: String },
    /// The user asked to run the current text (Ctrl+Enter)
    Submit { code: String },
}

/// Direction of an indentation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentDirection {
    Increase,
    Decrease,
}

/// An editing or navigation shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Insert a typed character
    Type(char),
    /// Insert a line break, keeping the current indentation
    Newline,
    Backspace,
    Delete,
    Indent(IndentDirection),
    /// Comment or uncomment the selected lines
    ToggleComment,
    /// Move the caret, extending the selection when the flag is set
    Move(Motion, bool),
    SelectAll,
    /// Emit [`EditorEvent::Submit`]
    Submit,
}

/// What a key press maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Shortcut(Shortcut),
    Copy,
    Cut,
    Paste,
}

/// Callbacks the shortcut handler needs from its host.
pub trait ShortcutHooks {
    fn document(&self) -> &Document;
    fn document_mut(&mut self) -> &mut Document;

    /// The grammar name, used to pick the comment prefix.
    fn language(&self) -> &str;

    /// The text changed and the syntax layer must be redrawn.
    fn on_syntax_change(&mut self);

    /// The text changed and the gutter must be regenerated.
    fn on_line_numbers_change(&mut self);

    /// The caret moved without the text changing.
    fn on_line_change(&mut self);

    /// Indents or outdents the lines under the caret or selection.
    fn indent(&mut self, direction: IndentDirection);

    /// Forwards an event to whoever embeds the editor.
    fn dispatch(&mut self, event: EditorEvent);
}

/// Maps a key press to a binding.
#[must_use]
pub fn resolve(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<Binding> {
    let command = modifiers.command();
    let shift = modifiers.shift();

    if command {
        let binding = match key.as_ref() {
            keyboard::Key::Character("c") => Binding::Copy,
            keyboard::Key::Character("x") => Binding::Cut,
            keyboard::Key::Character("v") => Binding::Paste,
            keyboard::Key::Character("a") => Binding::Shortcut(Shortcut::SelectAll),
            keyboard::Key::Character("/") => Binding::Shortcut(Shortcut::ToggleComment),
            keyboard::Key::Named(key::Named::Enter) => Binding::Shortcut(Shortcut::Submit),
            keyboard::Key::Named(key::Named::Home) => {
                Binding::Shortcut(Shortcut::Move(Motion::DocumentStart, shift))
            }
            keyboard::Key::Named(key::Named::End) => {
                Binding::Shortcut(Shortcut::Move(Motion::DocumentEnd, shift))
            }
            _ => return None,
        };
        return Some(binding);
    }

    let shortcut = match key.as_ref() {
        keyboard::Key::Character(text) => Shortcut::Type(text.chars().next()?),
        keyboard::Key::Named(named) => match named {
            key::Named::Space => Shortcut::Type(' '),
            key::Named::Enter => Shortcut::Newline,
            key::Named::Backspace => Shortcut::Backspace,
            key::Named::Delete => Shortcut::Delete,
            key::Named::Tab if shift => Shortcut::Indent(IndentDirection::Decrease),
            key::Named::Tab => Shortcut::Indent(IndentDirection::Increase),
            key::Named::ArrowLeft => Shortcut::Move(Motion::Left, shift),
            key::Named::ArrowRight => Shortcut::Move(Motion::Right, shift),
            key::Named::ArrowUp => Shortcut::Move(Motion::Up, shift),
            key::Named::ArrowDown => Shortcut::Move(Motion::Down, shift),
            key::Named::Home => Shortcut::Move(Motion::LineStart, shift),
            key::Named::End => Shortcut::Move(Motion::LineEnd, shift),
            _ => return None,
        },
        keyboard::Key::Unidentified => return None,
    };

    Some(Binding::Shortcut(shortcut))
}

/// Runs `shortcut` against `host`.
pub fn perform<H: ShortcutHooks>(host: &mut H, shortcut: Shortcut) {
    match shortcut {
        Shortcut::Type(ch) => {
            let mut buffer = [0; 4];
            host.document_mut().insert(ch.encode_utf8(&mut buffer));
            text_changed(host);
        }
        Shortcut::Newline => {
            let document = host.document_mut();
            let (line, _) = document.position();
            let indentation = document.indentation(line).to_string();
            document.insert(&format!("\n{indentation}"));
            text_changed(host);
        }
        Shortcut::Backspace => {
            if host.document_mut().backspace() {
                text_changed(host);
            }
        }
        Shortcut::Delete => {
            if host.document_mut().delete_forward() {
                text_changed(host);
            }
        }
        Shortcut::Indent(direction) => host.indent(direction),
        Shortcut::ToggleComment => {
            let Some(prefix) = comment_prefix(host.language()) else {
                return;
            };
            if toggle_comment(host.document_mut(), prefix) {
                text_changed(host);
            }
        }
        Shortcut::Move(motion, extend) => {
            let document = host.document_mut();
            let target = match (document.selection(), motion, extend) {
                // Collapsing a selection lands on its edge
                (Some(range), Motion::Left, false) => range.start,
                (Some(range), Motion::Right, false) => range.end,
                _ => document.target(motion),
            };

            if extend {
                document.extend_to(target);
            } else {
                document.set_caret(target);
            }
            host.on_line_change();
        }
        Shortcut::SelectAll => {
            host.document_mut().select_all();
            host.on_line_change();
        }
        Shortcut::Submit => {
            let code = host.document().text().to_string();
            host.dispatch(EditorEvent::Submit { code });
        }
    }
}

/// Fires the hooks that follow a text change.
pub fn text_changed<H: ShortcutHooks>(host: &mut H) {
    host.on_line_numbers_change();
    host.on_syntax_change();

    let code = host.document().text().to_string();
    host.dispatch(EditorEvent::Changed { code });
}

/// Line comment prefix for a grammar name.
#[must_use]
pub fn comment_prefix(language: &str) -> Option<&'static str> {
    let prefix = match language.trim().to_ascii_lowercase().as_str() {
        "sql" | "lua" | "hs" | "haskell" | "ada" => "--",
        "py" | "python" | "sh" | "bash" | "shell" | "rb" | "ruby" | "r" | "pl" | "perl"
        | "yml" | "yaml" | "toml" => "#",
        "rs" | "rust" | "js" | "javascript" | "ts" | "typescript" | "c" | "h" | "cpp"
        | "c++" | "cs" | "java" | "go" | "swift" | "kt" | "kotlin" | "php" | "scss" => "//",
        _ => return None,
    };
    Some(prefix)
}

/// Indents or outdents every line touched by the selection, or the caret
/// line. Returns `true` if the text changed.
pub fn indent_lines(document: &mut Document, direction: IndentDirection) -> bool {
    edit_lines(document, |text| match direction {
        IndentDirection::Increase => Some(LineEdit::insert(0, INDENT)),
        IndentDirection::Decrease if text.starts_with('\t') => Some(LineEdit::remove(0, 1)),
        IndentDirection::Decrease => {
            let spaces = text.chars().take_while(|ch| *ch == ' ').count();
            (spaces > 0).then(|| LineEdit::remove(0, spaces.min(INDENT.len())))
        }
    })
}

/// Comments the selected lines with `prefix`, or uncomments them when every
/// non-blank line already starts with it.
fn toggle_comment(document: &mut Document, prefix: &str) -> bool {
    let (first, last) = selected_lines(document);
    let mut lines = (first..=last)
        .map(|line| document.line(line).trim_start())
        .filter(|text| !text.is_empty())
        .peekable();

    if lines.peek().is_none() {
        return false;
    }
    let commented = lines.all(|text| text.starts_with(prefix));

    edit_lines(document, |text| {
        let rest = text.trim_start();
        if rest.is_empty() {
            return None;
        }
        let column = text.chars().count() - rest.chars().count();

        if commented {
            let after = &rest[prefix.len()..];
            let spaced = usize::from(after.starts_with(' '));
            Some(LineEdit::remove(column, prefix.chars().count() + spaced))
        } else {
            Some(LineEdit::insert(column, &format!("{prefix} ")))
        }
    })
}

/// A change to a single line: remove `remove` characters at `column`, then
/// insert `insert` there.
struct LineEdit {
    column: usize,
    remove: usize,
    insert: String,
}

impl LineEdit {
    fn insert(column: usize, text: &str) -> Self {
        Self { column, remove: 0, insert: text.to_string() }
    }

    fn remove(column: usize, count: usize) -> Self {
        Self { column, remove: count, insert: String::new() }
    }
}

/// First and last 0-based line touched by the selection. A selection ending
/// at column 0 does not include that line.
fn selected_lines(document: &Document) -> (usize, usize) {
    match document.selection() {
        Some(range) => {
            let first = document.position_of(range.start).0;
            let (last, column) = document.position_of(range.end);
            if column == 0 && last > first { (first, last - 1) } else { (first, last) }
        }
        None => {
            let line = document.position().0;
            (line, line)
        }
    }
}

/// Applies `edit` to each selected line, bottom-up, keeping the caret and
/// the selection anchored to the same text.
fn edit_lines<F>(document: &mut Document, edit: F) -> bool
where
    F: Fn(&str) -> Option<LineEdit>,
{
    let (first, last) = selected_lines(document);
    let selection_start = document.selection().map(|range| range.start);
    let mut anchor = document.anchor();
    let mut caret = document.caret();
    let mut changed = false;

    for line in (first..=last).rev() {
        let Some(edit) = edit(document.line(line)) else {
            continue;
        };

        let at = document.line_start(line) + edit.column;
        let inserted = edit.insert.chars().count();
        document.replace(at..at + edit.remove, &edit.insert);

        // A selection starting at the edit point keeps covering the new text
        let shift = |offset: usize| {
            if offset < at || (offset == at && Some(offset) == selection_start) {
                offset
            } else if offset < at + edit.remove {
                at + inserted
            } else {
                offset - edit.remove + inserted
            }
        };
        anchor = anchor.map(shift);
        caret = shift(caret);
        changed = true;
    }

    document.restore_selection(anchor, caret);
    changed
}
