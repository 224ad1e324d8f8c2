//! The syntax layer and the tokenizer it calls into.
//!
//! Highlighting is best-effort: the [`SyntaxLayer`] always holds the plain
//! text, and only attaches markup when the [`Tokenizer`] succeeds.

use iced::Color;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;

use crate::attributes::Mode;

const DARK_THEME: &str = "base16-ocean.dark";
const LIGHT_THEME: &str = "InspiredGitHub";

/// A run of text sharing one color.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub color: Color,
}

/// The spans of one line, without its line break.
pub type HighlightedLine = Vec<Span>;

/// Errors raised while tokenizing.
#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("highlighting theme not found: {0}")]
    MissingTheme(&'static str),

    #[error(transparent)]
    Syntect(#[from] syntect::Error),
}

/// Turns text into colored spans.
pub trait Tokenizer {
    /// Tokenizes `text` with the grammar named by `language`.
    ///
    /// Returns one entry per `'\n'`-separated line.
    ///
    /// # Errors
    ///
    /// Returns an error when the language is unknown or highlighting fails.
    /// Callers treat any error as "show plain text".
    fn tokenize(
        &self,
        text: &str,
        language: &str,
        mode: Mode,
    ) -> Result<Vec<HighlightedLine>, TokenizeError>;
}

/// [`Tokenizer`] backed by syntect's bundled grammars and themes.
pub struct SyntectTokenizer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for SyntectTokenizer {
    fn default() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }
}

impl Tokenizer for SyntectTokenizer {
    fn tokenize(
        &self,
        text: &str,
        language: &str,
        mode: Mode,
    ) -> Result<Vec<HighlightedLine>, TokenizeError> {
        let language = language.trim();
        let syntax = if language.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(language)
                .ok_or_else(|| TokenizeError::UnsupportedLanguage(language.to_string()))?
        };

        let theme_name = if mode.is_dark() { DARK_THEME } else { LIGHT_THEME };
        let theme = self
            .theme_set
            .themes
            .get(theme_name)
            .ok_or(TokenizeError::MissingTheme(theme_name))?;

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();

        for line in text.split('\n') {
            // Grammars loaded with newlines expect every line to end in one
            let line = format!("{line}\n");
            let ranges = highlighter.highlight_line(&line, &self.syntax_set)?;

            lines.push(
                ranges
                    .into_iter()
                    .filter_map(|(style, piece)| {
                        let piece = piece.trim_end_matches('\n');
                        (!piece.is_empty()).then(|| Span {
                            text: piece.to_string(),
                            color: Color::from_rgb8(
                                style.foreground.r,
                                style.foreground.g,
                                style.foreground.b,
                            ),
                        })
                    })
                    .collect(),
            );
        }

        Ok(lines)
    }
}

/// Read-only rendering of the document text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntaxLayer {
    text: String,
    language: String,
    mode: Mode,
    markup: Option<Vec<HighlightedLine>>,
}

impl SyntaxLayer {
    /// Selects the grammar used by the next redraw.
    pub fn set_language(&mut self, language: &str) {
        if self.language != language {
            self.language = language.to_string();
            self.markup = None;
        }
    }

    /// The grammar name.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The grammar class token, `language-<name>`.
    #[must_use]
    pub fn class_name(&self) -> String {
        format!("language-{}", self.language)
    }

    /// Shows `text` without markup.
    pub fn set_plain(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.markup = None;
        }
    }

    /// Copies `text` into the layer and re-tokenizes it.
    ///
    /// Tokenizer errors are logged and swallowed; the layer then shows plain
    /// text.
    pub fn redraw(&mut self, text: &str, tokenizer: &dyn Tokenizer, mode: Mode) {
        if self.text == text && self.mode == mode && self.markup.is_some() {
            return;
        }

        self.text = text.to_string();
        self.mode = mode;
        self.markup = None;

        match tokenizer.tokenize(&self.text, &self.language, mode) {
            Ok(lines) => self.markup = Some(lines),
            Err(error) => {
                tracing::debug!(
                    %error,
                    language = %self.language,
                    "syntax highlighting failed, showing plain text"
                );
            }
        }
    }

    /// The rendered text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Highlighted lines, if the last redraw succeeded.
    #[must_use]
    pub fn markup(&self) -> Option<&[HighlightedLine]> {
        self.markup.as_deref()
    }

    #[must_use]
    pub const fn is_highlighted(&self) -> bool {
        self.markup.is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A tokenizer that always fails.
    pub(crate) struct FailingTokenizer;

    impl Tokenizer for FailingTokenizer {
        fn tokenize(
            &self,
            _text: &str,
            language: &str,
            _mode: Mode,
        ) -> Result<Vec<HighlightedLine>, TokenizeError> {
            Err(TokenizeError::UnsupportedLanguage(language.to_string()))
        }
    }

    fn joined(lines: &[HighlightedLine]) -> Vec<String> {
        lines
            .iter()
            .map(|spans| spans.iter().map(|span| span.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_syntect_preserves_text() {
        let tokenizer = SyntectTokenizer::default();
        let lines = tokenizer.tokenize("SELECT *\nFROM users;", "sql", Mode::Dark);

        assert_eq!(
            lines.ok().map(|lines| joined(&lines)),
            Some(vec!["SELECT *".to_string(), "FROM users;".to_string()])
        );
    }

    #[test]
    fn test_syntect_empty_language_is_plain_text() {
        let tokenizer = SyntectTokenizer::default();
        let lines = tokenizer.tokenize("a\n\nb", "", Mode::Light);

        assert_eq!(
            lines.ok().map(|lines| joined(&lines)),
            Some(vec!["a".to_string(), String::new(), "b".to_string()])
        );
    }

    #[test]
    fn test_syntect_unknown_language() {
        let tokenizer = SyntectTokenizer::default();
        let result = tokenizer.tokenize("text", "klingon", Mode::Dark);
        assert!(matches!(result, Err(TokenizeError::UnsupportedLanguage(_))));
    }

    #[test]
    fn test_class_name() {
        let mut layer = SyntaxLayer::default();
        layer.set_language("sql");
        assert_eq!(layer.class_name(), "language-sql");
    }

    #[test]
    fn test_failed_redraw_keeps_plain_text() {
        let mut layer = SyntaxLayer::default();
        layer.set_language("sql");
        layer.redraw("select 1", &FailingTokenizer, Mode::Dark);

        assert_eq!(layer.text(), "select 1");
        assert!(!layer.is_highlighted());
    }

    #[test]
    fn test_set_plain_drops_stale_markup() {
        let tokenizer = SyntectTokenizer::default();
        let mut layer = SyntaxLayer::default();
        layer.set_language("sql");
        layer.redraw("select 1", &tokenizer, Mode::Dark);
        assert!(layer.is_highlighted());

        layer.set_plain("select 2");
        assert_eq!(layer.text(), "select 2");
        assert!(!layer.is_highlighted());
    }
}
