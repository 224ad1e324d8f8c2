//! The configuration surface of the editor.
//!
//! Every attribute is a plain string. Parsing into richer values happens
//! here so the editor only deals with typed state.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A named attribute of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// The document text
    Code,
    /// The grammar used for syntax highlighting, such as `sql`
    Language,
    /// The theme name, such as `moondust`
    Theme,
    /// The light/dark variant of the theme
    Mode,
    /// Height of the editor container in pixels
    Height,
    /// Database schema for schema-aware highlighting (stored only)
    Schema,
}

impl Attribute {
    /// Every attribute the editor observes.
    pub const ALL: [Attribute; 6] = [
        Attribute::Code,
        Attribute::Language,
        Attribute::Theme,
        Attribute::Mode,
        Attribute::Height,
        Attribute::Schema,
    ];

    /// Returns the attribute name as written by hosts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Language => "language",
            Self::Theme => "theme",
            Self::Mode => "mode",
            Self::Height => "height",
            Self::Schema => "schema",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.name() == name)
            .ok_or_else(|| Error::UnknownAttribute(name.to_string()))
    }
}

/// Light or dark variant of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Light background, dark text
    Light,
    /// Dark background, light text
    #[default]
    Dark,
}

impl Mode {
    /// Parses a mode value, returning `None` for anything other than
    /// `light` or `dark` (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Returns `true` for [`Mode::Dark`].
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Parses a height attribute such as `"240"` or `"240px"`.
pub(crate) fn parse_height(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();

    number
        .parse::<f32>()
        .ok()
        .filter(|height| height.is_finite() && *height >= 0.0)
}

/// Current values of every attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    pub language: String,
    pub theme: String,
    pub mode: Mode,
    pub height: Option<f32>,
    pub schema: String,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            language: String::new(),
            theme: crate::theme::DEFAULT_THEME.to_string(),
            mode: Mode::Dark,
            height: None,
            schema: String::new(),
        }
    }
}
