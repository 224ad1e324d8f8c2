//! Editor themes.
//!
//! A theme is selected by name (the `theme` attribute) and a [`Mode`]
//! (the `mode` attribute). The built-in names are `moondust` and `invasion`;
//! any native Iced theme name such as `Dracula` or `Nord` also resolves,
//! through [`from_iced_theme`].

use iced::Color;

use crate::attributes::Mode;

/// Theme used when none is set or the name is unknown
pub const DEFAULT_THEME: &str = "moondust";

/// The appearance of the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Main editor background color
    pub background: Color,
    /// Text color when no syntax markup is available
    pub text_color: Color,
    /// Color of the placeholder shown for empty documents
    pub placeholder_color: Color,
    /// Caret color
    pub caret_color: Color,
    /// Selection background
    pub selection_color: Color,
    /// Line numbers gutter background color
    pub gutter_background: Color,
    /// Border color for the gutter
    pub gutter_border: Color,
    /// Color for line numbers text
    pub line_number_color: Color,
    /// Color for the active line number
    pub active_line_number_color: Color,
    /// Scrollbar track color
    pub scrollbar_background: Color,
    /// Scrollbar thumb color
    pub scroller_color: Color,
    /// Band drawn behind the active line
    pub current_line_highlight: Color,
}

/// Resolves a theme name and mode into a [`Style`].
///
/// Names are matched case-insensitively. Unknown names fall back to
/// [`DEFAULT_THEME`].
#[must_use]
pub fn resolve(name: &str, mode: Mode) -> Style {
    let name = name.trim();

    if name.is_empty() || name.eq_ignore_ascii_case("moondust") {
        return moondust(mode);
    }
    if name.eq_ignore_ascii_case("invasion") {
        return invasion(mode);
    }

    if let Some(theme) = iced::Theme::ALL
        .iter()
        .find(|theme| theme.to_string().eq_ignore_ascii_case(name))
    {
        return from_iced_theme(theme);
    }

    tracing::warn!(theme = name, "unknown theme, falling back to {DEFAULT_THEME}");
    moondust(mode)
}

/// The default blue-grey theme.
#[must_use]
pub fn moondust(mode: Mode) -> Style {
    match mode {
        Mode::Dark => Style {
            background: Color::from_rgb(0.09, 0.10, 0.13),
            text_color: Color::from_rgb(0.86, 0.88, 0.92),
            placeholder_color: Color::from_rgb(0.42, 0.45, 0.52),
            caret_color: Color::from_rgb(0.55, 0.70, 1.0),
            selection_color: Color::from_rgba(0.35, 0.50, 0.85, 0.35),
            gutter_background: Color::from_rgb(0.09, 0.10, 0.13),
            gutter_border: Color::from_rgb(0.16, 0.17, 0.21),
            line_number_color: Color::from_rgb(0.36, 0.39, 0.45),
            active_line_number_color: Color::from_rgb(0.80, 0.83, 0.90),
            scrollbar_background: Color::from_rgb(0.09, 0.10, 0.13),
            scroller_color: Color::from_rgb(0.25, 0.27, 0.33),
            current_line_highlight: Color::from_rgba(0.55, 0.65, 0.90, 0.08),
        },
        Mode::Light => Style {
            background: Color::from_rgb(0.98, 0.98, 0.99),
            text_color: Color::from_rgb(0.14, 0.15, 0.19),
            placeholder_color: Color::from_rgb(0.58, 0.60, 0.66),
            caret_color: Color::from_rgb(0.20, 0.35, 0.80),
            selection_color: Color::from_rgba(0.30, 0.45, 0.90, 0.25),
            gutter_background: Color::from_rgb(0.98, 0.98, 0.99),
            gutter_border: Color::from_rgb(0.88, 0.89, 0.92),
            line_number_color: Color::from_rgb(0.62, 0.64, 0.70),
            active_line_number_color: Color::from_rgb(0.20, 0.22, 0.28),
            scrollbar_background: Color::from_rgb(0.98, 0.98, 0.99),
            scroller_color: Color::from_rgb(0.80, 0.82, 0.86),
            current_line_highlight: Color::from_rgba(0.30, 0.40, 0.70, 0.07),
        },
    }
}

/// A green-on-black theme.
#[must_use]
pub fn invasion(mode: Mode) -> Style {
    match mode {
        Mode::Dark => Style {
            background: Color::from_rgb(0.04, 0.06, 0.05),
            text_color: Color::from_rgb(0.75, 0.95, 0.78),
            placeholder_color: Color::from_rgb(0.32, 0.45, 0.35),
            caret_color: Color::from_rgb(0.45, 1.0, 0.55),
            selection_color: Color::from_rgba(0.30, 0.80, 0.40, 0.30),
            gutter_background: Color::from_rgb(0.05, 0.08, 0.06),
            gutter_border: Color::from_rgb(0.10, 0.16, 0.12),
            line_number_color: Color::from_rgb(0.26, 0.40, 0.30),
            active_line_number_color: Color::from_rgb(0.55, 0.95, 0.62),
            scrollbar_background: Color::from_rgb(0.04, 0.06, 0.05),
            scroller_color: Color::from_rgb(0.16, 0.30, 0.20),
            current_line_highlight: Color::from_rgba(0.40, 0.95, 0.50, 0.07),
        },
        Mode::Light => Style {
            background: Color::from_rgb(0.95, 0.99, 0.95),
            text_color: Color::from_rgb(0.08, 0.22, 0.12),
            placeholder_color: Color::from_rgb(0.50, 0.62, 0.53),
            caret_color: Color::from_rgb(0.10, 0.55, 0.20),
            selection_color: Color::from_rgba(0.20, 0.70, 0.30, 0.22),
            gutter_background: Color::from_rgb(0.92, 0.97, 0.92),
            gutter_border: Color::from_rgb(0.82, 0.90, 0.83),
            line_number_color: Color::from_rgb(0.52, 0.64, 0.55),
            active_line_number_color: Color::from_rgb(0.08, 0.30, 0.14),
            scrollbar_background: Color::from_rgb(0.95, 0.99, 0.95),
            scroller_color: Color::from_rgb(0.72, 0.86, 0.74),
            current_line_highlight: Color::from_rgba(0.10, 0.55, 0.20, 0.08),
        },
    }
}

/// Creates a style from any native Iced theme.
///
/// The theme palette decides whether the result is dark or light:
///
/// - `background`, `text_color`: the palette's base colors
/// - `gutter_background`: the weak background, slightly offset
/// - `line_number_color`: dimmed (dark) or blended (light) text
/// - `scroller_color`: the weak secondary color
/// - `current_line_highlight`: the weak primary color, mostly transparent
///
/// # Example
///
/// ```
/// use universe_editor::theme;
///
/// let style = theme::from_iced_theme(&iced::Theme::Dracula);
/// assert!(style.current_line_highlight.a < 1.0);
/// ```
#[must_use]
pub fn from_iced_theme(theme: &iced::Theme) -> Style {
    let palette = theme.extended_palette();
    let is_dark = palette.is_dark;

    let background = palette.background.base.color;
    let text_color = palette.background.base.text;

    let gutter_border = if is_dark {
        darken(palette.background.strong.color, 0.1)
    } else {
        lighten(palette.background.strong.color, 0.1)
    };

    // Dark themes dim the bright text, light themes blend it towards the
    // background
    let line_number_color = if is_dark {
        dim_color(text_color, 0.5)
    } else {
        blend_colors(text_color, background, 0.5)
    };

    Style {
        background,
        text_color,
        placeholder_color: blend_colors(text_color, background, 0.55),
        caret_color: palette.primary.base.color,
        selection_color: with_alpha(palette.primary.weak.color, 0.35),
        gutter_background: palette.background.weak.color,
        gutter_border,
        line_number_color,
        active_line_number_color: text_color,
        scrollbar_background: background,
        scroller_color: palette.secondary.weak.color,
        current_line_highlight: with_alpha(
            palette.primary.weak.color,
            if is_dark { 0.15 } else { 0.25 },
        ),
    }
}

/// Darkens a color by a given factor (0.0 to 1.0).
fn darken(color: Color, factor: f32) -> Color {
    Color {
        r: color.r * (1.0 - factor),
        g: color.g * (1.0 - factor),
        b: color.b * (1.0 - factor),
        a: color.a,
    }
}

/// Lightens a color by a given factor (0.0 to 1.0).
fn lighten(color: Color, factor: f32) -> Color {
    Color {
        r: color.r + (1.0 - color.r) * factor,
        g: color.g + (1.0 - color.g) * factor,
        b: color.b + (1.0 - color.b) * factor,
        a: color.a,
    }
}

fn dim_color(color: Color, factor: f32) -> Color {
    Color {
        r: color.r * factor,
        g: color.g * factor,
        b: color.b * factor,
        a: color.a,
    }
}

/// Blends two colors (0.0 = first color, 1.0 = second color).
fn blend_colors(color1: Color, color2: Color, factor: f32) -> Color {
    Color {
        r: color1.r + (color2.r - color1.r) * factor,
        g: color1.g + (color2.g - color1.g) * factor,
        b: color1.b + (color2.b - color1.b) * factor,
        a: color1.a + (color2.a - color1.a) * factor,
    }
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color { a: alpha, ..color }
}
