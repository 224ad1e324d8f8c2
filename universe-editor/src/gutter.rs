//! The line-number gutter.
//!
//! The gutter holds one entry per line of text and is regenerated in full on
//! every text change. The editor exposes it to the drawing code through
//! [`GutterController`], so nothing outside the editor reaches into its
//! fields.

use iced::widget::canvas::{self, Frame};
use iced::{Point, Size};

use crate::measure::Metrics;
use crate::theme::Style;

/// Minimum gutter width in pixels
pub(crate) const GUTTER_MIN_WIDTH: f32 = 48.0;
const GUTTER_PADDING: f32 = 12.0;

/// A single line number in the gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterEntry {
    /// The 1-based line number
    pub number: usize,
    /// Whether the caret is on this line
    pub active: bool,
}

/// Line numbers and their layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Gutter {
    entries: Vec<GutterEntry>,
    height: f32,
}

impl Default for Gutter {
    fn default() -> Self {
        Self {
            entries: vec![GutterEntry { number: 1, active: false }],
            height: 0.0,
        }
    }
}

impl Gutter {
    /// Rebuilds every entry for `line_count` lines, numbered from 1.
    pub fn regenerate(&mut self, line_count: usize) {
        self.entries = (1..=line_count.max(1))
            .map(|number| GutterEntry { number, active: false })
            .collect();
    }

    /// Marks the entry for the 1-based `line` as active and clears the rest.
    pub fn mark_active(&mut self, line: usize) {
        for entry in &mut self.entries {
            entry.active = entry.number == line;
        }
    }

    pub(crate) fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    /// The entries in line order.
    #[must_use]
    pub fn entries(&self) -> &[GutterEntry] {
        &self.entries
    }

    /// The active line number, if any entry is active.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.active)
            .map(|entry| entry.number)
    }

    /// The gutter height last set by the size adjuster.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Width needed to fit the largest line number.
    #[must_use]
    pub fn width(&self, metrics: &Metrics) -> f32 {
        let digits = self.entries.len().to_string().len();
        (digits as f32 * metrics.char_width + 2.0 * GUTTER_PADDING)
            .max(GUTTER_MIN_WIDTH)
    }
}

/// Capability the editor exposes to the line-number gutter.
pub trait GutterController {
    /// The current gutter state.
    fn gutter(&self) -> &Gutter;

    /// Font metrics shared with the input surface.
    fn metrics(&self) -> &Metrics;

    /// Applies the height computed by the size adjuster.
    fn set_gutter_height(&mut self, height: f32);
}

/// Draws the gutter background and the line numbers in `rows`.
///
/// The gutter is drawn last so it covers text scrolled horizontally under it.
pub(crate) fn draw<C: GutterController>(
    frame: &mut Frame,
    controller: &C,
    style: &Style,
    rows: std::ops::Range<usize>,
) {
    let gutter = controller.gutter();
    let metrics = controller.metrics();
    let width = gutter.width(metrics);
    let height = gutter.height().max(frame.height());

    frame.fill_rectangle(
        Point::ORIGIN,
        Size::new(width, height),
        style.gutter_background,
    );
    frame.fill_rectangle(
        Point::new(width - 1.0, 0.0),
        Size::new(1.0, height),
        style.gutter_border,
    );

    for entry in gutter.entries().iter().skip(rows.start).take(rows.len()) {
        let label = entry.number.to_string();
        let x = width - GUTTER_PADDING - metrics.text_width(&label);
        let y = (entry.number - 1) as f32 * metrics.line_height;

        frame.fill_text(canvas::Text {
            content: label,
            position: Point::new(x, y + 2.0),
            color: if entry.active {
                style.active_line_number_color
            } else {
                style.line_number_color
            },
            size: metrics.font_size.into(),
            font: iced::Font::MONOSPACE,
            ..canvas::Text::default()
        });
    }
}
