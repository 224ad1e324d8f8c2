//! The active-line highlight band.

use std::time::Duration;
use web_time::Instant;

/// How long the emphasis pulse lasts before the band settles
pub(crate) const PULSE_DURATION: Duration = Duration::from_millis(200);
/// Vertical scale of the band while pulsing
pub(crate) const PULSE_SCALE: f32 = 1.25;

/// Position and presentation of the band behind the active line.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveLineHighlight {
    top: f32,
    width: f32,
    visible: bool,
    pulse_started: Option<Instant>,
}

impl Default for ActiveLineHighlight {
    fn default() -> Self {
        Self { top: 0.0, width: 0.0, visible: false, pulse_started: None }
    }
}

impl ActiveLineHighlight {
    /// Moves the band to the 1-based `line`.
    ///
    /// A pulse starts only when the band actually moves, so repeated calls
    /// for the same line leave it untouched.
    pub fn move_to(&mut self, line: usize, line_height: f32, now: Instant) {
        let top = line.saturating_sub(1) as f32 * line_height;

        if (top - self.top).abs() > f32::EPSILON {
            self.top = top;
            self.pulse_started = Some(now);
        }
    }

    /// Ends the pulse once it has run for [`PULSE_DURATION`].
    ///
    /// Returns `true` if the band changed and needs a redraw.
    pub fn settle(&mut self, now: Instant) -> bool {
        match self.pulse_started {
            Some(started) if now.duration_since(started) >= PULSE_DURATION => {
                self.pulse_started = None;
                true
            }
            _ => false,
        }
    }

    /// Shows the band while the editor has focus.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Vertical offset of the band.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.top
    }

    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// 1.0 when visible, 0.0 when hidden.
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        if self.visible { 1.0 } else { 0.0 }
    }

    /// Current vertical scale of the band.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        if self.pulse_started.is_some() { PULSE_SCALE } else { 1.0 }
    }

    #[must_use]
    pub const fn is_pulsing(&self) -> bool {
        self.pulse_started.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_to_line_offset() {
        let mut highlight = ActiveLineHighlight::default();
        highlight.move_to(3, 20.0, Instant::now());
        assert!((highlight.top() - 40.0).abs() < f32::EPSILON);
        assert!(highlight.is_pulsing());
    }

    #[test]
    fn test_same_line_does_not_pulse() {
        let mut highlight = ActiveLineHighlight::default();
        highlight.move_to(1, 20.0, Instant::now());
        assert!(!highlight.is_pulsing());
        assert!((highlight.scale() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pulse_settles_after_duration() {
        let start = Instant::now();
        let mut highlight = ActiveLineHighlight::default();
        highlight.move_to(2, 20.0, start);
        assert!((highlight.scale() - PULSE_SCALE).abs() < f32::EPSILON);

        assert!(!highlight.settle(start + Duration::from_millis(50)));
        assert!(highlight.is_pulsing());

        assert!(highlight.settle(start + PULSE_DURATION));
        assert!((highlight.scale() - 1.0).abs() < f32::EPSILON);
        assert!(!highlight.settle(start + PULSE_DURATION * 2));
    }

    #[test]
    fn test_visibility_drives_opacity() {
        let mut highlight = ActiveLineHighlight::default();
        assert!(highlight.opacity() < f32::EPSILON);
        highlight.set_visible(true);
        assert!((highlight.opacity() - 1.0).abs() < f32::EPSILON);
    }
}
