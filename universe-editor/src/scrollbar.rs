//! The custom horizontal scrollbar.
//!
//! [`Scrollbar`] is the pure model: offset, viewport width and content width.
//! The editor exposes it through [`ScrollbarController`]; [`Track`] draws it
//! below the text and turns thumb drags into [`Message::ScrollTo`].

use iced::mouse;
use iced::widget::canvas::{self, Action, Frame, Geometry};
use iced::{Event, Point, Rectangle, Renderer, Size, Theme, window};

use crate::editor::Message;
use crate::theme::Style;

/// Height of the scrollbar track in pixels
pub(crate) const SCROLLBAR_HEIGHT: f32 = 10.0;
const MIN_THUMB_WIDTH: f32 = 24.0;

/// Horizontal extent of the thumb within the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thumb {
    pub x: f32,
    pub width: f32,
}

/// Horizontal scroll state of the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scrollbar {
    offset: f32,
    viewport_width: f32,
    content_width: f32,
    /// Window bounds of the drawn [`Track`], reported after layout
    track: Option<Rectangle>,
}

impl Scrollbar {
    /// Current horizontal scroll offset.
    #[must_use]
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    #[must_use]
    pub const fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    #[must_use]
    pub const fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Largest valid offset.
    #[must_use]
    pub fn max_offset(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    pub fn set_content_width(&mut self, width: f32) {
        self.content_width = width.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    #[must_use]
    pub const fn track_bounds(&self) -> Option<Rectangle> {
        self.track
    }

    pub fn set_track_bounds(&mut self, bounds: Rectangle) {
        self.track = Some(bounds);
    }

    /// Returns `true` if `point`, in window coordinates, lies on the track.
    ///
    /// The track is only shown while some line overflows the viewport.
    #[must_use]
    pub fn is_over_track(&self, point: Point) -> bool {
        self.max_offset() > 0.0 && self.track.is_some_and(|bounds| bounds.contains(point))
    }

    /// Scrolls to `offset`, clamped. Returns `true` if the offset changed.
    pub fn scroll_to(&mut self, offset: f32) -> bool {
        let offset = offset.clamp(0.0, self.max_offset());
        let changed = (offset - self.offset).abs() > f32::EPSILON;
        self.offset = offset;
        changed
    }

    /// Scrolls just enough to show the span `[left, right]`.
    pub fn reveal(&mut self, left: f32, right: f32) -> bool {
        if left < self.offset {
            self.scroll_to(left)
        } else if right > self.offset + self.viewport_width {
            self.scroll_to(right - self.viewport_width)
        } else {
            false
        }
    }

    /// Thumb geometry for a track `track_width` pixels wide, or `None` when
    /// the content fits and no scrollbar is needed.
    #[must_use]
    pub fn thumb(&self, track_width: f32) -> Option<Thumb> {
        if self.content_width <= self.viewport_width || self.viewport_width <= 0.0 {
            return None;
        }

        let width = (self.viewport_width / self.content_width * track_width)
            .max(MIN_THUMB_WIDTH)
            .min(track_width);
        let x = self.offset / self.max_offset() * (track_width - width);

        Some(Thumb { x, width })
    }

    /// Maps a thumb drag of `dx` pixels, started at `start_offset`, to a new
    /// offset.
    #[must_use]
    pub fn offset_for_drag(&self, start_offset: f32, dx: f32, track_width: f32) -> f32 {
        let Some(thumb) = self.thumb(track_width) else {
            return self.offset;
        };

        let travel = track_width - thumb.width;
        if travel <= 0.0 {
            return self.offset;
        }

        (start_offset + dx * self.max_offset() / travel).clamp(0.0, self.max_offset())
    }
}

/// Capability the editor exposes to the scrollbar.
pub trait ScrollbarController {
    /// The current scroll state.
    fn scrollbar(&self) -> &Scrollbar;

    /// Moves the input surface horizontally.
    fn scroll_horizontally_to(&mut self, offset: f32);
}

/// Scrolls the controller by `delta` pixels.
pub(crate) fn scroll_by<C: ScrollbarController>(controller: &mut C, delta: f32) {
    let offset = controller.scrollbar().offset() + delta;
    controller.scroll_horizontally_to(offset);
}

/// Drag state of the [`Track`].
#[derive(Debug, Default)]
pub(crate) struct DragState {
    /// Cursor x and scroll offset when the drag started
    origin: Option<(f32, f32)>,
}

/// The scrollbar widget drawn below the input surface.
pub(crate) struct Track<'a> {
    scrollbar: &'a Scrollbar,
    style: Style,
}

impl<'a> Track<'a> {
    pub(crate) fn new<C: ScrollbarController>(controller: &'a C, style: Style) -> Self {
        Self { scrollbar: controller.scrollbar(), style }
    }
}

impl canvas::Program<Message> for Track<'_> {
    type State = DragState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                let thumb = self.scrollbar.thumb(bounds.width)?;

                if position.x >= thumb.x && position.x <= thumb.x + thumb.width {
                    state.origin = Some((position.x, self.scrollbar.offset()));
                    Some(Action::capture())
                } else {
                    // Clicking the track pages towards the cursor
                    let page = if position.x < thumb.x {
                        -self.scrollbar.viewport_width()
                    } else {
                        self.scrollbar.viewport_width()
                    };
                    Some(
                        Action::publish(Message::ScrollTo(self.scrollbar.offset() + page))
                            .and_capture(),
                    )
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                let (start_x, start_offset) = state.origin?;
                let dx = position.x - bounds.x - start_x;
                let offset = self.scrollbar.offset_for_drag(start_offset, dx, bounds.width);

                Some(Action::publish(Message::ScrollTo(offset)).and_capture())
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                state.origin.take().map(|_| Action::capture())
            }
            Event::Window(window::Event::RedrawRequested(_)) => {
                let moved = self.scrollbar.track_bounds() != Some(bounds);
                moved.then(|| Action::publish(Message::TrackLaidOut(bounds)))
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), self.style.scrollbar_background);

        if let Some(thumb) = self.scrollbar.thumb(bounds.width) {
            frame.fill_rectangle(
                Point::new(thumb.x, 2.0),
                Size::new(thumb.width, bounds.height - 4.0),
                self.style.scroller_color,
            );
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrollbar(viewport: f32, content: f32) -> Scrollbar {
        let mut scrollbar = Scrollbar::default();
        scrollbar.set_viewport_width(viewport);
        scrollbar.set_content_width(content);
        scrollbar
    }

    #[test]
    fn test_no_thumb_when_content_fits() {
        assert_eq!(scrollbar(400.0, 300.0).thumb(400.0), None);
        assert_eq!(scrollbar(400.0, 400.0).thumb(400.0), None);
    }

    #[test]
    fn test_thumb_tracks_offset() {
        let mut bar = scrollbar(200.0, 800.0);
        let thumb = bar.thumb(200.0);
        assert_eq!(thumb, Some(Thumb { x: 0.0, width: 50.0 }));

        bar.scroll_to(600.0);
        let thumb = bar.thumb(200.0).map(|thumb| thumb.x);
        assert_eq!(thumb, Some(150.0));
    }

    #[test]
    fn test_offset_is_clamped() {
        let mut bar = scrollbar(200.0, 500.0);
        assert!(bar.scroll_to(1_000.0));
        assert!((bar.offset() - 300.0).abs() < f32::EPSILON);
        assert!(bar.scroll_to(-10.0));
        assert!(bar.offset().abs() < f32::EPSILON);
        assert!(!bar.scroll_to(-5.0));
    }

    #[test]
    fn test_track_hit_needs_overflow() {
        let track = Rectangle::new(Point::new(50.0, 300.0), Size::new(200.0, SCROLLBAR_HEIGHT));
        let inside = Point::new(120.0, 305.0);

        let mut bar = scrollbar(200.0, 800.0);
        assert!(!bar.is_over_track(inside));

        bar.set_track_bounds(track);
        assert!(bar.is_over_track(inside));
        assert!(!bar.is_over_track(Point::new(120.0, 290.0)));

        // Hidden once the content fits again
        bar.set_content_width(100.0);
        assert!(!bar.is_over_track(inside));
    }

    #[test]
    fn test_shrinking_content_reclamps() {
        let mut bar = scrollbar(200.0, 800.0);
        bar.scroll_to(600.0);
        bar.set_content_width(150.0);
        assert!(bar.offset().abs() < f32::EPSILON);
        assert_eq!(bar.thumb(200.0), None);
    }

    #[test]
    fn test_drag_maps_track_to_content() {
        let bar = scrollbar(200.0, 800.0);
        // Thumb is 50px on a 200px track, so 150px of travel covers 600px
        let offset = bar.offset_for_drag(0.0, 75.0, 200.0);
        assert!((offset - 300.0).abs() < 0.001);

        let offset = bar.offset_for_drag(0.0, 1_000.0, 200.0);
        assert!((offset - 600.0).abs() < 0.001);
    }

    #[test]
    fn test_reveal() {
        let mut bar = scrollbar(100.0, 1_000.0);
        assert!(bar.reveal(250.0, 260.0));
        assert!((bar.offset() - 160.0).abs() < 0.001);

        assert!(bar.reveal(20.0, 30.0));
        assert!((bar.offset() - 20.0).abs() < 0.001);

        assert!(!bar.reveal(40.0, 60.0));
    }
}
