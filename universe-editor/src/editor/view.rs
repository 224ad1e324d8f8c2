//! Iced UI view and rendering logic.

use iced::widget::canvas::Canvas;
use iced::widget::{Column, Row, Scrollable, Space, container, scrollable};
use iced::{Background, Border, Color, Element, Length, Shadow};

use super::{Message, UniverseEditor};
use crate::scrollbar::{SCROLLBAR_HEIGHT, Track};

impl UniverseEditor {
    /// Creates the view element: the input surface in a vertical scrollable,
    /// with the horizontal scrollbar below it.
    pub fn view(&self) -> Element<'_, Message> {
        // Keep the canvas at least as tall as the viewport so short documents
        // still paint the whole background
        let canvas_height = self.content_size.height.max(self.viewport_height);

        let canvas = Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fixed(canvas_height));

        // Capture style colors for closures
        let scrollbar_bg = self.style.scrollbar_background;
        let scroller_color = self.style.scroller_color;
        let background_color = self.style.background;
        let rail = move || scrollable::Rail {
            background: Some(scrollbar_bg.into()),
            border: Border { radius: 4.0.into(), width: 0.0, color: Color::TRANSPARENT },
            scroller: scrollable::Scroller {
                background: scroller_color.into(),
                border: Border { radius: 4.0.into(), width: 0.0, color: Color::TRANSPARENT },
            },
        };

        let scrollable = Scrollable::new(canvas)
            .id(self.scrollable_id.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .on_scroll(Message::Scrolled)
            .style(move |_theme, _status| scrollable::Style {
                container: container::Style {
                    background: Some(Background::Color(background_color)),
                    ..container::Style::default()
                },
                vertical_rail: rail(),
                horizontal_rail: rail(),
                gap: None,
                auto_scroll: scrollable::AutoScroll {
                    background: Color::TRANSPARENT.into(),
                    border: Border::default(),
                    shadow: Shadow::default(),
                    icon: Color::TRANSPARENT,
                },
            });

        let mut layout = Column::new().push(scrollable);

        // The track only appears when some line is wider than the viewport
        if self.scrollbar.max_offset() > 0.0 {
            let track = Canvas::new(Track::new(self, self.style))
                .width(Length::Fill)
                .height(Length::Fixed(SCROLLBAR_HEIGHT));

            layout = layout.push(
                Row::new()
                    .push(Space::new().width(Length::Fixed(self.text_origin())))
                    .push(track),
            );
        }

        let height = self.attributes.height.map_or(Length::Fill, Length::Fixed);

        container(layout)
            .width(Length::Fill)
            .height(height)
            .clip(true)
            .style(move |_| container::Style {
                background: Some(Background::Color(background_color)),
                ..container::Style::default()
            })
            .into()
    }
}
