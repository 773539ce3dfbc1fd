// SPDX-License-Identifier: MPL-2.0
//! Busy indicator shown while a search request is in flight.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, path::Arc, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Radians, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};
use std::time::Duration;

/// Full turns per second.
const REVOLUTIONS_PER_SECOND: f32 = 1.2;

const STROKE_WIDTH: f32 = 3.0;

/// Rotating half-circle drawn on a canvas.
pub struct Spinner {
    angle: f32,
    color: Color,
    size: f32,
}

impl Spinner {
    /// Spinner positioned for the given time since the request started.
    #[must_use]
    pub fn new(color: Color, elapsed: Duration) -> Self {
        Self {
            angle: angle_at(elapsed),
            color,
            size: sizing::ICON_MD,
        }
    }

    pub fn into_element<'a, Message: 'a>(self) -> iced::Element<'a, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

fn angle_at(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() * REVOLUTIONS_PER_SECOND).fract() * TAU
}

impl<Message> canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = (frame.width().min(frame.height()) - STROKE_WIDTH) / 2.0;

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default().with_width(STROKE_WIDTH).with_color(Color {
                a: 0.25,
                ..self.color
            }),
        );

        let start = self.angle - PI / 2.0;
        let arc = Path::new(|builder| {
            builder.arc(Arc {
                center,
                radius,
                start_angle: Radians(start),
                end_angle: Radians(start + PI),
            });
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_width(STROKE_WIDTH)
                .with_color(self.color)
                .with_line_cap(canvas::LineCap::Round),
        );

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_wraps_every_revolution() {
        assert_eq!(angle_at(Duration::ZERO), 0.0);
        let one_turn = Duration::from_secs_f32(1.0 / REVOLUTIONS_PER_SECOND);
        let angle = angle_at(one_turn);
        assert!(angle < 0.01 || (TAU - angle) < 0.01);
    }

    #[test]
    fn angle_stays_in_range() {
        for ms in (0..5_000).step_by(37) {
            let angle = angle_at(Duration::from_millis(ms));
            assert!((0.0..TAU).contains(&angle));
        }
    }
}
