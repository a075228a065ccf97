use iced::widget::canvas::{self, Path, Stroke};
use iced::widget::container;
use iced::{Color, Element, Length, Point, Rectangle, Size, Theme, mouse};
use selector::TrackSegment;

/// Converts an x coordinate in track widget space to a playback position.
///
/// The mapping is proportional across the width of the widget, with the
/// left edge corresponding to position `0` and the right edge to the full
/// duration. Positions outside the widget are clamped.
pub fn position_from_x(x: f32, width: f32, duration: f64) -> f64 {
    if duration <= 0.0 || width <= 0.0 {
        return 0.0;
    }

    let ratio = f64::from(x.clamp(0.0, width) / width);
    ratio * duration
}

fn x_from_pct(pct: f64, width: f32) -> f32 {
    (pct.clamp(0.0, 100.0) / 100.0) as f32 * width
}

#[derive(Debug, Default)]
struct TrackState {
    scrubbing: bool,
}

#[derive(Debug)]
struct TrackProgram<'a, Message> {
    segment: Option<TrackSegment>,
    duration: f64,
    position: f64,
    cache: &'a canvas::Cache,
    on_seek: fn(f64) -> Message,
}

impl<Message> canvas::Program<Message> for TrackProgram<'_, Message> {
    type State = TrackState;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        if self.duration <= 0.0 {
            return (canvas::event::Status::Ignored, None);
        }

        let cursor_x = cursor.position().map(|position| position.x - bounds.x);
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let Some(x) = cursor_x else {
                    return (canvas::event::Status::Ignored, None);
                };
                state.scrubbing = true;
                let position = position_from_x(x, bounds.width, self.duration);
                (
                    canvas::event::Status::Captured,
                    Some((self.on_seek)(position)),
                )
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let was_scrubbing = state.scrubbing;
                state.scrubbing = false;
                if was_scrubbing {
                    (canvas::event::Status::Captured, None)
                } else {
                    (canvas::event::Status::Ignored, None)
                }
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) if state.scrubbing => {
                let Some(x) = cursor_x else {
                    return (canvas::event::Status::Ignored, None);
                };
                let position = position_from_x(x, bounds.width, self.duration);
                (
                    canvas::event::Status::Captured,
                    Some((self.on_seek)(position)),
                )
            }
            _ => (canvas::event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let highlight = self.cache.draw(renderer, bounds.size(), |frame| {
            let background = Path::rectangle(Point::ORIGIN, frame.size());
            frame.fill(&background, Color::from_rgb8(26, 29, 36));

            let Some(segment) = self.segment else {
                return;
            };

            let left = x_from_pct(segment.start_pct, bounds.width);
            let right = x_from_pct(segment.end_pct, bounds.width);
            let band = Path::rectangle(
                Point::new(left, 6.0),
                Size::new((right - left).max(1.0), (bounds.height - 12.0).max(1.0)),
            );
            frame.fill(&band, Color::from_rgb8(96, 158, 110));
        });

        let mut marker_frame = canvas::Frame::new(renderer, bounds.size());
        if self.duration > 0.0 {
            let x = ((self.position / self.duration).clamp(0.0, 1.0)) as f32 * bounds.width;
            let line = Path::line(Point::new(x, 0.0), Point::new(x, bounds.height));
            marker_frame.stroke(
                &line,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color::from_rgb8(233, 196, 82)),
            );
        }

        vec![highlight, marker_frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.duration > 0.0 && cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::None
        }
    }
}

/// Renders the proportional trim-window highlight with a position marker.
pub fn view<'a, Message>(
    segment: Option<TrackSegment>,
    duration: f64,
    position: f64,
    cache: &'a canvas::Cache,
    on_seek: fn(f64) -> Message,
) -> Element<'a, Message>
where
    Message: 'a,
{
    container(
        canvas::Canvas::new(TrackProgram {
            segment,
            duration,
            position,
            cache,
            on_seek,
        })
        .width(Length::Fill)
        .height(Length::Fixed(48.0)),
    )
    .width(Length::Fill)
    .into()
}
