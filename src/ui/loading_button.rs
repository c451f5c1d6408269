use std::time::{Duration, Instant};

use iced::mouse;
use iced::widget::canvas;
use iced::widget::text;
use iced::{alignment, Color, Pixels, Point, Radians, Rectangle, Renderer, Size, Theme};

/// Length of one loading sweep. The animation is fixed-duration and does not
/// track transfer progress.
const LOADING_DURATION: Duration = Duration::from_millis(2000);

const FULL_SWEEP_DEGREES: f32 = 360.0;

const BUTTON_COLOR: Color = Color::from_rgb(0.404, 0.227, 0.718);
const HIGHLIGHT_COLOR: Color = Color::from_rgb(0.271, 0.153, 0.627);
const ARC_COLOR: Color = Color::from_rgb(1.0, 0.839, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Completed,
    Clicked,
    Loading,
}

/// Custom-drawn trigger control. One run is monotonic:
/// `Completed -> Clicked -> Loading -> Completed`, driven by the instants the
/// caller feeds in; there is no internal clock.
#[derive(Debug)]
pub struct LoadingButton {
    state: ButtonState,
    sweep_started: Option<Instant>,
    fraction: f32,
}

impl Default for LoadingButton {
    fn default() -> Self {
        Self {
            state: ButtonState::Completed,
            sweep_started: None,
            fraction: 0.0,
        }
    }
}

impl LoadingButton {
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// `Completed -> Clicked`. A no-op in any other state.
    pub fn press(&mut self) -> bool {
        if self.state == ButtonState::Completed {
            self.state = ButtonState::Clicked;
            true
        } else {
            false
        }
    }

    /// `Clicked -> Loading`, starting the sweep at `now`.
    pub fn start_loading(&mut self, now: Instant) -> bool {
        if self.state == ButtonState::Clicked {
            self.state = ButtonState::Loading;
            self.sweep_started = Some(now);
            self.fraction = 0.0;
            true
        } else {
            false
        }
    }

    /// Advance the sweep. At fraction 1.0 the control returns to `Completed`
    /// and stops requesting frames.
    pub fn tick(&mut self, now: Instant) {
        if self.state != ButtonState::Loading {
            return;
        }

        if let Some(started) = self.sweep_started {
            self.fraction = sweep_fraction(started, now);
            if self.fraction >= 1.0 {
                self.state = ButtonState::Completed;
                self.sweep_started = None;
                self.fraction = 0.0;
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.state == ButtonState::Loading
    }

    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn label(&self) -> &'static str {
        match self.state {
            ButtonState::Completed => "Download",
            ButtonState::Clicked => "Clicked",
            ButtonState::Loading => "We are loading",
        }
    }
}

fn sweep_fraction(started: Instant, now: Instant) -> f32 {
    let elapsed = now.saturating_duration_since(started);
    (elapsed.as_secs_f32() / LOADING_DURATION.as_secs_f32()).min(1.0)
}

/// Highlight rectangle width at a given sweep fraction.
pub(crate) fn highlight_width(fraction: f32, total_width: f32) -> f32 {
    fraction * total_width
}

/// Arc sweep in degrees at a given fraction.
pub(crate) fn arc_sweep(fraction: f32) -> f32 {
    fraction * FULL_SWEEP_DEGREES
}

impl<Message> canvas::Program<Message> for LoadingButton {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        frame.fill_rectangle(Point::ORIGIN, frame.size(), BUTTON_COLOR);

        if self.state == ButtonState::Loading {
            let width = highlight_width(self.fraction, frame.width());
            frame.fill_rectangle(
                Point::ORIGIN,
                Size::new(width, frame.height()),
                HIGHLIGHT_COLOR,
            );

            let sweep = arc_sweep(self.fraction);
            if sweep > 0.0 {
                let center = Point::new(frame.width() * 0.75, frame.height() / 2.0);
                let radius = (frame.height() / 2.0 - 10.0).max(4.0);

                let wedge = canvas::Path::new(|builder| {
                    builder.move_to(center);
                    builder.arc(canvas::path::Arc {
                        center,
                        radius,
                        start_angle: Radians(0.0),
                        end_angle: Radians(sweep.to_radians()),
                    });
                    builder.close();
                });
                frame.fill(&wedge, ARC_COLOR);
            }
        }

        frame.fill_text(canvas::Text {
            content: self.label().to_string(),
            position: Point::new(frame.width() / 2.0, frame.height() / 2.0),
            color: Color::WHITE,
            size: Pixels(20.0),
            align_x: text::Alignment::Center,
            align_y: alignment::Vertical::Center,
            ..canvas::Text::default()
        });

        vec![frame.into_geometry()]
    }
}
