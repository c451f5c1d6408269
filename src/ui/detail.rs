use std::time::{Duration, Instant};

use iced::widget::{button, column, row, text, Space};
use iced::{Color, Element, Length};

use crate::domain::DownloadReport;

const ENTRANCE_DURATION: Duration = Duration::from_millis(600);
const SLIDE_DISTANCE: f32 = 180.0;
const DROP_DISTANCE: f32 = 120.0;

const SUCCESS_COLOR: Color = Color::from_rgb(0.18, 0.55, 0.24);
const FAILURE_COLOR: Color = Color::from_rgb(0.75, 0.16, 0.16);

/// The two pre-authored entrance transitions. Selection is a binary branch
/// on the literal success marker; "Unknown" shares the failure transition
/// with "Failed" on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Success,
    Failure,
}

impl Transition {
    pub fn for_outcome(outcome: &str) -> Self {
        if outcome == "Success" {
            Transition::Success
        } else {
            Transition::Failure
        }
    }
}

#[derive(Debug, Clone)]
pub enum DetailMessage {
    OkPressed,
}

/// Result screen: shows the received payload verbatim and plays one of the
/// two transitions while entering.
pub struct DetailView {
    report: DownloadReport,
    transition: Transition,
    entrance_started: Option<Instant>,
    fraction: f32,
}

impl DetailView {
    pub fn new(report: DownloadReport, now: Instant) -> Self {
        let transition = Transition::for_outcome(&report.outcome);
        Self {
            report,
            transition,
            entrance_started: Some(now),
            fraction: 0.0,
        }
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn report(&self) -> &DownloadReport {
        &self.report
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(started) = self.entrance_started {
            let elapsed = now.saturating_duration_since(started);
            self.fraction =
                (elapsed.as_secs_f32() / ENTRANCE_DURATION.as_secs_f32()).min(1.0);
            if self.fraction >= 1.0 {
                self.entrance_started = None;
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.entrance_started.is_some()
    }

    fn status_color(&self) -> Color {
        match self.transition {
            Transition::Success => SUCCESS_COLOR,
            Transition::Failure => FAILURE_COLOR,
        }
    }

    pub fn view(&self) -> Element<'_, DetailMessage> {
        let (dx, dy) = entrance_offset(self.transition, self.fraction);

        column![
            text("Download detail").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("File name").size(14),
            text(&self.report.label).size(20),
            Space::new().height(Length::Fixed(16.0)),
            text("Status").size(14),
            Space::new().height(Length::Fixed(dy)),
            row![
                Space::new().width(Length::Fixed(dx)),
                text(&self.report.outcome)
                    .size(20)
                    .color(self.status_color()),
            ],
            Space::new().height(Length::Fixed(30.0)),
            button("Ok").on_press(DetailMessage::OkPressed).padding([10, 40]),
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}

/// Offset of the status text while the entrance transition runs: the success
/// transition slides in horizontally, the failure transition drops in.
pub(crate) fn entrance_offset(transition: Transition, fraction: f32) -> (f32, f32) {
    let remaining = 1.0 - fraction.clamp(0.0, 1.0);
    match transition {
        Transition::Success => (SLIDE_DISTANCE * remaining, 0.0),
        Transition::Failure => (0.0, DROP_DISTANCE * remaining),
    }
}
