use iced::widget::{container, row, text};
use iced::{Alignment, Element, Length};
use std::time::{Duration, Instant};

use crate::theme;

/// Braille-dot spinner, redrawn on every app tick while work is in flight.
#[derive(Debug, Clone)]
pub struct Spinner {
    start_time: Instant,
    frames: &'static [&'static str],
    frame_duration: Duration,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            frame_duration: Duration::from_millis(80),
        }
    }
}

impl Spinner {
    pub const TICK: Duration = Duration::from_millis(80);

    pub fn frame_at(&self, elapsed: Duration) -> &'static str {
        let index = (elapsed.as_millis() / self.frame_duration.as_millis()) as usize % self.frames.len();
        self.frames[index]
    }

    pub fn current_frame(&self) -> &'static str {
        self.frame_at(self.start_time.elapsed())
    }

    /// The spinner followed by a status label, e.g. "Uploading file…".
    pub fn view<'a, Message: 'a>(&self, label: impl Into<String>) -> Element<'a, Message> {
        container(
            row![
                text(self.current_frame()).size(16).color(theme::Colors::PRIMARY),
                text(label.into()).size(14).color(theme::Colors::TEXT_DIM),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        )
        .width(Length::Shrink)
        .into()
    }
}
