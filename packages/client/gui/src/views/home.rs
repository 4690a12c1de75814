use dddb_client_core::{AppState, Page};
use iced::widget::{column, row, text};
use iced::Element;

use super::{action_button, card, muted, navigate, subheading};
use crate::app::Message;
use crate::theme;

fn feature<'a>(title: &'a str, blurb: &'a str, page: Page) -> Element<'a, Message> {
    card(
        column![
            subheading(title),
            muted(blurb),
            action_button(format!("Open {}", page.title()), Some(navigate(page))),
        ]
        .spacing(12),
    )
}

pub fn view(state: &AppState) -> Element<Message> {
    let greeting = match state.session.user.as_ref() {
        Some(user) => format!(
            "Welcome back, {}.",
            user.full_name.as_deref().unwrap_or(&user.username)
        ),
        None => "Log in to augment and analyze your own data.".to_string(),
    };

    column![
        text("Data augmentation for small tabular datasets").size(28),
        text(greeting).size(15).color(theme::Colors::TEXT_DIM),
        row![
            feature(
                "CSV Augmentation",
                "Upload a CSV file, choose preprocessing and a synthesis method, then compare and download the augmented data.",
                Page::Augmentation,
            ),
            feature(
                "Analysis Agent",
                "Upload a CSV file and ask questions about it in plain language. Answers can include charts.",
                Page::Analysis,
            ),
            feature(
                "Options",
                "Check the backend connection and the dataset it currently holds.",
                Page::Options,
            ),
        ]
        .spacing(16),
    ]
    .spacing(16)
    .into()
}
