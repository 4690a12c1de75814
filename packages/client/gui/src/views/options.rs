use dddb_client_core::state::BackendHealth;
use dddb_client_core::{Action, AppState};
use iced::widget::{column, row, text};
use iced::{Alignment, Element};

use super::{card, heading, muted, secondary_button, subheading, table};
use crate::app::Message;
use crate::theme;

fn health(status: &BackendHealth) -> Element<Message> {
    let (label, color) = match status {
        BackendHealth::Unknown => ("Not checked".to_string(), theme::Colors::TEXT_DIM),
        BackendHealth::Checking => ("Checking…".to_string(), theme::Colors::WARNING),
        BackendHealth::Healthy => ("Healthy".to_string(), theme::Colors::SUCCESS),
        BackendHealth::Unhealthy(reason) => (format!("Unavailable: {reason}"), theme::Colors::ERROR),
    };
    text(label).size(14).color(color).into()
}

pub fn view(state: &AppState) -> Element<Message> {
    let checking = state.backend.health == BackendHealth::Checking;

    let columns: Element<Message> = match &state.backend.columns {
        Some(c) => table::facts(vec![
            ("All columns".into(), c.all_columns.join(", ")),
            ("Numeric".into(), c.numeric_columns.join(", ")),
            ("Categorical".into(), c.categorical_columns.join(", ")),
        ]),
        None => muted("The server holds no uploaded dataset."),
    };

    column![
        heading("Options"),
        card(
            column![
                subheading("Backend"),
                row![
                    health(&state.backend.health),
                    secondary_button("Check again", (!checking).then_some(Message::CoreAction(Action::CheckBackend))),
                ]
                .spacing(16)
                .align_y(Alignment::Center),
            ]
            .spacing(10),
        ),
        card(column![subheading("Current dataset"), columns].spacing(10)),
    ]
    .spacing(16)
    .into()
}
