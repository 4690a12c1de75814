use dddb_client_core::session::SessionAction;
use dddb_client_core::{AppState, Page};
use iced::widget::{button, container, row, text, Row, Space};
use iced::{Alignment, Element, Length};

use super::{navigate, session_msg};
use crate::app::Message;
use crate::theme;

pub fn view(state: &AppState) -> Element<Message> {
    let links = Page::NAV.iter().map(|page| {
        let active = state.page == *page;
        button(text(page.title()).size(14))
            .on_press(navigate(*page))
            .padding([6, 12])
            .style(if active {
                theme::nav_button_active
            } else {
                theme::nav_button_inactive
            })
            .into()
    });

    let account: Element<Message> = match state.session.username() {
        Some(username) => row![
            text(username).size(14).color(theme::Colors::TEXT_DIM),
            button(text("Log out").size(14))
                .on_press(session_msg(SessionAction::Logout))
                .padding([6, 12])
                .style(theme::secondary_button),
        ]
        .spacing(12)
        .align_y(Alignment::Center)
        .into(),
        None if state.session.is_loading => text("…").size(14).into(),
        None => row![
            button(text("Log in").size(14))
                .on_press(navigate(Page::Login))
                .padding([6, 12])
                .style(theme::nav_button_inactive),
            button(text("Sign up").size(14))
                .on_press(navigate(Page::Register))
                .padding([6, 12])
                .style(theme::primary_button),
        ]
        .spacing(8)
        .into(),
    };

    container(
        row![
            text("DDDB").size(20).color(theme::Colors::PRIMARY),
            Space::with_width(24),
            Row::with_children(links).spacing(4),
            Space::with_width(Length::Fill),
            account,
        ]
        .align_y(Alignment::Center),
    )
    .padding([10, 24])
    .width(Length::Fill)
    .style(theme::nav_bar)
    .into()
}
